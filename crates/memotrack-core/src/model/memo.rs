use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::model::market::Market;

/// A single tracked memo tied to a market location.
///
/// `date` and `time` are stored exactly as submitted; they are parsed only
/// when ordering memos (see [`Memo::timestamp`]). `status` is free text and
/// only ever compared case-insensitively for aggregation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Memo {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub date: String,
    pub time: String,
    pub status: String,
    pub market: Market,
    pub direction: Direction,
}

impl Memo {
    /// Parse `date` + `time` into a sort key. Returns `None` when either
    /// part is missing or unparsable; callers order those records last.
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").ok()?;
        let time = parse_time(self.time.trim())?;
        Some(date.and_time(time))
    }
}

fn parse_time(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Incoming,
    Outgoing,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Incoming => write!(f, "Incoming"),
            Direction::Outgoing => write!(f, "Outgoing"),
        }
    }
}

impl std::str::FromStr for Direction {
    type Err = Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Incoming" => Ok(Direction::Incoming),
            "Outgoing" => Ok(Direction::Outgoing),
            _ => Err(Error::Validation(format!(
                "direction must be \"Incoming\" or \"Outgoing\", got: {s}"
            ))),
        }
    }
}

/// Client payload for creating or updating a memo.
///
/// Every field is optional at the wire level so that a missing field
/// produces a validation error naming it, rather than a deserialization
/// failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoDraft {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub status: Option<String>,
    pub market: Option<String>,
    pub direction: Option<String>,
}

impl MemoDraft {
    /// Validate the draft and build a [`Memo`] carrying `id`.
    ///
    /// All seven business fields are mandatory and non-blank; `market` and
    /// `direction` must parse as their closed enums. Nothing is applied
    /// partially: the first violation aborts with a validation error.
    pub fn into_memo(self, id: Uuid) -> Result<Memo> {
        let title = required(self.title, "title")?;
        let description = required(self.description, "description")?;
        let date = required(self.date, "date")?;
        let time = required(self.time, "time")?;
        let status = required(self.status, "status")?;
        let market: Market = required(self.market, "market")?.parse()?;
        let direction: Direction = required(self.direction, "direction")?.parse()?;

        Ok(Memo {
            id,
            title,
            description,
            date,
            time,
            status,
            market,
            direction,
        })
    }
}

fn required(value: Option<String>, field: &str) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(Error::Validation(format!("{field} is required"))),
    }
}

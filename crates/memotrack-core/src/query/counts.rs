use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::market::Market;
use crate::query::MemoEngine;

/// Per-market tallies keyed by the canonical market names. Every one of the
/// fixed markets is present, even with no memos filed against it.
pub type MarketCountsResponse = BTreeMap<Market, MarketTally>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketTally {
    pub total: u64,
    pub approved: u64,
    pub pending: u64,
}

/// Count memos per market. Every memo counts toward its market's `total`;
/// `approved` and `pending` are matched against `status` case-insensitively
/// and any other status contributes to `total` only.
pub async fn execute(engine: &MemoEngine) -> Result<MarketCountsResponse> {
    let memos = engine.storage.list_memos().await?;

    let mut counts: MarketCountsResponse = Market::ALL
        .into_iter()
        .map(|market| (market, MarketTally::default()))
        .collect();

    for memo in &memos {
        let tally = counts.entry(memo.market).or_default();
        tally.total += 1;
        if memo.status.eq_ignore_ascii_case("approved") {
            tally.approved += 1;
        } else if memo.status.eq_ignore_ascii_case("pending") {
            tally.pending += 1;
        }
    }

    Ok(counts)
}

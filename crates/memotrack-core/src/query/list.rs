use std::cmp::Reverse;

use crate::error::Result;
use crate::model::memo::Memo;
use crate::query::MemoEngine;

/// All memos, most recent date+time first. Records whose date or time does
/// not parse carry no timestamp and sort after every record that does.
pub async fn execute(engine: &MemoEngine) -> Result<Vec<Memo>> {
    let mut memos = engine.storage.list_memos().await?;
    memos.sort_by_cached_key(|m| Reverse(m.timestamp()));
    Ok(memos)
}

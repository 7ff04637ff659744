use uuid::Uuid;

use crate::error::Result;
use crate::model::memo::{Memo, MemoDraft};
use crate::query::MemoEngine;

/// Validate the draft, assign a fresh id, and append the memo.
pub async fn execute(engine: &MemoEngine, draft: MemoDraft) -> Result<Memo> {
    let memo = draft.into_memo(Uuid::now_v7())?;
    engine.storage.insert_memo(&memo).await?;
    Ok(memo)
}

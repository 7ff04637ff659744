use uuid::Uuid;

use crate::error::{Error, Result};
use crate::model::memo::{Memo, MemoDraft};
use crate::query::MemoEngine;

/// Replace every business field of the memo with `id`, keeping the id.
///
/// The existence check runs before draft validation so an unknown id is
/// reported as not-found regardless of what the payload contains.
pub async fn execute(engine: &MemoEngine, id: Uuid, draft: MemoDraft) -> Result<Memo> {
    let existing = engine
        .storage
        .get_memo(id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("memo {id} not found")))?;

    let memo = draft.into_memo(existing.id)?;
    engine.storage.update_memo(&memo).await?;
    Ok(memo)
}

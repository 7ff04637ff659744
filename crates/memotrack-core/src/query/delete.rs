use uuid::Uuid;

use crate::error::Result;
use crate::query::MemoEngine;

/// Remove the memo with `id`; not-found if no record matches.
pub async fn execute(engine: &MemoEngine, id: Uuid) -> Result<()> {
    engine.storage.delete_memo(id).await
}

pub mod json_file;

use crate::error::Result;
use crate::model::memo::Memo;
use uuid::Uuid;

/// Persistence backend for the memo collection.
///
/// Implementations must serialize each call internally: a mutation is a
/// complete read-modify-write of the collection and two interleaved cycles
/// would lose the first writer's change.
#[async_trait::async_trait]
pub trait MemoStorage: Send + Sync {
    async fn list_memos(&self) -> Result<Vec<Memo>>;
    async fn get_memo(&self, id: Uuid) -> Result<Option<Memo>>;
    async fn insert_memo(&self, memo: &Memo) -> Result<()>;
    /// Replace the stored record with the same id. `Error::NotFound` if absent.
    async fn update_memo(&self, memo: &Memo) -> Result<()>;
    /// Remove the record with this id. `Error::NotFound` if absent.
    async fn delete_memo(&self, id: Uuid) -> Result<()>;
}

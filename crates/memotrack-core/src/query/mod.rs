pub mod counts;
pub mod create;
pub mod delete;
pub mod list;
pub mod update;

use std::sync::Arc;

use uuid::Uuid;

use crate::error::Result;
use crate::model::memo::{Memo, MemoDraft};
use crate::storage::MemoStorage;

pub struct MemoEngine {
    pub storage: Arc<dyn MemoStorage>,
}

impl MemoEngine {
    pub fn new(storage: Arc<dyn MemoStorage>) -> Self {
        Self { storage }
    }

    pub async fn create(&self, draft: MemoDraft) -> Result<Memo> {
        create::execute(self, draft).await
    }

    pub async fn update(&self, id: Uuid, draft: MemoDraft) -> Result<Memo> {
        update::execute(self, id, draft).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        delete::execute(self, id).await
    }

    pub async fn list(&self) -> Result<Vec<Memo>> {
        list::execute(self).await
    }

    pub async fn market_counts(&self) -> Result<counts::MarketCountsResponse> {
        counts::execute(self).await
    }
}

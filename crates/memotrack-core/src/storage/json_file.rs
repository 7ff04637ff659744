use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::model::memo::Memo;
use crate::storage::MemoStorage;

/// Whole-file JSON storage: the backing file holds one JSON array of memo
/// objects, rewritten in full on every mutation.
///
/// A single mutex is held across each load-mutate-save cycle so concurrent
/// requests cannot lose each other's writes. There is no cross-process
/// locking and no atomic rename; a crash mid-write can truncate the file.
pub struct JsonFileStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStorage {
    /// Open storage over `path`, creating the file as an empty array if it
    /// does not exist, and backfilling ids on any record missing one.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let storage = Self {
            path: path.into(),
            lock: Mutex::new(()),
        };
        storage.ensure_ids().await?;
        Ok(storage)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// One-time normalization pass over the raw JSON: any record without an
    /// `id` (or with a null one) gets a freshly generated identifier, and
    /// the file is persisted once if anything changed.
    ///
    /// This runs below the typed model on purpose: hand-edited files from
    /// before ids existed must not trip the corruption path.
    async fn ensure_ids(&self) -> Result<()> {
        let _guard = self.lock.lock().await;

        let bytes = match self.read_or_init().await? {
            Some(bytes) => bytes,
            None => return Ok(()),
        };

        let mut records: Vec<serde_json::Value> = match serde_json::from_slice(&bytes) {
            Ok(records) => records,
            Err(e) => {
                self.quarantine_corrupt(&e).await?;
                return Ok(());
            }
        };

        let mut assigned = 0usize;
        for record in records.iter_mut().filter_map(|v| v.as_object_mut()) {
            let missing = match record.get("id") {
                None => true,
                Some(v) => v.is_null(),
            };
            if missing {
                record.insert("id".to_string(), serde_json::json!(Uuid::now_v7()));
                assigned += 1;
            }
        }

        if assigned > 0 {
            tracing::info!(count = assigned, "assigned ids to legacy memo records");
            let bytes = serde_json::to_vec_pretty(&records)?;
            fs::write(&self.path, bytes).await?;
        }
        Ok(())
    }

    /// Read the raw file, creating it as `[]` when missing. `None` means
    /// the file was just created and there is nothing to parse.
    async fn read_or_init(&self) -> Result<Option<Vec<u8>>> {
        match fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                fs::write(&self.path, b"[]").await?;
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Move the unparsable file aside and reset to an empty collection.
    /// Availability wins over the broken data, but the original bytes are
    /// kept next to the file and the failure is logged for operators.
    async fn quarantine_corrupt(&self, cause: &serde_json::Error) -> Result<()> {
        let quarantine = self.path.with_extension("corrupt");
        tracing::error!(
            path = %self.path.display(),
            quarantined_to = %quarantine.display(),
            %cause,
            "memo data file is unparsable; resetting to an empty collection"
        );
        fs::rename(&self.path, &quarantine).await?;
        fs::write(&self.path, b"[]").await?;
        Ok(())
    }

    /// Callers must hold `self.lock`.
    async fn read_records(&self) -> Result<Vec<Memo>> {
        let bytes = match self.read_or_init().await? {
            Some(bytes) => bytes,
            None => return Ok(Vec::new()),
        };
        match serde_json::from_slice(&bytes) {
            Ok(records) => Ok(records),
            Err(e) => {
                self.quarantine_corrupt(&e).await?;
                Ok(Vec::new())
            }
        }
    }

    /// Callers must hold `self.lock`.
    async fn write_records(&self, records: &[Memo]) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(records)?;
        fs::write(&self.path, bytes).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl MemoStorage for JsonFileStorage {
    async fn list_memos(&self) -> Result<Vec<Memo>> {
        let _guard = self.lock.lock().await;
        self.read_records().await
    }

    async fn get_memo(&self, id: Uuid) -> Result<Option<Memo>> {
        let _guard = self.lock.lock().await;
        let records = self.read_records().await?;
        Ok(records.into_iter().find(|m| m.id == id))
    }

    async fn insert_memo(&self, memo: &Memo) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut records = self.read_records().await?;
        records.push(memo.clone());
        self.write_records(&records).await
    }

    async fn update_memo(&self, memo: &Memo) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut records = self.read_records().await?;
        let slot = records
            .iter_mut()
            .find(|m| m.id == memo.id)
            .ok_or_else(|| Error::NotFound(format!("memo {} not found", memo.id)))?;
        *slot = memo.clone();
        self.write_records(&records).await
    }

    async fn delete_memo(&self, id: Uuid) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut records = self.read_records().await?;
        let position = records
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| Error::NotFound(format!("memo {id} not found")))?;
        records.remove(position);
        self.write_records(&records).await
    }
}

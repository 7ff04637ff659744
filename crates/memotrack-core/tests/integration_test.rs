//! Integration test: full CREATE → LIST → UPDATE → DELETE lifecycle plus
//! the storage-level recovery behaviors, exercised against a real data file
//! in a temporary directory.

use std::path::Path;
use std::sync::Arc;

use uuid::Uuid;

use memotrack_core::error::Error;
use memotrack_core::model::market::Market;
use memotrack_core::model::memo::{Direction, MemoDraft};
use memotrack_core::query::MemoEngine;
use memotrack_core::storage::json_file::JsonFileStorage;

async fn create_engine(path: &Path) -> MemoEngine {
    let storage = Arc::new(JsonFileStorage::open(path).await.unwrap());
    MemoEngine::new(storage)
}

fn draft(title: &str, date: &str, time: &str, status: &str, market: &str) -> MemoDraft {
    MemoDraft {
        title: Some(title.to_string()),
        description: Some(format!("{title} description")),
        date: Some(date.to_string()),
        time: Some(time.to_string()),
        status: Some(status.to_string()),
        market: Some(market.to_string()),
        direction: Some("Incoming".to_string()),
    }
}

#[tokio::test]
async fn test_full_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    let engine = create_engine(&dir.path().join("memos.json")).await;

    // === CREATE ===
    let created = engine
        .create(draft(
            "Stall allocation",
            "2024-01-01",
            "09:00",
            "Pending",
            "Wuse Market",
        ))
        .await
        .expect("create should succeed");
    assert!(!created.id.is_nil());
    assert_eq!(created.market, Market::WuseMarket);
    assert_eq!(created.direction, Direction::Incoming);

    // === LIST ===
    let memos = engine.list().await.unwrap();
    assert_eq!(memos.len(), 1);
    assert_eq!(memos[0], created);

    // === UPDATE ===
    let mut revised = draft(
        "Stall allocation",
        "2024-01-01",
        "09:00",
        "Approved",
        "Wuse Market",
    );
    revised.direction = Some("Outgoing".to_string());
    let updated = engine.update(created.id, revised).await.unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.status, "Approved");
    assert_eq!(updated.direction, Direction::Outgoing);

    // === DELETE ===
    engine.delete(created.id).await.unwrap();
    assert!(engine.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_open_creates_empty_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("memos.json");
    let engine = create_engine(&path).await;

    assert!(engine.list().await.unwrap().is_empty());
    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content, "[]");
}

#[tokio::test]
async fn test_memos_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("memos.json");

    let engine = create_engine(&path).await;
    let created = engine
        .create(draft(
            "Revenue return",
            "2024-02-10",
            "14:00",
            "Pending",
            "Gudu Market",
        ))
        .await
        .unwrap();
    drop(engine);

    let reopened = create_engine(&path).await;
    let memos = reopened.list().await.unwrap();
    assert_eq!(memos.len(), 1);
    assert_eq!(memos[0], created);
}

#[tokio::test]
async fn test_corrupt_file_is_quarantined_and_reset() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("memos.json");
    std::fs::write(&path, "{ not json ]").unwrap();

    let engine = create_engine(&path).await;
    assert!(engine.list().await.unwrap().is_empty());

    // the broken bytes are kept aside and the file starts over empty
    let quarantined = std::fs::read_to_string(dir.path().join("memos.corrupt")).unwrap();
    assert_eq!(quarantined, "{ not json ]");
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
}

#[tokio::test]
async fn test_ensure_ids_backfills_missing_ids() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("memos.json");
    std::fs::write(
        &path,
        serde_json::json!([
            {
                "title": "No id yet",
                "description": "hand-edited record",
                "date": "2023-12-01",
                "time": "08:00",
                "status": "Approved",
                "market": "Head Office",
                "direction": "Outgoing"
            },
            {
                "id": "018f0000-0000-7000-8000-000000000001",
                "title": "Already has one",
                "description": "untouched",
                "date": "2023-12-02",
                "time": "08:30",
                "status": "Pending",
                "market": "Kaura Market",
                "direction": "Incoming"
            }
        ])
        .to_string(),
    )
    .unwrap();

    let engine = create_engine(&path).await;
    let memos = engine.list().await.unwrap();
    assert_eq!(memos.len(), 2);
    assert!(memos.iter().all(|m| !m.id.is_nil()));
    assert!(memos.iter().any(|m| {
        m.id == "018f0000-0000-7000-8000-000000000001".parse::<Uuid>().unwrap()
    }));

    // the backfill was persisted: reopening finds stable ids
    let ids: Vec<Uuid> = memos.iter().map(|m| m.id).collect();
    let reopened = create_engine(&path).await;
    let again: Vec<Uuid> = reopened.list().await.unwrap().iter().map(|m| m.id).collect();
    assert_eq!(ids.len(), again.len());
    for id in ids {
        assert!(again.contains(&id));
    }
}

#[tokio::test]
async fn test_list_sorts_descending_with_unparsable_last() {
    let dir = tempfile::tempdir().unwrap();
    let engine = create_engine(&dir.path().join("memos.json")).await;

    engine
        .create(draft("old", "2023-06-01", "10:00", "Pending", "Wuse Market"))
        .await
        .unwrap();
    engine
        .create(draft("newest", "2024-06-01", "10:00", "Pending", "Wuse Market"))
        .await
        .unwrap();
    engine
        .create(draft("undated", "whenever", "10:00", "Pending", "Wuse Market"))
        .await
        .unwrap();
    engine
        .create(draft("same day later", "2023-06-01", "17:45", "Pending", "Wuse Market"))
        .await
        .unwrap();

    let titles: Vec<String> = engine
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.title)
        .collect();
    assert_eq!(titles, ["newest", "same day later", "old", "undated"]);
}

#[tokio::test]
async fn test_validation_failure_leaves_collection_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let engine = create_engine(&dir.path().join("memos.json")).await;

    let mut missing_title = draft("x", "2024-01-01", "09:00", "Pending", "Wuse Market");
    missing_title.title = None;
    assert!(matches!(
        engine.create(missing_title).await,
        Err(Error::Validation(_))
    ));

    let bad_market = draft("x", "2024-01-01", "09:00", "Pending", "Nowhere Market");
    assert!(matches!(
        engine.create(bad_market).await,
        Err(Error::Validation(_))
    ));

    assert!(engine.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_and_delete_unknown_id() {
    let dir = tempfile::tempdir().unwrap();
    let engine = create_engine(&dir.path().join("memos.json")).await;

    let unknown = Uuid::now_v7();
    let result = engine
        .update(
            unknown,
            draft("x", "2024-01-01", "09:00", "Pending", "Wuse Market"),
        )
        .await;
    assert!(matches!(result, Err(Error::NotFound(_))));

    assert!(matches!(
        engine.delete(unknown).await,
        Err(Error::NotFound(_))
    ));
}

#[tokio::test]
async fn test_market_counts_cover_every_market() {
    let dir = tempfile::tempdir().unwrap();
    let engine = create_engine(&dir.path().join("memos.json")).await;

    engine
        .create(draft("a", "2024-01-01", "09:00", "Pending", "Wuse Market"))
        .await
        .unwrap();
    engine
        .create(draft("b", "2024-01-02", "09:00", "APPROVED", "Wuse Market"))
        .await
        .unwrap();
    engine
        .create(draft("c", "2024-01-03", "09:00", "In review", "Wuse Market"))
        .await
        .unwrap();
    engine
        .create(draft("d", "2024-01-04", "09:00", "pending", "Kado Fish Market"))
        .await
        .unwrap();

    let counts = engine.market_counts().await.unwrap();
    assert_eq!(counts.len(), 15);

    let wuse = counts[&Market::WuseMarket];
    assert_eq!(wuse.total, 3);
    assert_eq!(wuse.approved, 1);
    assert_eq!(wuse.pending, 1);

    let kado = counts[&Market::KadoFishMarket];
    assert_eq!(kado.total, 1);
    assert_eq!(kado.pending, 1);

    // untouched markets are present with zero tallies
    let gudu = counts[&Market::GuduMarket];
    assert_eq!(gudu.total, 0);
    assert_eq!(gudu.approved, 0);
    assert_eq!(gudu.pending, 0);
}

//! Journal Recovery Tests
//!
//! Tests for durability of the hotel journal:
//! - Acknowledged inserts survive a reopen, in order
//! - Rejected inserts never reach the journal
//! - A damaged line fails the open instead of being skipped

use std::fs;
use std::path::Path;

use hotel_api::model::NewHotel;
use hotel_api::store::journal::JOURNAL_FILE_NAME;
use hotel_api::store::{FilterExpr, FilterSet, FindQuery, HotelStore, MemoryHotelStore, StoreError};
use serde_json::json;
use tempfile::TempDir;

// =============================================================================
// Test Utilities
// =============================================================================

fn create_temp_data_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

async fn seed(data_dir: &Path) {
    let store = MemoryHotelStore::open(data_dir).unwrap();
    store
        .insert(NewHotel::new("Grand Inn", "Paris", 120.0, 40))
        .await
        .unwrap();
    store
        .insert(NewHotel::new("Villa Roma", "Rome", 80.0, 12))
        .await
        .unwrap();
}

fn journal_lines(data_dir: &Path) -> Vec<String> {
    fs::read_to_string(data_dir.join(JOURNAL_FILE_NAME))
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

// =============================================================================
// Reopen
// =============================================================================

/// Inserted hotels are visible after the store is reopened.
#[tokio::test]
async fn test_reopen_restores_hotels() {
    let tmp = create_temp_data_dir();
    seed(tmp.path()).await;

    let store = MemoryHotelStore::open(tmp.path()).unwrap();
    assert_eq!(store.len().unwrap(), 2);

    let hotels = store.find(&FindQuery::new(FilterSet::new())).await.unwrap();
    let names: Vec<&str> = hotels.iter().map(|h| h.name.as_str()).collect();
    assert_eq!(names, vec!["Grand Inn", "Villa Roma"]);

    let rome = store
        .find(&FindQuery::new(FilterSet::new().and(FilterExpr::eq("location", json!("Rome")))))
        .await
        .unwrap();
    assert_eq!(rome.len(), 1);
    assert_eq!(rome[0].rooms, 12);
}

/// Identifiers and timestamps come back exactly as written.
#[tokio::test]
async fn test_reopen_preserves_identity() {
    let tmp = create_temp_data_dir();

    let original = {
        let store = MemoryHotelStore::open(tmp.path()).unwrap();
        store
            .insert(NewHotel::new("Grand Inn", "Paris", 120.0, 40))
            .await
            .unwrap()
    };

    let store = MemoryHotelStore::open(tmp.path()).unwrap();
    let hotels = store.find(&FindQuery::new(FilterSet::new())).await.unwrap();
    assert_eq!(hotels, vec![original]);
}

/// Hotels appended after a reopen follow the replayed ones.
#[tokio::test]
async fn test_append_after_reopen() {
    let tmp = create_temp_data_dir();
    seed(tmp.path()).await;

    {
        let store = MemoryHotelStore::open(tmp.path()).unwrap();
        store
            .insert(NewHotel::new("Harbor View", "Oslo", 210.0, 20))
            .await
            .unwrap();
    }

    assert_eq!(journal_lines(tmp.path()).len(), 3);
    let store = MemoryHotelStore::open(tmp.path()).unwrap();
    assert_eq!(store.len().unwrap(), 3);
}

/// A hotel that fails validation is not journaled.
#[tokio::test]
async fn test_rejected_insert_not_journaled() {
    let tmp = create_temp_data_dir();
    seed(tmp.path()).await;

    let store = MemoryHotelStore::open(tmp.path()).unwrap();
    let err = store
        .insert(NewHotel::new("Grand Inn", "Paris", -1.0, 40))
        .await
        .unwrap_err();
    assert!(err.is_validation());

    assert_eq!(journal_lines(tmp.path()).len(), 2);
}

// =============================================================================
// Corruption
// =============================================================================

/// A tampered document fails the checksum and the open.
#[tokio::test]
async fn test_tampered_line_fails_open() {
    let tmp = create_temp_data_dir();
    seed(tmp.path()).await;

    let path = tmp.path().join(JOURNAL_FILE_NAME);
    let tampered = fs::read_to_string(&path)
        .unwrap()
        .replace("Villa Roma", "Villa Rama");
    fs::write(&path, tampered).unwrap();

    match MemoryHotelStore::open(tmp.path()) {
        Err(StoreError::Corruption { line, .. }) => assert_eq!(line, 2),
        other => panic!("expected corruption, got {:?}", other.map(|_| ())),
    }
}

/// A line that is not JSON fails the open.
#[tokio::test]
async fn test_garbage_line_fails_open() {
    let tmp = create_temp_data_dir();
    seed(tmp.path()).await;

    let path = tmp.path().join(JOURNAL_FILE_NAME);
    let mut lines = journal_lines(tmp.path());
    lines.insert(1, "{\"checksum\":1,".to_string());
    fs::write(&path, lines.join("\n") + "\n").unwrap();

    let result = MemoryHotelStore::open(tmp.path());
    assert!(matches!(result, Err(StoreError::Corruption { line: 2, .. })));
}

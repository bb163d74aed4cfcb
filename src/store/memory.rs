//! In-process hotel store
//!
//! Documents live in memory behind an `RwLock`. When opened on a data
//! directory, every insert is journaled and fsynced before it becomes
//! visible, and the journal is replayed on open.
//!
//! Journal appends run on the blocking thread pool under the journal mutex.
//! Readers only contend with the final push into the collection.

use std::path::Path;
use std::sync::{Arc, Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use uuid::Uuid;

use crate::model::{validate_hotel, Hotel, NewHotel};

use super::aggregate::run_pipeline;
use super::errors::{StoreError, StoreResult};
use super::journal::Journal;
use super::sorter::{compare_values, DocumentSorter};
use super::{FindQuery, HotelStore, Stage};

/// Hotel store holding documents in memory, optionally journaled to disk
pub struct MemoryHotelStore {
    documents: Arc<RwLock<Vec<Value>>>,
    journal: Option<Arc<Mutex<Journal>>>,
}

impl MemoryHotelStore {
    /// Creates an empty, non-durable store
    pub fn new() -> Self {
        Self {
            documents: Arc::new(RwLock::new(Vec::new())),
            journal: None,
        }
    }

    /// Opens a durable store backed by a journal in `data_dir`.
    ///
    /// # Errors
    ///
    /// Fails if the journal cannot be opened or any entry is corrupted.
    pub fn open(data_dir: &Path) -> StoreResult<Self> {
        let (journal, documents) = Journal::open(data_dir)?;

        tracing::info!(
            path = %journal.path().display(),
            hotels = documents.len(),
            "hotel journal replayed"
        );

        Ok(Self {
            documents: Arc::new(RwLock::new(documents)),
            journal: Some(Arc::new(Mutex::new(journal))),
        })
    }

    /// Number of stored hotels
    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Vec<Value>>> {
        self.documents.read().map_err(|_| poisoned())
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Vec<Value>>> {
        self.documents.write().map_err(|_| poisoned())
    }
}

impl Default for MemoryHotelStore {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned() -> StoreError {
    StoreError::Internal("Lock poisoned".to_string())
}

fn to_usize(n: u64) -> usize {
    usize::try_from(n).unwrap_or(usize::MAX)
}

/// Appends and publishes under the journal mutex, so replay order matches
/// collection order.
fn journaled_push(
    journal: &Mutex<Journal>,
    documents: &RwLock<Vec<Value>>,
    document: Value,
) -> StoreResult<()> {
    let mut journal = journal.lock().map_err(|_| poisoned())?;
    journal.append(&document)?;
    documents.write().map_err(|_| poisoned())?.push(document);
    Ok(())
}

#[async_trait]
impl HotelStore for MemoryHotelStore {
    async fn insert(&self, hotel: NewHotel) -> StoreResult<Hotel> {
        validate_hotel(&hotel)?;

        let hotel = Hotel::from_new(hotel, Uuid::new_v4(), Utc::now());
        let document = serde_json::to_value(&hotel)?;

        match &self.journal {
            Some(journal) => {
                let journal = Arc::clone(journal);
                let documents = Arc::clone(&self.documents);
                tokio::task::spawn_blocking(move || journaled_push(&journal, &documents, document))
                    .await
                    .map_err(|e| StoreError::Internal(format!("journal task failed: {}", e)))??;
            }
            None => self.write()?.push(document),
        }

        Ok(hotel)
    }

    async fn find(&self, query: &FindQuery) -> StoreResult<Vec<Hotel>> {
        let mut matched: Vec<Value> = self
            .read()?
            .iter()
            .filter(|doc| query.filter.matches(doc))
            .cloned()
            .collect();

        if let Some(sort) = &query.sort {
            DocumentSorter::sort(&mut matched, sort);
        }

        matched
            .into_iter()
            .skip(to_usize(query.skip))
            .take(to_usize(query.limit))
            .map(|doc| serde_json::from_value(doc).map_err(StoreError::from))
            .collect()
    }

    async fn aggregate(&self, stages: &[Stage]) -> StoreResult<Vec<Value>> {
        let documents = self.read()?.clone();
        Ok(run_pipeline(documents, stages))
    }

    async fn distinct(&self, field: &str) -> StoreResult<Vec<Value>> {
        let mut values: Vec<Value> = Vec::new();
        for value in self.read()?.iter().filter_map(|doc| doc.get(field)) {
            if !values.contains(value) {
                values.push(value.clone());
            }
        }

        values.sort_by(|a, b| compare_values(Some(a), Some(b)));
        Ok(values)
    }
}

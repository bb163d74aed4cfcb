//! # Hotel Store
//!
//! The persistence boundary for hotel documents.
//!
//! Handlers only see the `HotelStore` trait; the concrete store is injected
//! into the router state so tests can substitute their own.

pub mod aggregate;
pub mod errors;
pub mod filter;
pub mod journal;
pub mod memory;
pub mod sorter;

use async_trait::async_trait;
use serde_json::Value;

use crate::model::{Hotel, NewHotel};

pub use aggregate::{Accumulator, AccumulatorOp, GroupSpec, Stage};
pub use errors::{StoreError, StoreResult};
pub use filter::{FilterExpr, FilterOperator, FilterSet};
pub use memory::MemoryHotelStore;
pub use sorter::SortSpec;

/// A bounded query over the hotel collection
#[derive(Debug, Clone, PartialEq)]
pub struct FindQuery {
    pub filter: FilterSet,

    /// Ascending sort; insertion order when absent
    pub sort: Option<SortSpec>,

    /// Number of matching documents to skip
    pub skip: u64,

    /// Maximum number of documents to return
    pub limit: u64,
}

impl FindQuery {
    pub fn new(filter: FilterSet) -> Self {
        Self {
            filter,
            sort: None,
            skip: 0,
            limit: u64::MAX,
        }
    }

    pub fn sort(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn page(mut self, skip: u64, limit: u64) -> Self {
        self.skip = skip;
        self.limit = limit;
        self
    }
}

/// Operations the HTTP layer needs from a hotel store
#[async_trait]
pub trait HotelStore: Send + Sync + 'static {
    /// Validates and persists a new hotel, returning the stored record.
    async fn insert(&self, hotel: NewHotel) -> StoreResult<Hotel>;

    /// Returns one page of hotels matching the query.
    async fn find(&self, query: &FindQuery) -> StoreResult<Vec<Hotel>>;

    /// Runs an aggregation pipeline over every hotel document.
    async fn aggregate(&self, stages: &[Stage]) -> StoreResult<Vec<Value>>;

    /// Returns each distinct value of `field`; empty for unknown fields.
    async fn distinct(&self, field: &str) -> StoreResult<Vec<Value>>;
}

//! Storage seam for every collection.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::db::memory::InMemoryRepository;
use crate::db::models::{Argument, Debate, Market, Record, Reply};
use crate::db::seed;
use crate::error::Result;

/// Collection of records addressed by id.
///
/// Implementations must preserve insertion order in [`Repository::list`].
/// The trait stays object-safe so the service can hold `Arc<dyn Repository<T>>`.
pub trait Repository<T: Record>: Send + Sync {
    /// Every record, oldest first.
    fn list(&self) -> Vec<T>;

    fn get_by_id(&self, id: &str) -> Option<T>;

    /// Store a new record. Fails with `DuplicateId` if the id is taken.
    fn insert(&self, record: T) -> Result<T>;

    /// Mutate a record in place and return the updated copy.
    fn update(&self, id: &str, apply: &mut dyn FnMut(&mut T)) -> Option<T>;

    fn count(&self) -> usize {
        self.list().len()
    }
}

/// One repository per collection, shared by every route.
#[derive(Clone)]
pub struct Repositories {
    pub markets: Arc<dyn Repository<Market>>,
    pub debates: Arc<dyn Repository<Debate>>,
    pub arguments: Arc<dyn Repository<Argument>>,
    pub replies: Arc<dyn Repository<Reply>>,
}

impl Repositories {
    /// Empty in-memory collections.
    pub fn in_memory() -> Self {
        Self {
            markets: Arc::new(InMemoryRepository::<Market>::new()),
            debates: Arc::new(InMemoryRepository::<Debate>::new()),
            arguments: Arc::new(InMemoryRepository::<Argument>::new()),
            replies: Arc::new(InMemoryRepository::<Reply>::new()),
        }
    }

    /// In-memory collections pre-filled with the fixture data.
    pub fn seeded(now: DateTime<Utc>) -> Self {
        Self {
            markets: Arc::new(InMemoryRepository::with_rows(seed::markets())),
            debates: Arc::new(InMemoryRepository::with_rows(seed::debates(now))),
            arguments: Arc::new(InMemoryRepository::with_rows(seed::arguments(now))),
            replies: Arc::new(InMemoryRepository::with_rows(seed::replies(now))),
        }
    }
}

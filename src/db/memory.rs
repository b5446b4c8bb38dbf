//! Process-local repository backed by a vector plus an id index.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::db::models::Record;
use crate::db::repository::Repository;
use crate::error::{AppError, Result};

struct Inner<T> {
    rows: Vec<T>,
    index: HashMap<String, usize>,
}

/// In-memory repository. Contents vanish with the process.
pub struct InMemoryRepository<T> {
    inner: RwLock<Inner<T>>,
}

impl<T: Record> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                rows: Vec::new(),
                index: HashMap::new(),
            }),
        }
    }

    /// Build a repository pre-filled with `rows`. Later duplicates are dropped.
    pub fn with_rows(rows: impl IntoIterator<Item = T>) -> Self {
        let repo = Self::new();
        for row in rows {
            let _ = repo.insert(row);
        }
        repo
    }
}

impl<T: Record> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> Repository<T> for InMemoryRepository<T> {
    fn list(&self) -> Vec<T> {
        self.inner.read().rows.clone()
    }

    fn get_by_id(&self, id: &str) -> Option<T> {
        let inner = self.inner.read();
        inner.index.get(id).map(|&i| inner.rows[i].clone())
    }

    fn insert(&self, record: T) -> Result<T> {
        let mut inner = self.inner.write();
        if inner.index.contains_key(record.id()) {
            return Err(AppError::DuplicateId(record.id().to_string()));
        }
        let pos = inner.rows.len();
        inner.index.insert(record.id().to_string(), pos);
        inner.rows.push(record.clone());
        Ok(record)
    }

    fn update(&self, id: &str, apply: &mut dyn FnMut(&mut T)) -> Option<T> {
        let mut inner = self.inner.write();
        let pos = *inner.index.get(id)?;
        let row = &mut inner.rows[pos];
        apply(row);
        Some(row.clone())
    }

    fn count(&self) -> usize {
        self.inner.read().rows.len()
    }
}

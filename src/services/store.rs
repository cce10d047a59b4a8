use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};

use crate::errors::store::{StoreError, StoreResult};
use crate::services::clock::{Clock, SystemClock};

pub trait Record: Clone + Send + Sync + 'static {
    type Draft: Send;
    type Change: Send;

    // Used in "not found" messages
    const KIND: &'static str;

    fn id(&self) -> u64;

    fn build(id: u64, created_at: DateTime<Utc>, draft: Self::Draft) -> Self;

    // Some(message) if `draft` may not coexist with `self`
    fn conflict(&self, _draft: &Self::Draft) -> Option<String> {
        None
    }

    fn apply(&mut self, change: Self::Change);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: usize,
    pub limit: usize,
}

pub trait Store<T: Record>: Send + Sync {
    fn create(&self, draft: T::Draft) -> StoreResult<T>;

    // Filter first, then window. An offset past the end is just empty.
    fn list(&self, filter: &dyn Fn(&T) -> bool, page: Page) -> Vec<T>;

    fn get(&self, id: u64) -> StoreResult<T>;

    fn update(&self, id: u64, change: T::Change) -> StoreResult<T>;

    fn delete(&self, id: u64) -> StoreResult<()>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub struct MemoryStore<T> {
    records: Mutex<Vec<T>>,
    next_id: AtomicU64, // starts at 1, never reused
    clock: Arc<dyn Clock>,
}

impl<T: Record> MemoryStore<T> {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
            clock,
        }
    }

    fn records(&self) -> MutexGuard<'_, Vec<T>> {
        // A panic while holding the lock cannot leave a half-written record.
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn not_found(id: u64) -> StoreError {
        StoreError::NotFound { kind: T::KIND, id }
    }
}

impl<T: Record> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> Store<T> for MemoryStore<T> {
    fn create(&self, draft: T::Draft) -> StoreResult<T> {
        let mut records = self.records();

        if let Some(message) = records.iter().find_map(|r| r.conflict(&draft)) {
            return Err(StoreError::Conflict(message));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let record = T::build(id, self.clock.now(), draft);
        records.push(record.clone());
        Ok(record)
    }

    fn list(&self, filter: &dyn Fn(&T) -> bool, page: Page) -> Vec<T> {
        self.records()
            .iter()
            .filter(|r| filter(r))
            .skip(page.skip)
            .take(page.limit)
            .cloned()
            .collect()
    }

    fn get(&self, id: u64) -> StoreResult<T> {
        self.records()
            .iter()
            .find(|r| r.id() == id)
            .cloned()
            .ok_or_else(|| Self::not_found(id))
    }

    fn update(&self, id: u64, change: T::Change) -> StoreResult<T> {
        let mut records = self.records();
        let record = records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| Self::not_found(id))?;
        record.apply(change);
        Ok(record.clone())
    }

    fn delete(&self, id: u64) -> StoreResult<()> {
        let mut records = self.records();
        let index = records
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| Self::not_found(id))?;
        records.remove(index);
        Ok(())
    }

    fn len(&self) -> usize {
        self.records().len()
    }
}

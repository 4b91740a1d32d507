//! In-memory counter store for testing and development.
//!
//! Each key lives in its own `DashMap` shard entry, so increments on one key
//! are serialized by the shard lock the same way row locks serialize them in
//! Postgres. Failures can be injected to exercise the allocator's error paths.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use dashmap::{mapref::entry::Entry, DashMap};
use eni_id::CounterKey;
use tracing::debug;

use super::{CounterStore, CreateOutcome, DbError};

/// Failure mode of a `MemoryCounterStore`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MemoryFault {
    /// Behave like a healthy database.
    #[default]
    None,
    /// Every operation fails as if the pool were exhausted.
    Unavailable,
    /// Increments never find a row while creates always report a conflict.
    PhantomRow,
}

/// Mock counter store.
#[derive(Debug, Default)]
pub struct MemoryCounterStore {
    counters: DashMap<CounterKey, i64>,
    fault: MemoryFault,
    calls: AtomicUsize,
    creations: AtomicUsize,
}

impl MemoryCounterStore {
    /// Create an empty, healthy store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with an injected failure mode.
    pub fn with_fault(fault: MemoryFault) -> Self {
        Self {
            fault,
            ..Self::default()
        }
    }

    /// Number of counter operations received (increments, creates, schema).
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of creates that inserted a row.
    pub fn creations(&self) -> usize {
        self.creations.load(Ordering::SeqCst)
    }

    /// Current index for `key`, if the row exists.
    pub fn current(&self, key: &CounterKey) -> Option<i64> {
        self.counters.get(key).map(|v| *v)
    }

    fn check_available(&self) -> Result<(), DbError> {
        if self.fault == MemoryFault::Unavailable {
            return Err(DbError::Query(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl CounterStore for MemoryCounterStore {
    async fn ensure_schema(&self) -> Result<(), DbError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()
    }

    async fn try_increment(&self, key: &CounterKey) -> Result<Option<i64>, DbError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;

        if self.fault == MemoryFault::PhantomRow {
            return Ok(None);
        }

        Ok(self.counters.get_mut(key).map(|mut index| {
            *index += 1;
            *index
        }))
    }

    async fn try_create(&self, key: &CounterKey) -> Result<CreateOutcome, DbError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;

        if self.fault == MemoryFault::PhantomRow {
            return Ok(CreateOutcome::AlreadyExists);
        }

        match self.counters.entry(key.clone()) {
            Entry::Occupied(_) => Ok(CreateOutcome::AlreadyExists),
            Entry::Vacant(slot) => {
                slot.insert(0);
                self.creations.fetch_add(1, Ordering::SeqCst);
                debug!(%key, "[MOCK] Counter created");
                Ok(CreateOutcome::Created)
            }
        }
    }

    async fn health_check(&self) -> Result<(), DbError> {
        self.check_available()
    }
}

//! Identifier allocation.
//!
//! The allocator turns a counter key into the next index for that key,
//! creating the counter row the first time the key is seen:
//!
//! 1. Increment the row. If it exists and the new value is positive, done.
//! 2. If the increment found no row, insert it at 0 and go back to 1.
//!    Losing the insert race to another request is fine; the row exists.
//!
//! A freshly inserted row holds 0, which is never handed out, so the first
//! allocation for any key is 1. Concurrent first-use requests are arbitrated
//! by the table's primary key rather than by any in-process lock.

use std::sync::Arc;

use eni_id::{Allocation, CounterKey};
use thiserror::Error;
use tracing::debug;

use crate::db::{CounterStore, CreateOutcome, DbError};

/// Default increment attempts per allocation.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 16;

/// Fewest attempts that still lets a brand-new key succeed
/// (miss and create, then increment), with one spare for a lost race.
pub const MIN_ATTEMPTS: u32 = 3;

/// Allocation errors. All of them are fatal to the current request.
#[derive(Debug, Error)]
pub enum AllocError {
    /// The counter store failed.
    #[error(transparent)]
    Store(#[from] DbError),

    /// The counter holds a value no allocation can come from.
    #[error("counter {key} holds negative index {value}")]
    NegativeCounter { key: CounterKey, value: i64 },

    /// The increment never produced an allocation.
    #[error("counter {key} yielded no allocation after {attempts} attempts")]
    RetriesExhausted { key: CounterKey, attempts: u32 },
}

/// Allocates indices from a shared counter store.
#[derive(Clone)]
pub struct Allocator {
    store: Arc<dyn CounterStore>,
    max_attempts: u32,
}

impl Allocator {
    /// Create an allocator with the default attempt budget.
    pub fn new(store: Arc<dyn CounterStore>) -> Self {
        Self {
            store,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Override the attempt budget. Values below `MIN_ATTEMPTS` are raised.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(MIN_ATTEMPTS);
        self
    }

    /// Attempt budget in effect.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// The underlying counter store.
    pub fn store(&self) -> &Arc<dyn CounterStore> {
        &self.store
    }

    /// Allocate the next index for `key`.
    pub async fn allocate(&self, key: &CounterKey) -> Result<Allocation, AllocError> {
        for attempt in 1..=self.max_attempts {
            match self.store.try_increment(key).await? {
                Some(value) => {
                    let value = u64::try_from(value).map_err(|_| AllocError::NegativeCounter {
                        key: key.clone(),
                        value,
                    })?;
                    if let Some(allocation) = Allocation::new(value) {
                        return Ok(allocation);
                    }
                    debug!(%key, attempt, "Counter still at initial value, incrementing again");
                }
                None => match self.store.try_create(key).await? {
                    CreateOutcome::Created => {
                        debug!(%key, attempt, "Counter created");
                    }
                    CreateOutcome::AlreadyExists => {
                        debug!(%key, attempt, "Counter created by a concurrent request");
                    }
                },
            }
        }

        Err(AllocError::RetriesExhausted {
            key: key.clone(),
            attempts: self.max_attempts,
        })
    }
}

//! Application state shared across request handlers.

use std::sync::Arc;

use crate::allocator::Allocator;

/// Shared application state.
///
/// This is passed to all request handlers via Axum's state extractor.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    allocator: Allocator,
}

impl AppState {
    /// Create a new application state.
    pub fn new(allocator: Allocator) -> Self {
        Self {
            inner: Arc::new(AppStateInner { allocator }),
        }
    }

    /// Get a reference to the allocator.
    pub fn allocator(&self) -> &Allocator {
        &self.inner.allocator
    }
}

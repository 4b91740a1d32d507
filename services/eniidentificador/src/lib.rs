//! ENI identifier service library.
//!
//! This crate primarily ships the `eniidentificador` binary, but we expose a
//! library surface to enable integration testing and reuse of the allocator.

pub mod allocator;
pub mod api;
pub mod config;
pub mod db;
pub mod state;

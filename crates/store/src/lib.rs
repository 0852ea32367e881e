//! Models and stores for the operations-metrics aggregator.
//!
//! Persistence goes through the [`backend::KvBackend`] seam: the service
//! assumes an abstract key-value configuration store and ships an in-memory
//! implementation for tests plus a JSON-file implementation for
//! single-process deployments.

pub mod backend;
pub mod cache;
pub mod directory;
pub mod models;
pub mod repositories;
pub mod rollup;

//! Cache backend implementations.
//!
//! Concrete implementations of the cache trait defined in
//! `eventdesk_core::cache`. Each process holds its own store: there is no
//! cross-instance invalidation, so other instances may serve data up to one
//! TTL old.

pub mod memory;

pub use memory::{CacheSweeper, MemoryCache, DEFAULT_SWEEP_INTERVAL};

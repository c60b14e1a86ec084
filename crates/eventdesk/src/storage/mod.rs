//! Storage backend implementations.
//!
//! - [`inmemory`]: the document store used for local runs and tests.
//! - [`cached`]: the cache-aside layer every domain service reads and writes
//!   through.

pub mod cached;
pub mod inmemory;

pub use cached::{CacheAside, CacheStats};
pub use inmemory::InMemoryDocumentStore;

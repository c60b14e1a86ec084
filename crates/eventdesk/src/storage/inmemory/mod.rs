//! In-memory document store.
//!
//! Holds every collection in HashMaps wrapped in `Arc<RwLock<_>>`. Data is
//! lost when the process exits. Used as the default backend for local runs
//! and as the database in tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use eventdesk::storage::inmemory::InMemoryDocumentStore;
//!
//! let store = InMemoryDocumentStore::new();
//! store.set_offline(true); // tests only: every call now fails with `Unavailable`
//! ```

mod store;

pub use store::InMemoryDocumentStore;

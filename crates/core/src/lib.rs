//! Core types and traits for eventdesk.
//!
//! Pure data and trait definitions with no I/O: the cache contract, the
//! document-store contract, and the portal domain model. Concrete backends live
//! in the `eventdesk` server crate.

pub mod cache;
pub mod portal;
pub mod storage;

//! Cache-aside layer.
//!
//! [`CacheAside`] wraps any [`Loader`](eventdesk_core::storage::Loader) with
//! read-through caching for items and collections and keeps both consistent
//! across create, update and delete.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let cache = Arc::new(MemoryCache::new(10_000));
//! let aside = CacheAside::new(cache);
//!
//! let scope = CacheScope::new(ARTICLES_KEY, ARTICLE_PREFIX, Duration::from_secs(300));
//! let article = aside.get_item(&scope, "42", &articles).await?;
//! ```

mod aside;
mod locks;

pub use aside::{CacheAside, CacheStats};

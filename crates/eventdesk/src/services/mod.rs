//! Domain services.
//!
//! Each service pairs a typed view of one document collection with the shared
//! [`CacheAside`](crate::storage::CacheAside) orchestrator and the TTL of its
//! entity kind. Handlers only ever talk to these.

mod activities;
mod articles;
mod events;
mod users;

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

pub use activities::ActivityService;
pub use articles::ArticleService;
pub use events::EventService;
pub use users::UserService;

/// Orders two timestamps newest-first.
fn newest_first(a: &DateTime<Utc>, b: &DateTime<Utc>) -> Ordering {
    b.cmp(a)
}

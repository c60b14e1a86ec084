mod error;
mod keys;
mod serialization;
mod traits;
mod ttl;

pub use error::{CacheError, Result};
pub use keys::{
    activities_key, item_key, CacheScope, ACTIVITY_PREFIX, ARTICLES_KEY, ARTICLE_PREFIX,
    EVENTS_KEY, EVENT_PREFIX, USERS_KEY, USER_PREFIX,
};
pub use serialization::{deserialize, serialize, SerializationError};
pub use traits::{Cache, Identifiable};
pub use ttl::{EntityKind, TtlRegistry};

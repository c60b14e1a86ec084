use std::time::Duration;

/// Collection key for all articles.
pub const ARTICLES_KEY: &str = "articles";

/// Collection key for all events.
pub const EVENTS_KEY: &str = "events";

/// Collection key for user profiles. The API never lists users, so this
/// entry normally stays absent.
pub const USERS_KEY: &str = "users";

/// Item key prefix for articles (`articles-<id>`).
pub const ARTICLE_PREFIX: &str = "articles";

/// Item key prefix for events (`events-<id>`).
pub const EVENT_PREFIX: &str = "events";

/// Item key prefix for activities (`activities-<id>`).
pub const ACTIVITY_PREFIX: &str = "activities";

/// Item key prefix for user profiles (`users-<id>`).
pub const USER_PREFIX: &str = "users";

/// Returns the cache key for a single item: `"<prefix>-<id>"`.
pub fn item_key(prefix: &str, id: &str) -> String {
    format!("{}-{}", prefix, id)
}

/// Returns the collection key for the activities of one event.
pub fn activities_key(event_id: &str) -> String {
    format!("activities_{}", event_id)
}

/// Where one entity kind lives in the cache: its collection key, the prefix
/// of its item keys, and the TTL applied to both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheScope {
    pub collection_key: String,
    pub item_prefix: &'static str,
    pub ttl: Duration,
}

impl CacheScope {
    pub fn new(
        collection_key: impl Into<String>,
        item_prefix: &'static str,
        ttl: Duration,
    ) -> Self {
        Self {
            collection_key: collection_key.into(),
            item_prefix,
            ttl,
        }
    }

    /// Item key for `id` within this scope.
    pub fn item_key(&self, id: &str) -> String {
        item_key(self.item_prefix, id)
    }
}

//! Time-to-live registry.
//!
//! Maps each entity kind to the expiration used for both its item keys and its
//! collection key. Pure configuration: the orchestrator only ever sees the
//! resulting [`Duration`].

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

/// Logical category of a cached domain object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Articles,
    Events,
    /// High churn: activity lists change during a live event.
    Activities,
    /// Low churn user data.
    Users,
}

impl EntityKind {
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Articles,
        EntityKind::Events,
        EntityKind::Activities,
        EntityKind::Users,
    ];

    /// Built-in TTL for this kind, in seconds.
    pub fn default_ttl_seconds(self) -> u64 {
        match self {
            EntityKind::Articles => 300,
            EntityKind::Events => 300,
            EntityKind::Activities => 60,
            EntityKind::Users => 1800,
        }
    }

    /// Lowercase name, used for env var suffixes and log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Articles => "articles",
            EntityKind::Events => "events",
            EntityKind::Activities => "activities",
            EntityKind::Users => "users",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entity kind → TTL lookup with optional per-kind overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TtlRegistry {
    overrides: HashMap<EntityKind, Duration>,
}

impl TtlRegistry {
    /// Replaces the TTL for `kind`.
    pub fn with_override(mut self, kind: EntityKind, ttl: Duration) -> Self {
        self.overrides.insert(kind, ttl);
        self
    }

    /// Returns the TTL for `kind`.
    pub fn ttl(&self, kind: EntityKind) -> Duration {
        self.overrides
            .get(&kind)
            .copied()
            .unwrap_or_else(|| Duration::from_secs(kind.default_ttl_seconds()))
    }
}

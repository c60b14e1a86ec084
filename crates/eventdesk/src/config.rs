use std::{env, time::Duration};

use eventdesk_core::cache::{EntityKind, TtlRegistry};

use crate::cache::DEFAULT_SWEEP_INTERVAL;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of cache entries (default: 10,000)
    pub cache_max_entries: usize,
    /// Seconds between sweeps of expired cache entries (default: 120)
    pub sweep_interval_seconds: u64,
    /// Per-kind cache TTLs
    pub ttl: TtlRegistry,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CACHE_MAX_ENTRIES` - Maximum cache entries (default: 10,000)
    /// - `CACHE_SWEEP_INTERVAL_SECONDS` - Sweep interval (default: 120)
    /// - `CACHE_TTL_ARTICLES_SECONDS` - Articles TTL (default: 300)
    /// - `CACHE_TTL_EVENTS_SECONDS` - Events TTL (default: 300)
    /// - `CACHE_TTL_ACTIVITIES_SECONDS` - Activities TTL (default: 60)
    /// - `CACHE_TTL_USERS_SECONDS` - User profiles TTL (default: 1800)
    ///
    /// Unparseable values fall back to the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let parse = |name: &str| lookup(name).and_then(|v| v.trim().parse::<u64>().ok());

        let ttl = EntityKind::ALL
            .into_iter()
            .fold(TtlRegistry::default(), |registry, kind| {
                let name = format!("CACHE_TTL_{}_SECONDS", kind.as_str().to_uppercase());
                match parse(&name) {
                    Some(seconds) => registry.with_override(kind, Duration::from_secs(seconds)),
                    None => registry,
                }
            });

        Self {
            cache_max_entries: parse("CACHE_MAX_ENTRIES")
                .and_then(|v| usize::try_from(v).ok())
                .filter(|v| *v > 0)
                .unwrap_or(10_000),
            sweep_interval_seconds: parse("CACHE_SWEEP_INTERVAL_SECONDS")
                .unwrap_or(DEFAULT_SWEEP_INTERVAL.as_secs()),
            ttl,
        }
    }

    /// Get the sweep interval as a Duration.
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

//! Retention policy: how long cached entries stay valid after being written.

use std::sync::OnceLock;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Sentinel retention value meaning entries never expire.
pub const INFINITE_RETENTION: i64 = -1;

/// Lazily parsed cache retention setting, resolved at most once.
///
/// The raw value comes straight from configuration; parsing (and the warning
/// for a missing or invalid value) runs on first use only, even under
/// concurrent first access.
#[derive(Debug, Default)]
pub struct RetentionPolicy {
    raw: Option<String>,
    seconds: OnceLock<i64>,
}

impl RetentionPolicy {
    pub fn new(raw: Option<String>) -> Self {
        Self {
            raw,
            seconds: OnceLock::new(),
        }
    }

    /// Retention in seconds, or [`INFINITE_RETENTION`].
    pub fn seconds(&self) -> i64 {
        *self
            .seconds
            .get_or_init(|| parse_retention(self.raw.as_deref()))
    }

    /// Whether an entry written at `written_at` has outlived the retention window.
    ///
    /// A retention of zero expires entries on the very next read.
    pub fn is_expired(&self, written_at: Instant) -> bool {
        let seconds = self.seconds();
        seconds != INFINITE_RETENTION
            && written_at.elapsed() > Duration::from_secs(seconds as u64)
    }
}

fn parse_retention(raw: Option<&str>) -> i64 {
    let Some(raw) = raw else {
        warn!("CACHE_RETENTION_SECONDS not configured, defaulting to infinite retention");
        return INFINITE_RETENTION;
    };
    match raw.trim().parse::<i64>() {
        Ok(INFINITE_RETENTION) => {
            info!("cache retention set to infinity");
            INFINITE_RETENTION
        }
        Ok(seconds) if seconds >= 0 => {
            info!(seconds, "cache retention loaded from config");
            seconds
        }
        _ => {
            warn!(
                value = raw,
                "invalid CACHE_RETENTION_SECONDS (expected an integer >= -1), defaulting to infinite retention"
            );
            INFINITE_RETENTION
        }
    }
}

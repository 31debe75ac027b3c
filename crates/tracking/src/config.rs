use std::env;
use std::str::FromStr;
use std::time::Duration;

use model::live::OFFLINE_AFTER_SECONDS;
use serde::{Deserialize, Serialize};

pub const TOTAL_DURATION_MS: u64 = 10_000;
pub const DEFAULT_MODE: &str = "car";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrackingConfig {
    /// Time a whole batch takes to replay, whatever its length.
    pub total_duration_ms: u64,
    pub offline_after_seconds: i64,
    /// Vehicle mode passed through to the marker.
    pub mode: String,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            total_duration_ms: TOTAL_DURATION_MS,
            offline_after_seconds: OFFLINE_AFTER_SECONDS,
            mode: DEFAULT_MODE.to_owned(),
        }
    }
}

impl TrackingConfig {
    /// Reads `TRACKING_TOTAL_DURATION_MS`, `TRACKING_OFFLINE_AFTER_SECONDS` and
    /// `TRACKING_MODE`, keeping the default for anything unset or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            total_duration_ms: var_or("TRACKING_TOTAL_DURATION_MS", defaults.total_duration_ms),
            offline_after_seconds: var_or(
                "TRACKING_OFFLINE_AFTER_SECONDS",
                defaults.offline_after_seconds,
            ),
            mode: env::var("TRACKING_MODE").unwrap_or(defaults.mode),
        }
    }

    pub fn total_duration(&self) -> Duration {
        Duration::from_millis(self.total_duration_ms)
    }
}

fn var_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

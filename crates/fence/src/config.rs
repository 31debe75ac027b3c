use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const MINIMUM_RADIUS_METERS: f64 = 25.0;
pub const BUFFER_STEPS: u32 = 8;
pub const MAX_BUFFER_STEPS: u32 = 64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FenceConfig {
    /// Smallest radius (or route corridor width) a fence may have.
    pub minimum_radius_meters: f64,
    /// Segments per quarter circle used to round buffered route corners.
    pub buffer_steps: u32,
}

impl Default for FenceConfig {
    fn default() -> Self {
        Self {
            minimum_radius_meters: MINIMUM_RADIUS_METERS,
            buffer_steps: BUFFER_STEPS,
        }
    }
}

impl FenceConfig {
    /// Reads `FENCE_MIN_RADIUS_METERS` and `FENCE_BUFFER_STEPS`, keeping the
    /// default for anything unset or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            minimum_radius_meters: var_or(
                "FENCE_MIN_RADIUS_METERS",
                defaults.minimum_radius_meters,
            ),
            buffer_steps: var_or("FENCE_BUFFER_STEPS", defaults.buffer_steps)
                .clamp(1, MAX_BUFFER_STEPS),
        }
    }
}

fn var_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{location::LatLng, ExampleData};

/// Samples older than this are shown as offline.
pub const OFFLINE_AFTER_SECONDS: i64 = 30 * 60;

/// One position as delivered by the live subscription, before validation.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RawLiveTrackSample {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    #[serde(alias = "timestampSeconds")]
    pub timestamp: Option<i64>,
    pub speed: Option<f64>,
    pub halt_status: Option<bool>,
    pub idling_status: Option<bool>,
    pub is_no_gps: Option<bool>,
    pub is_overspeed: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LiveTrackSample {
    pub lat: f64,
    pub lng: f64,
    pub timestamp_seconds: i64,
    pub speed: f64,
    pub halt_status: bool,
    pub idling_status: Option<bool>,
    pub is_no_gps: bool,
    pub is_overspeed: bool,
}

impl LiveTrackSample {
    pub fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }

    /// Marker status of this sample as seen at `now_unix_seconds`. Rules are
    /// checked in order and the first match wins.
    pub fn status_at(
        &self,
        now_unix_seconds: i64,
        offline_after_seconds: i64,
    ) -> AnimationStatus {
        if now_unix_seconds - self.timestamp_seconds > offline_after_seconds {
            AnimationStatus::Offline
        } else if self.is_no_gps {
            AnimationStatus::NoGps
        } else if self.halt_status {
            AnimationStatus::Halt
        } else {
            match self.idling_status {
                Some(true) => AnimationStatus::Idle,
                // halt_status is known to be false here
                Some(false) => AnimationStatus::Running,
                None => AnimationStatus::Default,
            }
        }
    }
}

impl ExampleData for LiveTrackSample {
    fn example_data() -> Self {
        LiveTrackSample {
            lat: 12.97,
            lng: 77.64,
            timestamp_seconds: 1_700_000_000,
            speed: 32.0,
            halt_status: false,
            idling_status: Some(false),
            is_no_gps: false,
            is_overspeed: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum AnimationStatus {
    Offline,
    NoGps,
    Halt,
    Idle,
    Running,
    Default,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarkerAttributes {
    pub status: AnimationStatus,
    pub mode: String,
    pub is_overspeed: bool,
    pub timestamp: i64,
    pub speed: f64,
}

/// Call made on the map marker for every presented sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarkerUpdate {
    pub position: LatLng,
    pub attributes: MarkerAttributes,
    pub transition_duration_ms: f64,
}

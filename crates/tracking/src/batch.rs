use model::live::{LiveTrackSample, RawLiveTrackSample};

use crate::{Result, TrackingError};

/// Ordered samples replayed in one playback cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LiveTrackBatch {
    samples: Vec<LiveTrackSample>,
}

impl LiveTrackBatch {
    /// Validates already typed samples; coordinates must be finite.
    pub fn new(samples: Vec<LiveTrackSample>) -> Result<Self> {
        if let Some(index) = samples
            .iter()
            .position(|sample| !sample.lat.is_finite() || !sample.lng.is_finite())
        {
            return Err(TrackingError::InvalidSample {
                index,
                reason: "coordinates are not finite",
            });
        }
        Ok(Self { samples })
    }

    /// Builds a batch from subscription data. A single unusable sample rejects
    /// the whole batch. Missing flags default to `false`, a missing speed to 0.
    pub fn from_raw(raw: Vec<RawLiveTrackSample>) -> Result<Self> {
        let samples = raw
            .into_iter()
            .enumerate()
            .map(|(index, raw)| -> Result<LiveTrackSample> {
                let invalid = |reason| TrackingError::InvalidSample { index, reason };
                Ok(LiveTrackSample {
                    lat: raw.lat.ok_or_else(|| invalid("latitude missing"))?,
                    lng: raw.lng.ok_or_else(|| invalid("longitude missing"))?,
                    timestamp_seconds: raw.timestamp.ok_or_else(|| invalid("timestamp missing"))?,
                    speed: raw.speed.unwrap_or(0.0),
                    halt_status: raw.halt_status.unwrap_or(false),
                    idling_status: raw.idling_status,
                    is_no_gps: raw.is_no_gps.unwrap_or(false),
                    is_overspeed: raw.is_overspeed.unwrap_or(false),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(samples)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&LiveTrackSample> {
        self.samples.get(index)
    }

    pub fn samples(&self) -> &[LiveTrackSample] {
        &self.samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(lat: Option<f64>) -> RawLiveTrackSample {
        RawLiveTrackSample {
            lat,
            lng: Some(77.6),
            timestamp: Some(1_700_000_000),
            ..Default::default()
        }
    }

    #[test]
    fn complete_samples_are_accepted() {
        let batch = LiveTrackBatch::from_raw(vec![raw(Some(12.9)), raw(Some(12.91))]).unwrap();
        assert_eq!(batch.len(), 2);
        let first = batch.get(0).unwrap();
        assert!(!first.halt_status);
        assert_eq!(first.idling_status, None);
        assert_eq!(first.speed, 0.0);
    }

    #[test]
    fn one_missing_latitude_rejects_the_batch() {
        let result = LiveTrackBatch::from_raw(vec![raw(Some(12.9)), raw(None), raw(Some(12.92))]);
        assert_eq!(
            result,
            Err(TrackingError::InvalidSample {
                index: 1,
                reason: "latitude missing"
            })
        );
    }

    #[test]
    fn missing_timestamp_rejects_the_batch() {
        let mut sample = raw(Some(12.9));
        sample.timestamp = None;
        assert!(matches!(
            LiveTrackBatch::from_raw(vec![sample]),
            Err(TrackingError::InvalidSample { index: 0, .. })
        ));
    }

    #[test]
    fn non_finite_coordinates_reject_the_batch() {
        assert!(LiveTrackBatch::from_raw(vec![raw(Some(f64::NAN))]).is_err());
    }
}

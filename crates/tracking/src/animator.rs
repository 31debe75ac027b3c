//! Playback state machine for one live tracking session.
//!
//! The animator only decides what to show and when to show the next sample;
//! waiting is left to the caller (see [`crate::tracker`]). A new batch always
//! replaces the one being played, batches are never queued.

use std::time::Duration;

use model::live::{MarkerAttributes, MarkerUpdate};
use serde::Serialize;

use crate::{batch::LiveTrackBatch, TrackingConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "state")]
pub enum PlaybackState {
    Idle,
    #[serde(rename_all = "camelCase")]
    Playing {
        /// Sample currently on the marker, `None` before the first tick.
        displayed_index: Option<usize>,
        len: usize,
    },
}

/// Result of presenting one sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub index: usize,
    pub update: MarkerUpdate,
    /// Delay until the next tick, `None` when this was the last sample.
    pub next_in: Option<Duration>,
}

pub struct Animator {
    config: TrackingConfig,
    batch: Option<LiveTrackBatch>,
    next_index: usize,
}

impl Animator {
    pub fn new(config: TrackingConfig) -> Self {
        Self {
            config,
            batch: None,
            next_index: 0,
        }
    }

    /// Starts playing `batch` from its first sample. Returns `true` if a
    /// playback in progress was dropped for it. An empty batch leaves the
    /// animator idle.
    pub fn load_batch(&mut self, batch: LiveTrackBatch) -> bool {
        let superseded = self.is_playing();
        self.reset();
        if !batch.is_empty() {
            log::debug!(
                "playing {} samples, one every {:?}",
                batch.len(),
                interval(self.config.total_duration(), batch.len())
            );
            self.batch = Some(batch);
        }
        superseded
    }

    /// Presents the next sample. Does nothing without a batch. After the last
    /// sample the animator resets itself to idle.
    pub fn tick(&mut self, now_unix_seconds: i64) -> Option<Frame> {
        let batch = self.batch.as_ref()?;
        let index = self.next_index;
        let sample = batch.get(index)?;
        let step = interval(self.config.total_duration(), batch.len());

        let update = MarkerUpdate {
            position: sample.position(),
            attributes: MarkerAttributes {
                status: sample.status_at(now_unix_seconds, self.config.offline_after_seconds),
                mode: self.config.mode.clone(),
                is_overspeed: sample.is_overspeed,
                timestamp: sample.timestamp_seconds,
                speed: sample.speed,
            },
            transition_duration_ms: step.as_secs_f64() * 1000.0,
        };

        let next_in = if index + 1 < batch.len() {
            self.next_index += 1;
            Some(step)
        } else {
            log::debug!("playback finished after {} samples", batch.len());
            self.reset();
            None
        };

        Some(Frame {
            index,
            update,
            next_in,
        })
    }

    /// Drops the current batch, if any.
    pub fn cancel(&mut self) {
        if self.is_playing() {
            log::debug!("playback cancelled at sample {}", self.next_index);
        }
        self.reset();
    }

    pub fn is_playing(&self) -> bool {
        self.batch.is_some()
    }

    pub fn state(&self) -> PlaybackState {
        match &self.batch {
            None => PlaybackState::Idle,
            Some(batch) => PlaybackState::Playing {
                displayed_index: self.next_index.checked_sub(1),
                len: batch.len(),
            },
        }
    }

    fn reset(&mut self) {
        self.batch = None;
        self.next_index = 0;
    }
}

/// Spacing between samples so that `len` samples fill `total`.
pub fn interval(total: Duration, len: usize) -> Duration {
    match u32::try_from(len) {
        Ok(0) => total,
        Ok(len) => total / len,
        Err(_) => Duration::from_secs_f64(total.as_secs_f64() / len as f64),
    }
}

#[cfg(test)]
mod tests {
    use model::live::{AnimationStatus, LiveTrackSample, MarkerUpdate};
    use model::ExampleData;

    use super::*;
    use crate::marker::MarkerSink;

    const NOW: i64 = 1_700_000_000;

    fn batch(len: usize) -> LiveTrackBatch {
        let samples = (0..len)
            .map(|i| LiveTrackSample {
                lat: 12.9 + i as f64 * 0.001,
                timestamp_seconds: NOW,
                ..LiveTrackSample::example_data()
            })
            .collect();
        LiveTrackBatch::new(samples).unwrap()
    }

    fn play_to_end(
        animator: &mut Animator,
        sink: &mut Vec<MarkerUpdate>,
    ) -> Vec<Option<Duration>> {
        let mut delays = Vec::new();
        while let Some(frame) = animator.tick(NOW) {
            sink.update_marker(frame.update);
            delays.push(frame.next_in);
        }
        delays
    }

    #[test]
    fn batch_is_paced_over_total_duration() {
        let mut animator = Animator::new(TrackingConfig::default());
        animator.load_batch(batch(5));
        let mut sink = Vec::new();
        let delays = play_to_end(&mut animator, &mut sink);

        let step = Some(Duration::from_secs(2));
        assert_eq!(delays, vec![step, step, step, step, None]);
        assert_eq!(sink.len(), 5);
        assert_eq!(sink[0].transition_duration_ms, 2000.0);
        assert_eq!(animator.state(), PlaybackState::Idle);
    }

    #[test]
    fn samples_are_presented_in_order() {
        let mut animator = Animator::new(TrackingConfig::default());
        animator.load_batch(batch(3));
        let mut sink = Vec::new();
        play_to_end(&mut animator, &mut sink);
        let presented = sink.iter().map(|update| update.position.lat).collect::<Vec<_>>();
        let expected = batch(3).samples().iter().map(|sample| sample.lat).collect::<Vec<_>>();
        assert_eq!(presented, expected);
        assert_eq!(sink[0].attributes.status, AnimationStatus::Running);
        assert_eq!(sink[0].attributes.mode, "car");
    }

    #[test]
    fn tick_without_batch_is_a_no_op() {
        let mut animator = Animator::new(TrackingConfig::default());
        assert_eq!(animator.tick(NOW), None);
        animator.load_batch(LiveTrackBatch::default());
        assert_eq!(animator.tick(NOW), None);
        assert_eq!(animator.state(), PlaybackState::Idle);
    }

    #[test]
    fn new_batch_supersedes_running_one() {
        let mut animator = Animator::new(TrackingConfig::default());
        assert!(!animator.load_batch(batch(4)));
        animator.tick(NOW);
        animator.tick(NOW);
        assert_eq!(
            animator.state(),
            PlaybackState::Playing {
                displayed_index: Some(1),
                len: 4
            }
        );

        assert!(animator.load_batch(batch(2)));
        assert_eq!(
            animator.state(),
            PlaybackState::Playing {
                displayed_index: None,
                len: 2
            }
        );
        assert_eq!(animator.tick(NOW).map(|frame| frame.index), Some(0));
    }

    #[test]
    fn cancel_discards_batch() {
        let mut animator = Animator::new(TrackingConfig::default());
        animator.load_batch(batch(3));
        animator.tick(NOW);
        animator.cancel();
        assert_eq!(animator.state(), PlaybackState::Idle);
        assert_eq!(animator.tick(NOW), None);
    }

    #[test]
    fn stale_sample_is_shown_offline() {
        let mut animator = Animator::new(TrackingConfig::default());
        animator.load_batch(batch(1));
        let frame = animator.tick(NOW + 1801).unwrap();
        assert_eq!(frame.update.attributes.status, AnimationStatus::Offline);
        assert_eq!(frame.next_in, None);
    }

    #[test]
    fn interval_splits_total_evenly() {
        let total = Duration::from_secs(10);
        assert_eq!(interval(total, 5), Duration::from_secs(2));
        assert_eq!(interval(total, 1), total);
        assert_eq!(interval(total, 0), total);
    }
}

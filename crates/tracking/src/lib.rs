use std::error;
use std::fmt;
use std::result;

use tokio::sync::oneshot;

pub mod animator;
pub mod batch;
pub mod config;
pub mod marker;
pub mod tracker;

pub use config::TrackingConfig;

#[derive(Debug, Clone, PartialEq)]
pub enum TrackingError {
    /// A sample of an incoming batch is unusable; the whole batch is dropped.
    InvalidSample { index: usize, reason: &'static str },
    /// The tracker task is no longer running.
    TrackerStopped,
}

pub type Result<T> = result::Result<T, TrackingError>;

impl error::Error for TrackingError {}

impl fmt::Display for TrackingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TrackingError::InvalidSample { index, reason } => {
                write!(f, "Invalid live sample at {}: {}", index, reason)
            }
            TrackingError::TrackerStopped => write!(f, "Live tracker is not running."),
        }
    }
}

impl<T> From<tokio::sync::mpsc::error::SendError<T>> for TrackingError {
    fn from(_: tokio::sync::mpsc::error::SendError<T>) -> Self {
        TrackingError::TrackerStopped
    }
}

impl From<oneshot::error::RecvError> for TrackingError {
    fn from(_: oneshot::error::RecvError) -> Self {
        TrackingError::TrackerStopped
    }
}

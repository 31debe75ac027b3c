use std::error;
use std::fmt;
use std::result;
use std::sync::Arc;

pub mod buffer;
pub mod calculator;
pub mod codec;
pub mod config;
pub mod editor;
pub mod snap;

pub use config::FenceConfig;

#[derive(Debug, Clone)]
pub enum FenceError {
    /// Structural problem in a persisted fence document.
    MalformedGeoJson(String),
    /// A polygon fence was displayed without its backend supplied center.
    MissingCenter,
    /// A route fence was requested with no points to buffer.
    EmptyRoute,
    /// A route point or corridor width is not a finite number.
    InvalidRoute(String),
    FenceTooSmall {
        requested_meters: f64,
        minimum_meters: f64,
    },
    SnapFailure {
        requested: usize,
        received: usize,
    },
    Json(Arc<serde_json::Error>),
}

pub type Result<T> = result::Result<T, FenceError>;

impl FenceError {
    pub fn malformed<S: Into<String>>(reason: S) -> Self {
        FenceError::MalformedGeoJson(reason.into())
    }
}

impl error::Error for FenceError {}

impl fmt::Display for FenceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FenceError::MalformedGeoJson(reason) => {
                write!(f, "Malformed fence document: {}", reason)
            }
            FenceError::MissingCenter => {
                write!(f, "Polygon fence has no center position.")
            }
            FenceError::EmptyRoute => write!(f, "Route has no points."),
            FenceError::InvalidRoute(reason) => write!(f, "Invalid route: {}", reason),
            FenceError::FenceTooSmall { minimum_meters, .. } => write!(
                f,
                "Route fence radius has to be more than {} meters.",
                minimum_meters
            ),
            FenceError::SnapFailure {
                requested,
                received,
            } => write!(
                f,
                "Snapping returned {} of {} points, using the drawn route instead.",
                received, requested
            ),
            FenceError::Json(e) => write!(f, "JSON parse error: {}", e),
        }
    }
}

impl From<serde_json::Error> for FenceError {
    fn from(e: serde_json::Error) -> Self {
        FenceError::Json(Arc::new(e))
    }
}

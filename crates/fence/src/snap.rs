use model::location::LatLng;

use crate::FenceError;

#[derive(Debug, Clone)]
pub struct SnapOutcome {
    pub points: Vec<LatLng>,
    /// Present when the snapped points were unusable and the raw ones are
    /// returned instead. Meant to be shown to the user as a warning.
    pub fallback: Option<FenceError>,
}

/// Picks the road-snapped route if the snapping service returned a point for
/// every drawn point, and the drawn route otherwise.
pub fn resolve_snapped(raw: Vec<LatLng>, snapped: Option<Vec<LatLng>>) -> SnapOutcome {
    let requested = raw.len();
    match snapped {
        Some(snapped) if snapped.len() >= requested => SnapOutcome {
            points: snapped,
            fallback: None,
        },
        snapped => {
            let received = snapped.map(|points| points.len()).unwrap_or(0);
            let why = FenceError::SnapFailure {
                requested,
                received,
            };
            log::warn!("{}", why);
            SnapOutcome {
                points: raw,
                fallback: Some(why),
            }
        }
    }
}

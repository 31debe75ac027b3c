use geo::{BoundingRect, Coord, LineString};
use model::{
    fence::FenceShape,
    location::{Bounds, LatLng},
};
use utility::geo::destination;

use crate::{FenceError, Result};

/// Initial bearings of the hexagon vertices, clockwise from north.
pub const HEXAGON_BEARINGS: [f64; 6] = [-90.0, -30.0, 30.0, 90.0, 150.0, 210.0];

/// Great-circle distance rounded to whole meters.
pub fn haversine_distance_meters(a: &LatLng, b: &LatLng) -> f64 {
    a.distance_to(b).round()
}

/// Display radius of a polygon fence: distance from its center to the first
/// vertex of the ring.
pub fn calculate_radius(center: &LatLng, vertex: &LatLng) -> f64 {
    haversine_distance_meters(center, vertex)
}

/// Six point stand-in for a circular fence, used whenever a point and radius
/// are turned into an editable polygon.
pub fn hexagonal_approximation(center: &LatLng, radius_meters: f64) -> Vec<LatLng> {
    HEXAGON_BEARINGS
        .iter()
        .map(|bearing| {
            LatLng::from(destination(center.lat, center.lng, radius_meters, *bearing))
        })
        .collect()
}

pub fn bounds_of(points: &[LatLng]) -> Option<Bounds> {
    let line: LineString<f64> = points
        .iter()
        .map(|point| Coord {
            x: point.lng,
            y: point.lat,
        })
        .collect();
    line.bounding_rect().map(|rect| Bounds {
        north: rect.max().y,
        south: rect.min().y,
        east: rect.max().x,
        west: rect.min().x,
    })
}

/// Everything a dashboard needs to draw a stored fence.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayFence {
    pub center: LatLng,
    pub radius_meters: f64,
    /// Polygon ring for polygon fences, `None` for circles.
    pub ring: Option<Vec<LatLng>>,
    pub bounds: Bounds,
}

/// Polygon fences take their center from the backend's `geoPosition`; the
/// centroid of the ring is never computed.
pub fn display_fence(
    shape: &FenceShape,
    geo_position: Option<&LatLng>,
) -> Result<DisplayFence> {
    match shape {
        FenceShape::Circle {
            center,
            radius_meters,
        } => {
            let outline = hexagonal_approximation(center, *radius_meters);
            let bounds = bounds_of(&outline).unwrap_or(Bounds {
                north: center.lat,
                south: center.lat,
                east: center.lng,
                west: center.lng,
            });
            Ok(DisplayFence {
                center: *center,
                radius_meters: *radius_meters,
                ring: None,
                bounds,
            })
        }
        FenceShape::Polygon { ring } => {
            let center = geo_position.ok_or(FenceError::MissingCenter)?;
            let first = ring
                .first()
                .ok_or_else(|| FenceError::malformed("polygon ring is empty"))?;
            let bounds =
                bounds_of(ring).ok_or_else(|| FenceError::malformed("polygon ring is empty"))?;
            Ok(DisplayFence {
                center: *center,
                radius_meters: calculate_radius(center, first),
                ring: Some(ring.clone()),
                bounds,
            })
        }
    }
}

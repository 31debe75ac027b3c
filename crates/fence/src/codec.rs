//! Conversion between persisted fence documents and [`FenceShape`].
//!
//! The backend stores coordinates latitude first (`[lat, lng]`), both for the
//! circle center and for every polygon vertex. This is kept as is so stored
//! fences stay readable by the existing dashboards.

use model::{
    fence::{FenceShape, GeoJsonDocument, GeoPositionDocument, CIRCLE_TYPE, POLYGON_TYPE},
    location::LatLng,
};
use serde_json::{json, Value};

use crate::{FenceError, Result};

const POINT_TYPE: &str = "Point";
const MINIMUM_DISTINCT_VERTICES: usize = 3;

pub fn decode(document: &GeoJsonDocument) -> Result<FenceShape> {
    match document.kind.as_str() {
        CIRCLE_TYPE => {
            let radius_meters = document
                .radius
                .filter(|radius| radius.is_finite())
                .ok_or_else(|| FenceError::malformed("circle without radius"))?;
            let center = lat_lng(&document.coordinates)
                .ok_or_else(|| FenceError::malformed("circle without center"))?;
            Ok(FenceShape::circle(center, radius_meters))
        }
        POLYGON_TYPE => {
            let ring = document
                .coordinates
                .get(0)
                .and_then(Value::as_array)
                .ok_or_else(|| FenceError::malformed("polygon without ring"))?
                .iter()
                .map(|pair| {
                    lat_lng(pair).ok_or_else(|| {
                        FenceError::malformed(format!("invalid polygon vertex {}", pair))
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            let shape = FenceShape::polygon(ring);
            let distinct = count_distinct(shape.open_ring().unwrap_or_default());
            if distinct < MINIMUM_DISTINCT_VERTICES {
                return Err(FenceError::malformed(format!(
                    "polygon ring has {} distinct points",
                    distinct
                )));
            }
            Ok(shape)
        }
        other => Err(FenceError::malformed(format!(
            "unsupported fence type {:?}",
            other
        ))),
    }
}

/// Polygons are always written closed: the ring is emitted without any
/// existing closing point and the first vertex is appended again.
pub fn encode(shape: &FenceShape) -> GeoJsonDocument {
    match shape {
        FenceShape::Circle {
            center,
            radius_meters,
        } => GeoJsonDocument {
            kind: CIRCLE_TYPE.to_owned(),
            radius: Some(radius_meters.round()),
            coordinates: json!([center.lat, center.lng]),
        },
        FenceShape::Polygon { .. } => {
            let ring = shape.open_ring().unwrap_or_default();
            let mut vertex_array = ring
                .iter()
                .map(|point| json!([point.lat, point.lng]))
                .collect::<Vec<_>>();
            if let Some(first) = vertex_array.first().cloned() {
                vertex_array.push(first);
            }
            GeoJsonDocument {
                kind: POLYGON_TYPE.to_owned(),
                radius: None,
                coordinates: json!([vertex_array]),
            }
        }
    }
}

/// Decodes the JSON text stored in the backend's `geoJson` field.
pub fn parse_geo_json(text: &str) -> Result<FenceShape> {
    let document: GeoJsonDocument = serde_json::from_str(text)?;
    decode(&document)
}

pub fn to_geo_json_string(shape: &FenceShape) -> Result<String> {
    Ok(serde_json::to_string(&encode(shape))?)
}

/// Decodes the JSON text stored in the backend's `geoPosition` field, the
/// authoritative center of a fence.
pub fn parse_geo_position(text: &str) -> Result<LatLng> {
    let document: GeoPositionDocument = serde_json::from_str(text)?;
    if let Some(kind) = document.kind.as_deref() {
        if kind != POINT_TYPE {
            return Err(FenceError::malformed(format!(
                "unsupported position type {:?}",
                kind
            )));
        }
    }
    lat_lng(&document.coordinates)
        .ok_or_else(|| FenceError::malformed("position without coordinates"))
}

pub fn encode_geo_position(center: &LatLng) -> GeoPositionDocument {
    GeoPositionDocument {
        kind: Some(POINT_TYPE.to_owned()),
        coordinates: json!([center.lat, center.lng]),
    }
}

fn lat_lng(value: &Value) -> Option<LatLng> {
    let pair = value.as_array()?;
    let lat = pair.first()?.as_f64()?;
    let lng = pair.get(1)?.as_f64()?;
    Some(LatLng::new(lat, lng)).filter(LatLng::is_finite)
}

fn count_distinct(points: &[LatLng]) -> usize {
    let mut distinct: Vec<&LatLng> = Vec::with_capacity(points.len());
    for point in points {
        if !distinct.contains(&point) {
            distinct.push(point);
        }
    }
    distinct.len()
}

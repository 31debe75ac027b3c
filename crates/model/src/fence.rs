use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::serde::whole_meters;

use crate::{location::LatLng, ExampleData};

pub const CIRCLE_TYPE: &str = "Circle";
pub const POLYGON_TYPE: &str = "Polygon";

/// In-memory description of a geofence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FenceShape {
    #[serde(rename_all = "camelCase")]
    Circle { center: LatLng, radius_meters: f64 },
    /// Ordered vertex ring. Decoded rings keep the closing duplicate, rings
    /// built for editing do not.
    Polygon { ring: Vec<LatLng> },
}

impl FenceShape {
    pub fn circle(center: LatLng, radius_meters: f64) -> Self {
        Self::Circle {
            center,
            radius_meters,
        }
    }

    pub fn polygon(ring: Vec<LatLng>) -> Self {
        Self::Polygon { ring }
    }

    /// Polygon ring without the closing duplicate, if there is one.
    pub fn open_ring(&self) -> Option<&[LatLng]> {
        match self {
            Self::Circle { .. } => None,
            Self::Polygon { ring } => match (ring.first(), ring.last()) {
                (Some(first), Some(last)) if ring.len() > 1 && first == last => {
                    Some(&ring[..ring.len() - 1])
                }
                _ => Some(ring.as_slice()),
            },
        }
    }
}

impl ExampleData for FenceShape {
    fn example_data() -> Self {
        FenceShape::circle(LatLng::example_data(), 500.0)
    }
}

/// Persisted fence as stored in the backend's `geoJson` field.
///
/// Coordinates are latitude first, unlike regular GeoJSON. `Circle` documents
/// carry `coordinates = [lat, lng]` and a `radius` in meters, `Polygon`
/// documents carry `coordinates = [ring]` with a closed ring of `[lat, lng]`
/// pairs.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GeoJsonDocument {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(serialize_with = "whole_meters::serialize_option", default)]
    #[schemars(schema_with = "whole_meters::schema_option")]
    pub radius: Option<f64>,
    #[serde(default)]
    pub coordinates: serde_json::Value,
}

impl ExampleData for GeoJsonDocument {
    fn example_data() -> Self {
        GeoJsonDocument {
            kind: CIRCLE_TYPE.to_owned(),
            radius: Some(500.0),
            coordinates: serde_json::json!([12.97, 77.64]),
        }
    }
}

/// Authoritative fence center as stored in the backend's `geoPosition` field.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GeoPositionDocument {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub coordinates: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_ring_drops_closing_point() {
        let a = LatLng::new(0.0, 0.0);
        let b = LatLng::new(0.0, 1.0);
        let c = LatLng::new(1.0, 1.0);
        let closed = FenceShape::polygon(vec![a, b, c, a]);
        assert_eq!(closed.open_ring(), Some(&[a, b, c][..]));
        let open = FenceShape::polygon(vec![a, b, c]);
        assert_eq!(open.open_ring(), Some(&[a, b, c][..]));
        assert_eq!(FenceShape::example_data().open_ring(), None);
    }

    #[test]
    fn circle_document_writes_integer_radius() {
        let json = serde_json::to_string(&GeoJsonDocument::example_data()).unwrap();
        assert_eq!(
            json,
            r#"{"type":"Circle","radius":500,"coordinates":[12.97,77.64]}"#
        );
    }

    #[test]
    fn polygon_document_omits_radius() {
        let document = GeoJsonDocument {
            kind: POLYGON_TYPE.to_owned(),
            radius: None,
            coordinates: serde_json::json!([[[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [0.0, 0.0]]]),
        };
        let json = serde_json::to_string(&document).unwrap();
        assert!(!json.contains("radius"));
    }
}

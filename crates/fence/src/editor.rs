//! Rules applied while a user edits a fence.

use model::{fence::FenceShape, location::LatLng};

use crate::{
    buffer::buffer_polyline_to_polygon, calculator::hexagonal_approximation, FenceConfig,
    FenceError, Result,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusChange {
    pub radius_meters: f64,
    /// Set when the requested radius was below the minimum and was raised to it.
    pub clamped: bool,
}

/// Interactive radius change of a circular fence. Anything below the minimum
/// snaps back to exactly the minimum.
pub fn clamp_radius(requested_meters: f64, config: &FenceConfig) -> RadiusChange {
    if requested_meters >= config.minimum_radius_meters {
        return RadiusChange {
            radius_meters: requested_meters,
            clamped: false,
        };
    }
    log::warn!(
        "fence radius {} m is below {} m, clamping",
        requested_meters,
        config.minimum_radius_meters
    );
    RadiusChange {
        radius_meters: config.minimum_radius_meters,
        clamped: true,
    }
}

/// Applies [`clamp_radius`] to a circle; polygons are returned unchanged.
pub fn resize_circle(
    shape: FenceShape,
    requested_meters: f64,
    config: &FenceConfig,
) -> (FenceShape, RadiusChange) {
    match shape {
        FenceShape::Circle { center, .. } => {
            let change = clamp_radius(requested_meters, config);
            (FenceShape::circle(center, change.radius_meters), change)
        }
        polygon @ FenceShape::Polygon { .. } => (
            polygon,
            RadiusChange {
                radius_meters: requested_meters,
                clamped: false,
            },
        ),
    }
}

/// Turns a point and radius into an editable polygon fence. The polygon is a
/// hexagon, not a true circle, so stored fences keep their six vertices.
pub fn to_editable_polygon(
    center: &LatLng,
    radius_meters: f64,
    config: &FenceConfig,
) -> FenceShape {
    let radius = clamp_radius(radius_meters, config).radius_meters;
    FenceShape::polygon(hexagonal_approximation(center, radius))
}

pub fn check_route_width(distance_km: f64, config: &FenceConfig) -> Result<()> {
    if !distance_km.is_finite() {
        return Err(FenceError::InvalidRoute(format!(
            "corridor width {} km",
            distance_km
        )));
    }
    let requested_meters = distance_km * 1000.0;
    if requested_meters >= config.minimum_radius_meters {
        Ok(())
    } else {
        Err(FenceError::FenceTooSmall {
            requested_meters,
            minimum_meters: config.minimum_radius_meters,
        })
    }
}

/// Builds the corridor fence of a route, ready to be encoded and saved.
pub fn route_fence(
    line: &[LatLng],
    distance_km: f64,
    config: &FenceConfig,
) -> Result<FenceShape> {
    if let Err(why) = check_route_width(distance_km, config) {
        log::warn!("route fence rejected: {}", why);
        return Err(why);
    }
    if line.is_empty() {
        return Err(FenceError::EmptyRoute);
    }
    if let Some(index) = line.iter().position(|point| !point.is_finite()) {
        let why = FenceError::InvalidRoute(format!("point {} is not finite", index));
        log::warn!("route fence rejected: {}", why);
        return Err(why);
    }
    let ring = buffer_polyline_to_polygon(line, distance_km, config.buffer_steps);
    log::debug!(
        "buffered {} route points into a {} point fence",
        line.len(),
        ring.len()
    );
    Ok(FenceShape::polygon(ring))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec;

    #[test]
    fn radius_below_minimum_is_clamped_to_exactly_minimum() {
        let config = FenceConfig::default();
        for requested in [0.0, 10.0, 24.999, -5.0, f64::NAN] {
            let change = clamp_radius(requested, &config);
            assert_eq!(change.radius_meters, 25.0);
            assert!(change.clamped);
        }
        let change = clamp_radius(25.0, &config);
        assert_eq!(change, RadiusChange { radius_meters: 25.0, clamped: false });
        assert!(!clamp_radius(300.0, &config).clamped);
    }

    #[test]
    fn resizing_a_circle_keeps_its_center() {
        let center = LatLng::new(12.97, 77.64);
        let (shape, change) =
            resize_circle(FenceShape::circle(center, 100.0), 12.0, &FenceConfig::default());
        assert!(change.clamped);
        assert_eq!(shape, FenceShape::circle(center, 25.0));
    }

    #[test]
    fn editable_polygon_is_a_hexagon() {
        let center = LatLng::new(12.97, 77.64);
        let shape = to_editable_polygon(&center, 400.0, &FenceConfig::default());
        let document = codec::encode(&shape);
        // six vertices plus the closing one
        assert_eq!(document.coordinates[0].as_array().map(Vec::len), Some(7));
    }

    #[test]
    fn narrow_route_fence_is_rejected() {
        let line = [LatLng::new(12.9, 77.6), LatLng::new(12.91, 77.61)];
        let result = route_fence(&line, 0.02, &FenceConfig::default());
        let Err(why) = result else {
            panic!("20 m route fence should be rejected");
        };
        assert!(matches!(why, FenceError::FenceTooSmall { .. }));
        assert_eq!(
            why.to_string(),
            "Route fence radius has to be more than 25 meters."
        );
    }

    #[test]
    fn route_fence_encodes_as_closed_polygon() {
        let line = [LatLng::new(12.9, 77.6), LatLng::new(12.91, 77.61)];
        let shape = route_fence(&line, 0.025, &FenceConfig::default()).unwrap();
        let document = codec::encode(&shape);
        assert_eq!(document.kind, "Polygon");
        let ring = document.coordinates[0].as_array().unwrap();
        assert_eq!(ring.first(), ring.last());
        assert!(codec::decode(&document).is_ok());
    }

    #[test]
    fn infinite_route_width_is_rejected() {
        let line = [LatLng::new(12.9, 77.6), LatLng::new(12.91, 77.61)];
        for width in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
            assert!(matches!(
                route_fence(&line, width, &FenceConfig::default()),
                Err(FenceError::InvalidRoute(_))
            ));
        }
    }

    #[test]
    fn non_finite_route_point_is_rejected() {
        let line = [
            LatLng::new(12.9, 77.6),
            LatLng::new(f64::NAN, 77.61),
            LatLng::new(12.92, f64::INFINITY),
        ];
        let result = route_fence(&line, 0.05, &FenceConfig::default());
        let Err(FenceError::InvalidRoute(reason)) = result else {
            panic!("route with a NaN point should be rejected");
        };
        assert_eq!(reason, "point 1 is not finite");
    }

    #[test]
    fn empty_route_is_an_error() {
        assert!(matches!(
            route_fence(&[], 0.1, &FenceConfig::default()),
            Err(FenceError::EmptyRoute)
        ));
    }
}

//! Route corridor buffering.
//!
//! The polyline is projected onto a local plane in meters around its first
//! point, dilated by the buffer distance (one disc per vertex, one rectangle
//! per segment, all unioned) and projected back.

use std::f64::consts::PI;

use geo::{Area, BooleanOps, Coord, LineString, MultiPolygon, Polygon};
use model::location::LatLng;
use utility::geo::LocalProjection;

use crate::config::MAX_BUFFER_STEPS;

/// Buffers `line` by `distance_km` and returns the closed outer ring of the
/// corridor. `steps` is the number of segments per quarter circle used for
/// the rounded ends and joins, clamped to 1..=64.
///
/// Returns an empty ring for an empty line, a non-positive or non-finite
/// distance, or a line with a non-finite point.
pub fn buffer_polyline_to_polygon(
    line: &[LatLng],
    distance_km: f64,
    steps: u32,
) -> Vec<LatLng> {
    let Some(origin) = line.first() else {
        return Vec::new();
    };
    if !distance_km.is_finite() || distance_km <= 0.0 {
        return Vec::new();
    }
    if !line.iter().all(LatLng::is_finite) {
        return Vec::new();
    }
    let distance = distance_km * 1000.0;
    let projection = LocalProjection::new(origin.lat, origin.lng);

    let mut points = line
        .iter()
        .map(|point| {
            let (x, y) = projection.project(point.lat, point.lng);
            Coord { x, y }
        })
        .collect::<Vec<_>>();
    points.dedup();

    let vertices = steps.clamp(1, MAX_BUFFER_STEPS) as usize * 4;
    let mut pieces = points
        .iter()
        .map(|center| disc(*center, distance, vertices))
        .collect::<Vec<_>>();
    pieces.extend(
        points
            .windows(2)
            .filter_map(|pair| segment_band(pair[0], pair[1], distance)),
    );

    let corridor = pieces
        .into_iter()
        .map(|piece| MultiPolygon::new(vec![piece]))
        .reduce(|corridor, piece| corridor.union(&piece));
    // a self-crossing route can leave holes, only the outline is kept
    let outline = corridor.and_then(|corridor| {
        corridor
            .0
            .into_iter()
            .max_by(|a, b| a.unsigned_area().total_cmp(&b.unsigned_area()))
    });

    outline
        .map(|outline| {
            outline
                .exterior()
                .coords()
                .map(|coord| LatLng::from(projection.unproject(coord.x, coord.y)))
                .collect()
        })
        .unwrap_or_default()
}

fn disc(center: Coord<f64>, radius: f64, vertices: usize) -> Polygon<f64> {
    let ring = (0..vertices)
        .map(|i| {
            let angle = 2.0 * PI * i as f64 / vertices as f64;
            Coord {
                x: center.x + radius * angle.cos(),
                y: center.y + radius * angle.sin(),
            }
        })
        .collect::<LineString<f64>>();
    Polygon::new(ring, vec![])
}

fn segment_band(
    from: Coord<f64>,
    to: Coord<f64>,
    half_width: f64,
) -> Option<Polygon<f64>> {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let length = dx.hypot(dy);
    if length == 0.0 {
        return None;
    }
    // left hand normal, keeps the band counter clockwise
    let nx = -dy / length * half_width;
    let ny = dx / length * half_width;
    let ring = LineString::from(vec![
        (from.x - nx, from.y - ny),
        (to.x - nx, to.y - ny),
        (to.x + nx, to.y + ny),
        (from.x + nx, from.y + ny),
    ]);
    Some(Polygon::new(ring, vec![]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn distance_to_segment(p: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
        let (dx, dy) = (b.0 - a.0, b.1 - a.1);
        let t = (((p.0 - a.0) * dx + (p.1 - a.1) * dy) / (dx * dx + dy * dy)).clamp(0.0, 1.0);
        (p.0 - (a.0 + t * dx)).hypot(p.1 - (a.1 + t * dy))
    }

    #[test]
    fn corridor_keeps_buffer_distance_from_route() {
        let line = [LatLng::new(12.9, 77.6), LatLng::new(12.91, 77.61)];
        let ring = buffer_polyline_to_polygon(&line, 0.05, 8);

        assert!(ring.len() > 8);
        assert_eq!(ring.first(), ring.last());

        let projection = LocalProjection::new(12.9, 77.6);
        let a = projection.project(12.9, 77.6);
        let b = projection.project(12.91, 77.61);
        for vertex in &ring {
            let p = projection.project(vertex.lat, vertex.lng);
            let distance = distance_to_segment(p, a, b);
            assert!((distance - 50.0).abs() < 1.0, "vertex at {distance} m");
        }
    }

    #[test]
    fn more_steps_give_smoother_corridor() {
        let line = [
            LatLng::new(12.90, 77.60),
            LatLng::new(12.91, 77.61),
            LatLng::new(12.90, 77.62),
        ];
        let coarse = buffer_polyline_to_polygon(&line, 0.1, 2);
        let smooth = buffer_polyline_to_polygon(&line, 0.1, 16);
        assert!(smooth.len() > coarse.len());
    }

    #[test]
    fn single_point_becomes_a_disc() {
        let ring = buffer_polyline_to_polygon(&[LatLng::new(0.0, 0.0)], 0.1, 8);
        // 32 vertices plus the closing point
        assert_eq!(ring.len(), 33);
    }

    #[test]
    fn repeated_points_are_ignored() {
        let point = LatLng::new(48.1, 11.5);
        let ring = buffer_polyline_to_polygon(&[point, point, point], 0.1, 4);
        assert_eq!(ring.len(), 17);
    }

    #[test]
    fn empty_input_yields_empty_ring() {
        assert!(buffer_polyline_to_polygon(&[], 0.1, 8).is_empty());
        assert!(buffer_polyline_to_polygon(&[LatLng::new(0.0, 0.0)], 0.0, 8).is_empty());
    }

    #[test]
    fn non_finite_input_yields_empty_ring() {
        let line = [LatLng::new(12.9, 77.6), LatLng::new(12.91, 77.61)];
        assert!(buffer_polyline_to_polygon(&line, f64::INFINITY, 8).is_empty());
        assert!(buffer_polyline_to_polygon(&line, f64::NAN, 8).is_empty());
        let broken = [LatLng::new(12.9, 77.6), LatLng::new(f64::NAN, 77.61)];
        assert!(buffer_polyline_to_polygon(&broken, 0.05, 8).is_empty());
    }

    #[test]
    fn step_count_is_capped() {
        let ring = buffer_polyline_to_polygon(&[LatLng::new(0.0, 0.0)], 0.05, u32::MAX);
        // 64 steps per quarter circle plus the closing point
        assert_eq!(ring.len(), 257);
        let ring = buffer_polyline_to_polygon(&[LatLng::new(0.0, 0.0)], 0.05, 0);
        assert_eq!(ring.len(), 5);
    }
}

//! Planar geometry kernel
//!
//! Euclidean math for projected coordinates. Rhumb lines and great circles
//! coincide on a plane, and transforms are done with exact vector
//! arithmetic instead of bearing round trips.

use glam::DVec2;

use super::GeometryOps;
use crate::geojson::Position;

/// Euclidean plane, bearings clockwise from +y
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanarOps;

impl GeometryOps for PlanarOps {
    fn name(&self) -> &str {
        "planar"
    }

    fn bearing(&self, from: DVec2, to: DVec2) -> f64 {
        let d = to - from;
        d.x.atan2(d.y).to_degrees()
    }

    fn distance(&self, a: DVec2, b: DVec2) -> f64 {
        a.distance(b)
    }

    fn destination(&self, origin: DVec2, distance: f64, bearing: f64) -> DVec2 {
        let (sin, cos) = bearing.to_radians().sin_cos();
        origin + DVec2::new(sin, cos) * distance
    }

    fn rhumb_bearing(&self, from: DVec2, to: DVec2) -> f64 {
        self.bearing(from, to)
    }

    fn rhumb_distance(&self, a: DVec2, b: DVec2) -> f64 {
        self.distance(a, b)
    }

    fn rhumb_destination(&self, origin: DVec2, distance: f64, bearing: f64) -> DVec2 {
        self.destination(origin, distance, bearing)
    }

    fn rotate_position(&self, position: &Position, angle: f64, pivot: DVec2) -> Position {
        // clockwise bearing rotation is a negative math-angle rotation
        let rotation = DVec2::from_angle(-angle.to_radians());
        position.with_vec2(pivot + rotation.rotate(position.to_vec2() - pivot))
    }

    fn scale_position(&self, position: &Position, factor: f64, origin: DVec2) -> Position {
        position.with_vec2(origin + (position.to_vec2() - origin) * factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geojson::Geometry;
    use approx::assert_relative_eq;

    #[test]
    fn test_bearing_convention() {
        let ops = PlanarOps;
        assert_relative_eq!(ops.bearing(DVec2::ZERO, DVec2::Y), 0.0);
        assert_relative_eq!(ops.bearing(DVec2::ZERO, DVec2::X), 90.0);
        assert_relative_eq!(ops.bearing(DVec2::ZERO, DVec2::NEG_X), -90.0);
    }

    #[test]
    fn test_destination() {
        let ops = PlanarOps;
        let p = ops.destination(DVec2::new(1.0, 1.0), 2.0, 90.0);
        assert_relative_eq!(p.x, 3.0);
        assert_relative_eq!(p.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_point_to_line_distance() {
        let ops = PlanarOps;
        let d = ops.point_to_line_distance(DVec2::new(0.5, 2.0), DVec2::ZERO, DVec2::X);
        assert_relative_eq!(d, 2.0);
        // beyond the segment end
        let d = ops.point_to_line_distance(DVec2::new(4.0, 4.0), DVec2::ZERO, DVec2::X);
        assert_relative_eq!(d, 5.0);
    }

    #[test]
    fn test_rotation_is_clockwise() {
        let ops = PlanarOps;
        let p = ops.rotate_position(&Position::new(0.0, 1.0), 90.0, DVec2::ZERO);
        assert_relative_eq!(p.lng, 1.0, epsilon = 1e-12);
        assert_relative_eq!(p.lat, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_scale_is_exact() {
        let ops = PlanarOps;
        let square = Geometry::Polygon(vec![
            [[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]]
                .into_iter()
                .map(Position::from)
                .collect(),
        ]);
        let scaled = ops.scale(&square, 2.0, DVec2::ZERO);
        let expected: Vec<Position> = [[0.0, 0.0], [0.0, 2.0], [2.0, 2.0], [2.0, 0.0], [0.0, 0.0]]
            .into_iter()
            .map(Position::from)
            .collect();
        assert_eq!(scaled.positions(), expected);
    }
}

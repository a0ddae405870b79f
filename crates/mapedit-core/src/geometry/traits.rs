//! Geometry kernel trait definitions
//!
//! These traits define the measurements and transforms the edit modes need.
//! Bearings are in degrees clockwise from north (or from +y on a plane).

use glam::DVec2;

use crate::geojson::{Geometry, Position};

/// Pure geometric primitives used by the edit modes
///
/// Implementations provide bearing, distance and destination along both
/// great-circle and rhumb lines; transforms are derived from those.
pub trait GeometryOps: std::fmt::Debug + Send + Sync {
    /// Get the name of this kernel
    fn name(&self) -> &str;

    /// Initial bearing from `from` to `to`, in `-180.0..=180.0`
    fn bearing(&self, from: DVec2, to: DVec2) -> f64;

    /// Distance between two coordinates
    fn distance(&self, a: DVec2, b: DVec2) -> f64;

    /// Coordinate reached by travelling `distance` along `bearing`
    fn destination(&self, origin: DVec2, distance: f64, bearing: f64) -> DVec2;

    /// Constant bearing from `from` to `to`, in `-180.0..=180.0`
    fn rhumb_bearing(&self, from: DVec2, to: DVec2) -> f64;

    /// Length of the rhumb line between two coordinates
    fn rhumb_distance(&self, a: DVec2, b: DVec2) -> f64;

    /// Coordinate reached along a rhumb line
    fn rhumb_destination(&self, origin: DVec2, distance: f64, bearing: f64) -> DVec2;

    /// Distance from `point` to the segment `start -> end`
    ///
    /// The closest point is found in coordinate space, then measured with
    /// [`GeometryOps::distance`].
    fn point_to_line_distance(&self, point: DVec2, start: DVec2, end: DVec2) -> f64 {
        self.distance(point, closest_point_on_segment(point, start, end))
    }

    /// Rotate one position clockwise by `angle` degrees about `pivot`
    fn rotate_position(&self, position: &Position, angle: f64, pivot: DVec2) -> Position {
        let p = position.to_vec2();
        if p == pivot {
            return *position;
        }
        let distance = self.rhumb_distance(pivot, p);
        let bearing = self.rhumb_bearing(pivot, p) + angle;
        position.with_vec2(self.rhumb_destination(pivot, distance, bearing))
    }

    /// Scale one position's offset from `origin` by `factor`
    fn scale_position(&self, position: &Position, factor: f64, origin: DVec2) -> Position {
        let p = position.to_vec2();
        if p == origin {
            return *position;
        }
        let distance = self.rhumb_distance(origin, p) * factor;
        let bearing = self.rhumb_bearing(origin, p);
        position.with_vec2(self.rhumb_destination(origin, distance, bearing))
    }

    /// Rotate a geometry clockwise by `angle` degrees about `pivot`
    fn rotate(&self, geometry: &Geometry, angle: f64, pivot: DVec2) -> Geometry {
        if angle == 0.0 {
            return geometry.clone();
        }
        geometry.map_positions(|p| self.rotate_position(p, angle, pivot))
    }

    /// Scale a geometry about `origin`
    fn scale(&self, geometry: &Geometry, factor: f64, origin: DVec2) -> Geometry {
        if factor == 1.0 {
            return geometry.clone();
        }
        geometry.map_positions(|p| self.scale_position(p, factor, origin))
    }
}

/// Closest point to `point` on the segment `start -> end`
pub fn closest_point_on_segment(point: DVec2, start: DVec2, end: DVec2) -> DVec2 {
    let segment = end - start;
    let length_sq = segment.length_squared();
    if length_sq == 0.0 {
        return start;
    }
    let t = ((point - start).dot(segment) / length_sq).clamp(0.0, 1.0);
    start + segment * t
}

/// Get the default geometry kernel (spherical, for lng/lat data)
pub fn default_ops() -> Box<dyn GeometryOps> {
    Box::new(super::SphericalOps)
}

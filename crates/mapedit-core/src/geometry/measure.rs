//! Kernel independent measurements
//!
//! Extents, centroids and outline conversion work directly on coordinate
//! values, the same on a sphere and on a plane.

use glam::DVec2;

use crate::geojson::{Feature, Geometry, Position};

/// Axis-aligned coordinate extent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BBox {
    /// West/south corner
    pub min: DVec2,
    /// East/north corner
    pub max: DVec2,
}

impl BBox {
    /// Grow to include a coordinate
    pub fn extend(&mut self, p: DVec2) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    /// Closed ring polygon: SW, SE, NE, NW, SW
    pub fn to_polygon(&self) -> Geometry {
        let corners = [
            DVec2::new(self.min.x, self.min.y),
            DVec2::new(self.max.x, self.min.y),
            DVec2::new(self.max.x, self.max.y),
            DVec2::new(self.min.x, self.max.y),
            DVec2::new(self.min.x, self.min.y),
        ];
        Geometry::Polygon(vec![corners.into_iter().map(Position::from).collect()])
    }
}

/// Extent of every coordinate of the given features
pub fn bbox<'a>(features: impl IntoIterator<Item = &'a Feature>) -> Option<BBox> {
    let mut extent: Option<BBox> = None;
    for p in features.into_iter().flat_map(|f| f.geometry.positions()) {
        let p = p.to_vec2();
        match extent.as_mut() {
            Some(b) => b.extend(p),
            None => extent = Some(BBox { min: p, max: p }),
        }
    }
    extent
}

/// Midpoint of two positions in coordinate space
pub fn midpoint(a: &Position, b: &Position) -> Position {
    Position::from((a.to_vec2() + b.to_vec2()) / 2.0)
}

/// Outline of a polygonal geometry as lines
///
/// A single-ring polygon becomes a LineString; anything with more rings
/// becomes a MultiLineString. Non-polygonal input yields `None`.
pub fn polygon_to_line(geometry: &Geometry) -> Option<Geometry> {
    match geometry {
        Geometry::Polygon(rings) if rings.len() == 1 => Some(Geometry::LineString(rings[0].clone())),
        Geometry::Polygon(rings) => Some(Geometry::MultiLineString(rings.clone())),
        Geometry::MultiPolygon(polygons) => Some(Geometry::MultiLineString(
            polygons.iter().flatten().cloned().collect(),
        )),
        _ => None,
    }
}

/// Center of mass of a set of features
///
/// Computed as the area centroid of the convex hull of all coordinates.
/// Degenerate hulls (a point or a straight line) fall back to the mean of
/// the distinct coordinates.
pub fn center_of_mass<'a>(features: impl IntoIterator<Item = &'a Feature>) -> Option<DVec2> {
    let points: Vec<DVec2> = features
        .into_iter()
        .flat_map(|f| f.geometry.positions())
        .map(|p| p.to_vec2())
        .collect();
    let hull = convex_hull(points);
    if hull.is_empty() {
        return None;
    }

    let mean = hull.iter().copied().sum::<DVec2>() / hull.len() as f64;
    if hull.len() < 3 {
        return Some(mean);
    }

    // translate to the first vertex to keep the shoelace terms small
    let anchor = hull[0];
    let mut area = 0.0;
    let mut weighted = DVec2::ZERO;
    for (a, b) in hull.iter().zip(hull.iter().cycle().skip(1)) {
        let (a, b) = (*a - anchor, *b - anchor);
        let cross = a.perp_dot(b);
        area += cross;
        weighted += (a + b) * cross;
    }
    if area.abs() < f64::EPSILON {
        return Some(mean);
    }
    Some(anchor + weighted / (3.0 * area))
}

/// Convex hull in counter-clockwise order (monotone chain)
fn convex_hull(mut points: Vec<DVec2>) -> Vec<DVec2> {
    points.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    points.dedup();
    if points.len() < 3 {
        return points;
    }

    let reversed: Vec<DVec2> = points.iter().rev().copied().collect();
    let mut hull: Vec<DVec2> = Vec::with_capacity(points.len() + 1);
    for pass in [&points[..], &reversed[..]] {
        let start = hull.len();
        for &p in pass {
            while hull.len() >= start + 2 && turns_clockwise(&hull, p) {
                hull.pop();
            }
            hull.push(p);
        }
        hull.pop();
    }
    hull
}

fn turns_clockwise(hull: &[DVec2], p: DVec2) -> bool {
    let (a, b) = (hull[hull.len() - 2], hull[hull.len() - 1]);
    (b - a).perp_dot(p - a) <= 0.0
}

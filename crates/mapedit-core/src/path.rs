//! Position paths
//!
//! A position path addresses one vertex inside a ring. Polygons and
//! MultiLineStrings use `[ring, vertex]`, MultiPolygons use
//! `[polygon, ring, vertex]`. On the wire a path is a plain integer array,
//! the same shape hosts already exchange in handle properties.
//!
//! Rings of polygons are closed: the last position duplicates the first. Ring
//! stepping treats the closing index as vertex 0, so a ring of `size`
//! positions has a cycle of `size - 1` distinct vertices.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, GeometryResult};
use crate::geojson::{FeatureCollection, Geometry, Position};

/// Address of a ring within a geometry (a path without its vertex)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RingAddress {
    /// Ring of a Polygon, or line of a MultiLineString
    Ring {
        /// Ring index
        ring: usize,
    },
    /// Ring of one polygon of a MultiPolygon
    MultiRing {
        /// Polygon index
        polygon: usize,
        /// Ring index within the polygon
        ring: usize,
    },
}

impl RingAddress {
    /// Extend the address to a vertex path
    pub fn vertex(self, vertex: usize) -> PositionPath {
        match self {
            RingAddress::Ring { ring } => PositionPath::Ring { ring, vertex },
            RingAddress::MultiRing { polygon, ring } => PositionPath::MultiRing {
                polygon,
                ring,
                vertex,
            },
        }
    }
}

/// Tagged vertex address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub enum PositionPath {
    /// `[ring, vertex]`
    Ring {
        /// Ring index
        ring: usize,
        /// Vertex index within the ring
        vertex: usize,
    },
    /// `[polygon, ring, vertex]`
    MultiRing {
        /// Polygon index
        polygon: usize,
        /// Ring index within the polygon
        ring: usize,
        /// Vertex index within the ring
        vertex: usize,
    },
}

impl PositionPath {
    /// Address of the ring containing this vertex
    pub fn ring_address(&self) -> RingAddress {
        match *self {
            PositionPath::Ring { ring, .. } => RingAddress::Ring { ring },
            PositionPath::MultiRing { polygon, ring, .. } => {
                RingAddress::MultiRing { polygon, ring }
            }
        }
    }

    /// Vertex index (the last component)
    pub fn vertex(&self) -> usize {
        match *self {
            PositionPath::Ring { vertex, .. } | PositionPath::MultiRing { vertex, .. } => vertex,
        }
    }

    /// Same ring, different vertex
    pub fn with_vertex(&self, vertex: usize) -> Self {
        self.ring_address().vertex(vertex)
    }

    /// Next vertex of a closed ring of `size` positions
    ///
    /// The last distinct vertex (`size - 2`) wraps to 0; the closing index
    /// `size - 1` is vertex 0, so its successor is 1.
    pub fn next(&self, size: usize) -> Self {
        let distinct = size.saturating_sub(1).max(1);
        self.with_vertex((self.vertex() + 1) % distinct)
    }

    /// Previous vertex of a closed ring of `size` positions
    ///
    /// Vertex 0 wraps to `size - 2`, skipping the closing duplicate.
    pub fn prev(&self, size: usize) -> Self {
        let vertex = match self.vertex() {
            0 => size.saturating_sub(2),
            v => v - 1,
        };
        self.with_vertex(vertex)
    }

    /// Components in wire order
    pub fn to_indexes(&self) -> Vec<usize> {
        (*self).into()
    }
}

impl fmt::Display for PositionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.to_indexes())
    }
}

impl TryFrom<Vec<usize>> for PositionPath {
    type Error = String;

    fn try_from(indexes: Vec<usize>) -> Result<Self, Self::Error> {
        Self::try_from(indexes.as_slice())
    }
}

impl TryFrom<&[usize]> for PositionPath {
    type Error = String;

    fn try_from(indexes: &[usize]) -> Result<Self, Self::Error> {
        match *indexes {
            [ring, vertex] => Ok(PositionPath::Ring { ring, vertex }),
            [polygon, ring, vertex] => Ok(PositionPath::MultiRing {
                polygon,
                ring,
                vertex,
            }),
            _ => Err(format!(
                "position path must have 2 or 3 indexes, got {}",
                indexes.len()
            )),
        }
    }
}

impl From<PositionPath> for Vec<usize> {
    fn from(path: PositionPath) -> Self {
        match path {
            PositionPath::Ring { ring, vertex } => vec![ring, vertex],
            PositionPath::MultiRing {
                polygon,
                ring,
                vertex,
            } => vec![polygon, ring, vertex],
        }
    }
}

fn geometry_at(data: &FeatureCollection, feature_index: usize) -> Option<&Geometry> {
    data.features.get(feature_index).map(|f| &f.geometry)
}

/// Number of positions in the ring addressed by `path`
///
/// Returns 0 when there is no path, or the feature or ring does not exist.
pub fn coordinates_size(
    path: Option<&PositionPath>,
    feature_index: usize,
    data: &FeatureCollection,
) -> usize {
    path.and_then(|path| geometry_at(data, feature_index)?.ring(path.ring_address()))
        .map_or(0, <[Position]>::len)
}

/// Step to the next vertex; `None` stays `None`
pub fn next_position_indexes(path: Option<&PositionPath>, size: usize) -> Option<PositionPath> {
    path.map(|p| p.next(size))
}

/// Step to the previous vertex; `None` stays `None`
pub fn prev_position_indexes(path: Option<&PositionPath>, size: usize) -> Option<PositionPath> {
    path.map(|p| p.prev(size))
}

/// Dereference a path to its position, if it resolves
pub fn point_for_position_indexes(
    path: Option<&PositionPath>,
    feature_index: usize,
    data: &FeatureCollection,
) -> Option<Position> {
    let path = path?;
    geometry_at(data, feature_index)?
        .ring(path.ring_address())?
        .get(path.vertex())
        .copied()
}

/// Dereference a path inside a geometry, failing on a bad path
pub fn resolve_position(geometry: &Geometry, path: &PositionPath) -> GeometryResult<Position> {
    geometry
        .ring(path.ring_address())
        .and_then(|ring| ring.get(path.vertex()))
        .copied()
        .ok_or(GeometryError::InvalidPositionPath {
            path: *path,
            geometry: geometry.type_name(),
        })
}

//! GeoJSON Editing Core
//!
//! This crate provides:
//! - A typed GeoJSON data model (features, geometries, positions)
//! - Tagged position paths for addressing vertices inside rings
//! - A copy-on-write feature collection used to produce edits
//! - Abstract geometry primitives with spherical and planar kernels

pub mod error;
pub mod geojson;
pub mod geometry;
pub mod immutable;
pub mod path;

// Re-exports for convenience
pub use error::{GeometryError, GeometryResult};
pub use geojson::{Feature, FeatureCollection, Geometry, Position};
pub use geometry::{
    BBox, GeometryOps, PlanarOps, SphericalOps, bbox, center_of_mass, default_ops, midpoint,
    polygon_to_line,
};
pub use immutable::ImmutableFeatureCollection;
pub use path::{
    PositionPath, RingAddress, coordinates_size, next_position_indexes,
    point_for_position_indexes, prev_position_indexes, resolve_position,
};

//! Error types for geometry addressing and mutation

use thiserror::Error;

use crate::path::PositionPath;

/// Error type for geometry operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// A feature index does not exist in the collection
    #[error("Feature index {index} out of range (collection has {len} features)")]
    FeatureIndexOutOfRange {
        /// Requested index
        index: usize,
        /// Number of features in the collection
        len: usize,
    },

    /// A position path does not resolve inside the geometry
    #[error("Invalid position path {path} for {geometry} geometry")]
    InvalidPositionPath {
        /// The offending path
        path: PositionPath,
        /// GeoJSON type name of the addressed geometry
        geometry: &'static str,
    },

    /// The operation is not defined for this geometry type
    #[error("Unsupported geometry: {0}")]
    UnsupportedGeometry(String),

    /// The operation would leave the geometry invalid
    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),
}

/// Result type for geometry operations
pub type GeometryResult<T> = Result<T, GeometryError>;

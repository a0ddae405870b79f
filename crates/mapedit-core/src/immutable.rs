//! Copy-on-write feature collection
//!
//! Every mutator returns a new collection and leaves the receiver untouched.
//! Wrapping a collection copies its features once; after that, collections
//! derived by edits share unchanged features through `Arc` and only the
//! edited feature is cloned. `get_object` copies every feature out again.

use std::sync::Arc;

use crate::error::{GeometryError, GeometryResult};
use crate::geojson::{Feature, FeatureCollection, Geometry, Position};
use crate::path::PositionPath;

/// Immutable view over a feature collection
#[derive(Debug, Clone, Default)]
pub struct ImmutableFeatureCollection {
    features: Vec<Arc<Feature>>,
}

impl ImmutableFeatureCollection {
    /// Wrap a collection
    pub fn new(collection: &FeatureCollection) -> Self {
        Self {
            features: collection.features.iter().cloned().map(Arc::new).collect(),
        }
    }

    /// Number of features
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Check if the collection is empty
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Get a feature by index
    pub fn feature(&self, index: usize) -> Option<&Feature> {
        self.features.get(index).map(Arc::as_ref)
    }

    fn checked_feature(&self, index: usize) -> GeometryResult<&Feature> {
        self.feature(index)
            .ok_or(GeometryError::FeatureIndexOutOfRange {
                index,
                len: self.features.len(),
            })
    }

    /// Apply `edit` to a copy of one feature's geometry
    fn edit_geometry(
        &self,
        feature_index: usize,
        edit: impl FnOnce(&mut Geometry) -> GeometryResult<()>,
    ) -> GeometryResult<Self> {
        let mut geometry = self.checked_feature(feature_index)?.geometry.clone();
        if let Err(e) = edit(&mut geometry) {
            tracing::debug!("Edit on feature {} rejected: {}", feature_index, e);
            return Err(e);
        }
        self.replace_geometry(feature_index, geometry)
    }

    /// Overwrite the position at `path`
    ///
    /// On polygons, writing the first or last position of a ring writes both
    /// so the ring stays closed.
    pub fn replace_position(
        &self,
        feature_index: usize,
        path: &PositionPath,
        position: Position,
    ) -> GeometryResult<Self> {
        self.edit_geometry(feature_index, |geometry| {
            let polygonal = geometry.is_polygonal();
            let ring = ring_for(geometry, path)?;
            let vertex = path.vertex();
            if vertex >= ring.len() {
                return Err(invalid(path, geometry_name(polygonal)));
            }
            ring[vertex] = position;
            let last = ring.len() - 1;
            if polygonal && (vertex == 0 || vertex == last) {
                ring[0] = position;
                ring[last] = position;
            }
            Ok(())
        })
    }

    /// Insert a position before `path`'s vertex, shifting later vertices
    ///
    /// A vertex equal to the ring length appends.
    pub fn add_position(
        &self,
        feature_index: usize,
        path: &PositionPath,
        position: Position,
    ) -> GeometryResult<Self> {
        self.edit_geometry(feature_index, |geometry| {
            if let Geometry::Point(_) = geometry {
                return Err(GeometryError::UnsupportedGeometry(
                    "Unable to add a position to a Point feature".into(),
                ));
            }
            let polygonal = geometry.is_polygonal();
            let ring = ring_for(geometry, path)?;
            let vertex = path.vertex();
            if vertex > ring.len() {
                return Err(invalid(path, geometry_name(polygonal)));
            }
            ring.insert(vertex, position);
            Ok(())
        })
    }

    /// Remove the position at `path`
    ///
    /// Rings keep at least four positions and lines at least two. Removing
    /// the first or last position of a polygon ring re-closes the ring.
    pub fn remove_position(&self, feature_index: usize, path: &PositionPath) -> GeometryResult<Self> {
        self.edit_geometry(feature_index, |geometry| {
            if let Geometry::Point(_) = geometry {
                return Err(GeometryError::UnsupportedGeometry(
                    "Unable to remove a position from a Point feature".into(),
                ));
            }
            let polygonal = geometry.is_polygonal();
            let ring = ring_for(geometry, path)?;
            let vertex = path.vertex();
            if vertex >= ring.len() {
                return Err(invalid(path, geometry_name(polygonal)));
            }
            let minimum = if polygonal { 4 } else { 2 };
            if ring.len() <= minimum {
                return Err(GeometryError::DegenerateGeometry(format!(
                    "cannot drop below {minimum} positions"
                )));
            }

            let was_last = vertex == ring.len() - 1;
            ring.remove(vertex);
            if polygonal && vertex == 0 {
                let first = ring[0];
                if let Some(last) = ring.last_mut() {
                    *last = first;
                }
            } else if polygonal && was_last {
                if let Some(&last) = ring.last() {
                    ring[0] = last;
                }
            }
            Ok(())
        })
    }

    /// Swap a feature's geometry
    pub fn replace_geometry(&self, feature_index: usize, geometry: Geometry) -> GeometryResult<Self> {
        let feature = self.checked_feature(feature_index)?;
        let updated = Feature {
            geometry,
            ..feature.clone()
        };
        let mut features = self.features.clone();
        features[feature_index] = Arc::new(updated);
        Ok(Self { features })
    }

    /// Append a feature
    pub fn add_feature(&self, feature: Feature) -> Self {
        let mut features = self.features.clone();
        features.push(Arc::new(feature));
        Self { features }
    }

    /// Remove several features at once
    pub fn delete_features(&self, indexes: &[usize]) -> GeometryResult<Self> {
        if let Some(&index) = indexes.iter().find(|&&i| i >= self.features.len()) {
            return Err(GeometryError::FeatureIndexOutOfRange {
                index,
                len: self.features.len(),
            });
        }
        let features = self
            .features
            .iter()
            .enumerate()
            .filter(|(i, _)| !indexes.contains(i))
            .map(|(_, f)| Arc::clone(f))
            .collect();
        Ok(Self { features })
    }

    /// Materialize the current collection as an owned copy
    pub fn get_object(&self) -> FeatureCollection {
        FeatureCollection::new(self.features.iter().map(|f| f.as_ref().clone()).collect())
    }
}

impl From<&FeatureCollection> for ImmutableFeatureCollection {
    fn from(collection: &FeatureCollection) -> Self {
        Self::new(collection)
    }
}

fn ring_for<'a>(geometry: &'a mut Geometry, path: &PositionPath) -> GeometryResult<&'a mut Vec<Position>> {
    let name = geometry.type_name();
    geometry
        .ring_mut(path.ring_address())
        .ok_or_else(|| invalid(path, name))
}

fn geometry_name(polygonal: bool) -> &'static str {
    if polygonal { "polygonal" } else { "linear" }
}

fn invalid(path: &PositionPath, geometry: &'static str) -> GeometryError {
    GeometryError::InvalidPositionPath {
        path: *path,
        geometry,
    }
}

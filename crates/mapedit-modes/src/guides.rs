//! Guide overlays and edit handles
//!
//! Guides are transient features a mode asks the host to draw on top of the
//! data. They travel to the host as plain GeoJSON and come back through
//! picks, so an [`EditHandle`] converts to and from a [`Feature`] with the
//! handle metadata stored in its properties.

use mapedit_core::{Feature, FeatureCollection, Geometry, Position, PositionPath};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::Pick;

/// Property value marking a feature as an edit handle
pub const EDIT_HANDLE_GUIDE_TYPE: &str = "editHandle";

/// Kind of edit handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EditHandleType {
    /// Edge midpoint used to start an extrusion
    Intermediate,
    /// Scale box handle
    Scale,
}

/// Scale handle placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HandleShape {
    /// Box corner
    Corner,
    /// Box edge midpoint
    Axe,
}

/// A draggable handle drawn by a mode
#[derive(Debug, Clone, PartialEq)]
pub struct EditHandle {
    /// Handle location
    pub position: Position,
    /// Handle kind
    pub handle_type: EditHandleType,
    /// Feature the handle belongs to (absent for scale handles)
    pub feature_index: Option<usize>,
    /// Vertex path for intermediate handles, handle number for scale handles
    pub position_indexes: Vec<usize>,
    /// Placement on the scale box
    pub shape: Option<HandleShape>,
}

impl EditHandle {
    /// Handle at an edge midpoint
    pub fn intermediate(position: Position, feature_index: usize, path: PositionPath) -> Self {
        Self {
            position,
            handle_type: EditHandleType::Intermediate,
            feature_index: Some(feature_index),
            position_indexes: path.to_indexes(),
            shape: None,
        }
    }

    /// Scale box handle number `index`
    pub fn scale(position: Position, index: usize, shape: HandleShape) -> Self {
        Self {
            position,
            handle_type: EditHandleType::Scale,
            feature_index: None,
            position_indexes: vec![index],
            shape: Some(shape),
        }
    }

    /// Vertex path, when the indexes form one
    pub fn position_path(&self) -> Option<PositionPath> {
        PositionPath::try_from(self.position_indexes.as_slice()).ok()
    }

    /// First index, used to number scale handles
    pub fn guide_index(&self) -> Option<usize> {
        self.position_indexes.first().copied()
    }

    /// GeoJSON form
    pub fn to_feature(&self) -> Feature {
        let mut feature = Feature::new(Geometry::Point(self.position))
            .with_property("guideType", EDIT_HANDLE_GUIDE_TYPE)
            .with_property("editHandleType", enum_value(&self.handle_type))
            .with_property("positionIndexes", self.position_indexes.clone());
        if let Some(feature_index) = self.feature_index {
            feature = feature.with_property("featureIndex", feature_index);
        }
        if let Some(shape) = &self.shape {
            feature = feature.with_property("shape", enum_value(shape));
        }
        feature
    }

    /// Parse the GeoJSON form; `None` when the feature is not an edit handle
    pub fn from_feature(feature: &Feature) -> Option<Self> {
        let properties = &feature.properties;
        if properties.get("guideType")?.as_str()? != EDIT_HANDLE_GUIDE_TYPE {
            return None;
        }
        let Geometry::Point(position) = feature.geometry else {
            return None;
        };
        let handle_type = serde_json::from_value(properties.get("editHandleType")?.clone()).ok()?;
        let position_indexes = match properties.get("positionIndexes") {
            Some(value) => serde_json::from_value(value.clone()).ok()?,
            None => Vec::new(),
        };
        let feature_index = properties
            .get("featureIndex")
            .and_then(Value::as_u64)
            .and_then(|i| usize::try_from(i).ok());
        let shape = properties
            .get("shape")
            .and_then(|value| serde_json::from_value(value.clone()).ok());

        Some(Self {
            position,
            handle_type,
            feature_index,
            position_indexes,
            shape,
        })
    }
}

fn enum_value<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

/// One guide feature
#[derive(Debug, Clone, PartialEq)]
pub enum GuideFeature {
    /// A draggable handle
    EditHandle(EditHandle),
    /// Decoration such as a bounding box outline
    Outline(Feature),
}

impl GuideFeature {
    /// GeoJSON form
    pub fn to_feature(&self) -> Feature {
        match self {
            GuideFeature::EditHandle(handle) => handle.to_feature(),
            GuideFeature::Outline(feature) => feature.clone(),
        }
    }
}

/// Guides produced by a mode for one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GuideFeatureCollection {
    /// Guides in draw order
    pub features: Vec<GuideFeature>,
}

impl GuideFeatureCollection {
    /// Wrap a list of guides
    pub fn new(features: Vec<GuideFeature>) -> Self {
        Self { features }
    }

    /// Number of guides
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Whether no guides were produced
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Edit handles in draw order
    pub fn edit_handles(&self) -> impl Iterator<Item = &EditHandle> {
        self.features.iter().filter_map(|guide| match guide {
            GuideFeature::EditHandle(handle) => Some(handle),
            GuideFeature::Outline(_) => None,
        })
    }

    /// GeoJSON form
    pub fn to_feature_collection(&self) -> FeatureCollection {
        FeatureCollection::new(self.features.iter().map(GuideFeature::to_feature).collect())
    }
}

/// First edit handle among the picks
pub fn picked_edit_handle(picks: &[Pick]) -> Option<EditHandle> {
    picks
        .iter()
        .filter(|pick| pick.is_guide)
        .find_map(|pick| EditHandle::from_feature(&pick.object))
}

/// First intermediate edit handle among the picks
pub fn picked_intermediate_edit_handle(picks: &[Pick]) -> Option<EditHandle> {
    picked_edit_handle(picks).filter(|handle| handle.handle_type == EditHandleType::Intermediate)
}

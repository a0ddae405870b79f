//! Host-facing mode contract types

use mapedit_core::{Feature, FeatureCollection, Position, PositionPath};
use serde::{Deserialize, Serialize};

use crate::config::ModeConfig;
use crate::cursor::Cursor;

/// An object under the pointer, as reported by the host's pick pass
#[derive(Debug, Clone, PartialEq)]
pub struct Pick {
    /// Index of the picked object in its layer
    pub index: usize,
    /// Whether the object is a guide rather than a data feature
    pub is_guide: bool,
    /// The picked feature (guides are delivered in GeoJSON form)
    pub object: Feature,
}

impl Pick {
    /// Pick of a data feature
    pub fn feature(index: usize, object: Feature) -> Self {
        Self {
            index,
            is_guide: false,
            object,
        }
    }

    /// Pick of a guide feature
    pub fn guide(index: usize, object: Feature) -> Self {
        Self {
            index,
            is_guide: true,
            object,
        }
    }
}

/// Pointer moved without a drag in progress
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointerMoveEvent {
    /// Objects under the pointer
    pub picks: Vec<Pick>,
    /// Pointer position in map coordinates
    pub map_coords: Position,
    /// Objects that were under the pointer when the button went down
    pub pointer_down_picks: Option<Vec<Pick>>,
    /// Map position where the button went down
    pub pointer_down_map_coords: Option<Position>,
}

/// Drag start, drag update or drag stop
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DragEvent {
    /// Objects under the pointer now
    pub picks: Vec<Pick>,
    /// Pointer position in map coordinates
    pub map_coords: Position,
    /// Objects that were under the pointer when the button went down
    pub pointer_down_picks: Vec<Pick>,
    /// Map position where the button went down
    pub pointer_down_map_coords: Position,
}

/// Camera state supplied by the host
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    /// Map rotation in degrees
    pub bearing: f64,
}

/// Everything a mode may read while handling an event
#[derive(Debug, Clone, Copy)]
pub struct ModeProps<'a> {
    /// Authoritative feature collection (read only)
    pub data: &'a FeatureCollection,
    /// Indexes of the selected features
    pub selected_indexes: &'a [usize],
    /// Mode configuration
    pub mode_config: &'a ModeConfig,
    /// Current camera state, if known
    pub view_state: Option<ViewState>,
}

impl<'a> ModeProps<'a> {
    /// Create props without a view state
    pub fn new(
        data: &'a FeatureCollection,
        selected_indexes: &'a [usize],
        mode_config: &'a ModeConfig,
    ) -> Self {
        Self {
            data,
            selected_indexes,
            mode_config,
            view_state: None,
        }
    }

    /// Attach a view state
    pub fn with_view_state(mut self, view_state: ViewState) -> Self {
        self.view_state = Some(view_state);
        self
    }

    /// Effective view bearing: config override, then camera, then north-up
    pub fn view_bearing(&self) -> f64 {
        self.mode_config
            .bearing
            .or(self.view_state.map(|v| v.bearing))
            .unwrap_or(0.0)
    }

    /// Selected features that exist in the data, in selection order
    pub fn selected_features(&self) -> Vec<(usize, &'a Feature)> {
        self.selected_indexes
            .iter()
            .filter_map(|&index| self.data.features.get(index).map(|f| (index, f)))
            .collect()
    }
}

/// Kind of change carried by an [`EditAction`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EditType {
    /// Extrusion gesture began (vertices may have been inserted)
    StartExtruding,
    /// Extrusion in progress
    Extruding,
    /// Extrusion finished
    Extruded,
    /// Scale in progress
    Scaling,
    /// Scale finished
    Scaled,
}

impl EditType {
    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            EditType::StartExtruding => "startExtruding",
            EditType::Extruding => "extruding",
            EditType::Extruded => "extruded",
            EditType::Scaling => "scaling",
            EditType::Scaled => "scaled",
        }
    }
}

/// What an edit touched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditContext {
    /// Edited features
    pub feature_indexes: Vec<usize>,
    /// Edited vertex, when the edit is vertex-specific
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_indexes: Option<PositionPath>,
    /// Relevant position, when the edit is vertex-specific
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

/// Edit descriptor handed to the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditAction {
    /// The collection the host should adopt
    pub updated_data: FeatureCollection,
    /// Kind of edit
    pub edit_type: EditType,
    /// What was touched
    pub edit_context: EditContext,
}

/// Callbacks a mode uses to talk back to its host
pub trait ModeHost {
    /// Propose a new collection
    fn on_edit(&mut self, action: EditAction);

    /// Set the cursor (`None` restores the default)
    fn on_update_cursor(&mut self, cursor: Option<Cursor>);

    /// Suppress the map pan the current drag would otherwise cause
    fn cancel_pan(&mut self);
}

/// Host that records every callback
#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    /// Edits in arrival order
    pub edits: Vec<EditAction>,
    /// Cursor updates in arrival order
    pub cursor_updates: Vec<Option<Cursor>>,
    /// Number of pan cancellations
    pub pans_cancelled: usize,
}

impl RecordingHost {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent edit
    pub fn last_edit(&self) -> Option<&EditAction> {
        self.edits.last()
    }

    /// Cursor after the most recent update (`None` if never set)
    pub fn cursor(&self) -> Option<Cursor> {
        self.cursor_updates.last().copied().flatten()
    }

    /// Forget everything recorded so far
    pub fn clear(&mut self) {
        self.edits.clear();
        self.cursor_updates.clear();
        self.pans_cancelled = 0;
    }
}

impl ModeHost for RecordingHost {
    fn on_edit(&mut self, action: EditAction) {
        self.edits.push(action);
    }

    fn on_update_cursor(&mut self, cursor: Option<Cursor>) {
        self.cursor_updates.push(cursor);
    }

    fn cancel_pan(&mut self) {
        self.pans_cancelled += 1;
    }
}

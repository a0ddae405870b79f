//! Scale mode
//!
//! The selection is framed by a box with a handle on each corner. Dragging
//! a handle scales the selection uniformly about the opposite handle, by the
//! ratio of the pointer's distances from that anchor.

use glam::DVec2;
use mapedit_core::{
    Feature, FeatureCollection, Geometry, GeometryOps, GeometryResult, ImmutableFeatureCollection,
    Position, bbox, center_of_mass, default_ops, midpoint, polygon_to_line,
};
use tracing::{debug, trace, warn};

use crate::cursor::{Cursor, cursor_for_bearing};
use crate::guides::{
    EditHandle, EditHandleType, GuideFeature, GuideFeatureCollection, HandleShape,
    picked_edit_handle,
};
use crate::mode::EditMode;
use crate::types::{
    DragEvent, EditAction, EditContext, EditType, ModeHost, ModeProps, PointerMoveEvent,
};

/// Gesture state
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ScaleState {
    /// No handle under the pointer
    #[default]
    Idle,
    /// Pointer over a scale handle
    Hovering(EditHandle),
    /// Dragging a scale handle
    Scaling {
        /// The dragged handle
        handle: EditHandle,
        /// Fixed point of the scale (the opposite handle)
        origin: DVec2,
        /// Selected geometries as they were when the drag began
        snapshot: Vec<(usize, Geometry)>,
    },
}

/// Uniform scaling of the selection
#[derive(Debug)]
pub struct ScaleMode {
    ops: Box<dyn GeometryOps>,
    state: ScaleState,
    cursor: Option<Cursor>,
}

impl Default for ScaleMode {
    fn default() -> Self {
        Self::new()
    }
}

/// Ratio of the pointer's distance from `origin` now to when the drag began
///
/// `None` when the drag began on the origin itself.
pub fn scale_factor(
    ops: &dyn GeometryOps,
    origin: DVec2,
    start: DVec2,
    current: DVec2,
) -> Option<f64> {
    let start_distance = ops.distance(origin, start);
    if start_distance == 0.0 {
        return None;
    }
    Some(ops.distance(origin, current) / start_distance)
}

impl ScaleMode {
    /// Create with the default geometry kernel
    pub fn new() -> Self {
        Self::with_ops(default_ops())
    }

    /// Create with a specific geometry kernel
    pub fn with_ops(ops: Box<dyn GeometryOps>) -> Self {
        Self {
            ops,
            state: ScaleState::Idle,
            cursor: None,
        }
    }

    /// Current gesture state
    pub fn state(&self) -> &ScaleState {
        &self.state
    }

    /// Last cursor reported to the host
    pub fn cursor(&self) -> Option<Cursor> {
        self.cursor
    }

    /// Box around the selection as a closed polygon
    ///
    /// `None` for an empty selection or a lone point. With
    /// `rotate_bounding_box` and a non-zero view bearing, each feature is
    /// turned upright about its own center of mass, boxed, and the box is
    /// turned back about the center of the upright set.
    pub fn bounding_box(&self, props: &ModeProps<'_>) -> Option<Geometry> {
        let selected: Vec<&Feature> = props.selected_features().into_iter().map(|(_, f)| f).collect();
        if let [only] = selected.as_slice() {
            if matches!(only.geometry, Geometry::Point(_)) {
                return None;
            }
        }

        let bearing = if props.mode_config.rotate_bounding_box {
            props.view_bearing()
        } else {
            0.0
        };
        if bearing == 0.0 {
            return Some(bbox(selected)?.to_polygon());
        }

        let upright = selected
            .iter()
            .map(|f| {
                let pivot = center_of_mass([*f])?;
                Some(Feature::new(self.ops.rotate(&f.geometry, -bearing, pivot)))
            })
            .collect::<Option<Vec<Feature>>>()?;
        let frame = bbox(&upright)?.to_polygon();
        let centroid = center_of_mass(&upright)?;
        Some(self.ops.rotate(&frame, bearing, centroid))
    }

    /// Handles for the current selection, corners first
    pub fn scale_handles(&self, props: &ModeProps<'_>) -> Vec<EditHandle> {
        match self.bounding_box(props) {
            Some(frame) => self.handles_for_box(&frame, props.mode_config.axis_handles),
            None => Vec::new(),
        }
    }

    fn handles_for_box(&self, frame: &Geometry, axis_handles: bool) -> Vec<EditHandle> {
        let Geometry::Polygon(rings) = frame else {
            return Vec::new();
        };
        let Some(ring) = rings.first() else {
            return Vec::new();
        };

        let mut corners: Vec<Position> = Vec::with_capacity(4);
        for p in ring {
            if !corners.contains(p) {
                corners.push(*p);
            }
        }
        let mut handles: Vec<EditHandle> = corners
            .iter()
            .enumerate()
            .map(|(i, p)| EditHandle::scale(*p, i, HandleShape::Corner))
            .collect();

        if axis_handles {
            handles.extend(
                ring.windows(2)
                    .enumerate()
                    .map(|(i, edge)| EditHandle::scale(midpoint(&edge[0], &edge[1]), i, HandleShape::Axe)),
            );
        }
        handles
    }

    /// Handle across the box from `handle`, among handles of the same shape
    fn opposite_handle<'a>(handle: &EditHandle, handles: &'a [EditHandle]) -> Option<&'a EditHandle> {
        let index = handle.guide_index()?;
        let same_shape: Vec<&EditHandle> =
            handles.iter().filter(|h| h.shape == handle.shape).collect();
        if same_shape.is_empty() {
            return None;
        }
        let opposite = (index + same_shape.len() / 2) % same_shape.len();
        same_shape
            .into_iter()
            .find(|h| h.guide_index() == Some(opposite))
    }

    fn update_cursor(&mut self, props: &ModeProps<'_>, host: &mut dyn ModeHost) {
        self.cursor = match &self.state {
            ScaleState::Hovering(handle) => {
                let selected = props.selected_features();
                center_of_mass(selected.iter().map(|(_, f)| *f)).map(|center| {
                    let bearing = self.ops.bearing(center, handle.position.to_vec2());
                    cursor_for_bearing(bearing, props.view_bearing())
                })
            }
            _ => None,
        };
        host.on_update_cursor(self.cursor);
    }

    /// Snapshot scaled about the origin, written over the current data
    fn scaled_data(
        &self,
        data: &FeatureCollection,
        snapshot: &[(usize, Geometry)],
        factor: f64,
        origin: DVec2,
    ) -> GeometryResult<FeatureCollection> {
        let mut updated = ImmutableFeatureCollection::new(data);
        for (index, geometry) in snapshot {
            updated = updated.replace_geometry(*index, self.ops.scale(geometry, factor, origin))?;
        }
        Ok(updated.get_object())
    }

    fn scale_action(
        &self,
        event: &DragEvent,
        props: &ModeProps<'_>,
        edit_type: EditType,
    ) -> Option<EditAction> {
        let ScaleState::Scaling {
            origin, snapshot, ..
        } = &self.state
        else {
            return None;
        };
        let Some(factor) = scale_factor(
            self.ops.as_ref(),
            *origin,
            event.pointer_down_map_coords.to_vec2(),
            event.map_coords.to_vec2(),
        ) else {
            trace!("Drag started on the scale origin");
            return None;
        };

        trace!("Scale factor {}", factor);
        let updated_data = match self.scaled_data(props.data, snapshot, factor, *origin) {
            Ok(data) => data,
            Err(e) => {
                warn!("Failed to scale selection: {}", e);
                return None;
            }
        };
        Some(EditAction {
            updated_data,
            edit_type,
            edit_context: EditContext {
                feature_indexes: snapshot.iter().map(|(index, _)| *index).collect(),
                ..EditContext::default()
            },
        })
    }
}

impl EditMode for ScaleMode {
    fn name(&self) -> &str {
        "scale"
    }

    fn handle_pointer_move(
        &mut self,
        event: &PointerMoveEvent,
        props: &ModeProps<'_>,
        host: &mut dyn ModeHost,
    ) {
        if matches!(self.state, ScaleState::Scaling { .. }) {
            return;
        }
        self.state = match picked_edit_handle(&event.picks) {
            Some(handle) if handle.handle_type == EditHandleType::Scale => {
                ScaleState::Hovering(handle)
            }
            _ => ScaleState::Idle,
        };
        self.update_cursor(props, host);
    }

    fn handle_start_dragging(
        &mut self,
        _event: &DragEvent,
        props: &ModeProps<'_>,
        _host: &mut dyn ModeHost,
    ) {
        let ScaleState::Hovering(handle) = &self.state else {
            return;
        };

        let handles = self.scale_handles(props);
        let Some(opposite) = Self::opposite_handle(handle, &handles) else {
            trace!("No handle opposite {:?}", handle.position_indexes);
            return;
        };
        let origin = opposite.position.to_vec2();
        let snapshot: Vec<(usize, Geometry)> = props
            .selected_features()
            .into_iter()
            .map(|(index, f)| (index, f.geometry.clone()))
            .collect();

        debug!(
            "Start scaling {} features about ({}, {})",
            snapshot.len(),
            origin.x,
            origin.y
        );
        self.state = ScaleState::Scaling {
            handle: handle.clone(),
            origin,
            snapshot,
        };
    }

    fn handle_dragging(&mut self, event: &DragEvent, props: &ModeProps<'_>, host: &mut dyn ModeHost) {
        if !matches!(self.state, ScaleState::Scaling { .. }) {
            return;
        }
        host.on_update_cursor(self.cursor);
        if let Some(action) = self.scale_action(event, props, EditType::Scaling) {
            host.on_edit(action);
        }
        host.cancel_pan();
    }

    fn handle_stop_dragging(
        &mut self,
        event: &DragEvent,
        props: &ModeProps<'_>,
        host: &mut dyn ModeHost,
    ) {
        if matches!(self.state, ScaleState::Scaling { .. }) {
            if let Some(action) = self.scale_action(event, props, EditType::Scaled) {
                host.on_edit(action);
            }
            host.on_update_cursor(None);
            debug!("Stop scaling");
        }
        self.state = ScaleState::Idle;
        self.cursor = None;
    }

    fn guides(&self, props: &ModeProps<'_>) -> GuideFeatureCollection {
        let Some(frame) = self.bounding_box(props) else {
            return GuideFeatureCollection::default();
        };

        let mut guides = Vec::new();
        if let Some(outline) = polygon_to_line(&frame) {
            guides.push(GuideFeature::Outline(
                Feature::new(outline).with_property("mode", "scale"),
            ));
        }
        guides.extend(
            self.handles_for_box(&frame, props.mode_config.axis_handles)
                .into_iter()
                .map(GuideFeature::EditHandle),
        );
        GuideFeatureCollection::new(guides)
    }

    fn is_active(&self) -> bool {
        matches!(self.state, ScaleState::Scaling { .. })
    }
}

//! Extrude mode
//!
//! Dragging the midpoint handle of a polygon edge pushes that edge out
//! parallel to itself. When a corner at either end of the edge is not a
//! right angle, a copy of the corner is inserted first so the neighbouring
//! edges stay in place and new side edges join the moved one.

use glam::DVec2;
use mapedit_core::{
    FeatureCollection, GeometryOps, GeometryResult, ImmutableFeatureCollection, Position,
    PositionPath, center_of_mass, coordinates_size, default_ops, midpoint,
    point_for_position_indexes,
};
use tracing::{debug, trace, warn};

use crate::cursor::cursor_for_bearing;
use crate::guides::{
    EditHandle, GuideFeature, GuideFeatureCollection, picked_intermediate_edit_handle,
};
use crate::mode::EditMode;
use crate::types::{
    DragEvent, EditAction, EditContext, EditType, ModeHost, ModeProps, PointerMoveEvent,
};

/// Corner angle differences (whole degrees) accepted as a right angle
const ORTHOGONAL_ANGLES: [i32; 6] = [89, 90, 91, 269, 270, 271];

/// Gesture state
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum ExtrudeState {
    /// Waiting for a drag on an edge handle
    #[default]
    Idle,
    /// Dragging an edge
    Extruding {
        /// Feature being edited
        feature_index: usize,
        /// Path of the dragged edge's end vertex, as picked
        path: PositionPath,
        /// Whether a copy of the edge's start corner was inserted
        point_added: bool,
    },
}

/// Edge extrusion for polygons
#[derive(Debug)]
pub struct ExtrudeMode {
    ops: Box<dyn GeometryOps>,
    state: ExtrudeState,
}

impl Default for ExtrudeMode {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of moving the dragged edge
struct Extrusion {
    data: FeatureCollection,
    path: PositionPath,
    size: usize,
    position: Position,
}

impl ExtrudeMode {
    /// Create with the default geometry kernel
    pub fn new() -> Self {
        Self::with_ops(default_ops())
    }

    /// Create with a specific geometry kernel
    pub fn with_ops(ops: Box<dyn GeometryOps>) -> Self {
        Self {
            ops,
            state: ExtrudeState::Idle,
        }
    }

    /// Current gesture state
    pub fn state(&self) -> ExtrudeState {
        self.state
    }

    /// Bearing from `p1` to `p2` in whole degrees, `0..360`
    pub fn get_bearing(&self, p1: DVec2, p2: DVec2) -> i32 {
        let angle = self.ops.bearing(p1, p2);
        let angle = if angle < 0.0 { 360.0 + angle } else { angle };
        (angle.floor() as i32).rem_euclid(360)
    }

    /// Whether the ring corner at `path` is (close to) a right angle
    ///
    /// The closing index `size - 1` is the same corner as vertex 0. A corner
    /// whose neighbours cannot be resolved is not orthogonal.
    pub fn is_orthogonal(
        &self,
        path: &PositionPath,
        feature_index: usize,
        size: usize,
        data: &FeatureCollection,
    ) -> bool {
        let corner = if size > 0 && path.vertex() == size - 1 {
            path.with_vertex(0)
        } else {
            *path
        };
        let lookup = |p: &PositionPath| point_for_position_indexes(Some(p), feature_index, data);
        let (Some(prev), Some(current), Some(next)) = (
            lookup(&corner.prev(size)),
            lookup(&corner),
            lookup(&corner.next(size)),
        ) else {
            return false;
        };

        let prev_angle = self.get_bearing(current.to_vec2(), prev.to_vec2());
        let next_angle = self.get_bearing(current.to_vec2(), next.to_vec2());
        ORTHOGONAL_ANGLES.contains(&(prev_angle - next_angle).abs())
    }

    /// Insert corner copies for a drag on the edge ending at `path`
    fn insert_corners(
        &self,
        data: &FeatureCollection,
        feature_index: usize,
        path: &PositionPath,
        size: usize,
        (p1, p2): (Position, Position),
    ) -> GeometryResult<(FeatureCollection, bool)> {
        let mut updated = ImmutableFeatureCollection::new(data);
        if !self.is_orthogonal(path, feature_index, size, data) {
            updated = updated.add_position(feature_index, path, p2)?;
        }
        let mut point_added = false;
        if !self.is_orthogonal(&path.prev(size), feature_index, size, data) {
            updated = updated.add_position(feature_index, path, p1)?;
            point_added = true;
        }
        Ok((updated.get_object(), point_added))
    }

    /// Move the dragged edge so it passes through `pointer`
    ///
    /// `Ok(None)` when the edge no longer resolves in `data`.
    fn extrude(
        &self,
        data: &FeatureCollection,
        feature_index: usize,
        picked: &PositionPath,
        point_added: bool,
        pointer: &Position,
    ) -> GeometryResult<Option<Extrusion>> {
        let size = coordinates_size(Some(picked), feature_index, data);
        let path = if point_added {
            picked.next(size)
        } else {
            *picked
        };
        let prev = path.prev(size);
        let (Some(p1), Some(p2)) = (
            point_for_position_indexes(Some(&prev), feature_index, data),
            point_for_position_indexes(Some(&path), feature_index, data),
        ) else {
            return Ok(None);
        };

        let (p3, p4) = points_parallel_to_line(self.ops.as_ref(), &p1, &p2, pointer);
        let updated = ImmutableFeatureCollection::new(data)
            .replace_position(feature_index, &prev, p4)?
            .replace_position(feature_index, &path, p3)?;
        Ok(Some(Extrusion {
            data: updated.get_object(),
            path,
            size,
            position: p3,
        }))
    }

    /// Shared body of drag and drag stop
    fn emit_extrusion(
        &self,
        event: &DragEvent,
        props: &ModeProps<'_>,
        host: &mut dyn ModeHost,
        edit_type: EditType,
    ) -> bool {
        let ExtrudeState::Extruding {
            feature_index,
            path,
            point_added,
        } = self.state
        else {
            return false;
        };

        let extrusion = match self.extrude(
            props.data,
            feature_index,
            &path,
            point_added,
            &event.map_coords,
        ) {
            Ok(Some(extrusion)) => extrusion,
            Ok(None) => {
                trace!("Extruded edge at {} no longer resolves", path);
                return false;
            }
            Err(e) => {
                warn!("Failed to extrude feature {}: {}", feature_index, e);
                return false;
            }
        };

        let position_indexes = match edit_type {
            EditType::Extruding => extrusion.path.next(extrusion.size),
            _ => extrusion.path,
        };
        host.on_edit(EditAction {
            updated_data: extrusion.data,
            edit_type,
            edit_context: EditContext {
                feature_indexes: vec![feature_index],
                position_indexes: Some(position_indexes),
                position: Some(extrusion.position),
            },
        });
        true
    }
}

/// Ends of a segment parallel to `p1 -> p2` passing through `pointer`
///
/// Returns `(p3, p4)` where `p3` is offset from `p2` and `p4` from `p1`.
pub fn points_parallel_to_line(
    ops: &dyn GeometryOps,
    p1: &Position,
    p2: &Position,
    pointer: &Position,
) -> (Position, Position) {
    let (a, b, m) = (p1.to_vec2(), p2.to_vec2(), pointer.to_vec2());
    let distance = ops.point_to_line_distance(m, a, b);
    let line_bearing = ops.bearing(a, b);

    // negative when the pointer is left of the line
    let side = (m.x - a.x) * (b.y - a.y) - (m.y - a.y) * (b.x - a.x);
    let orthogonal_bearing = if side < 0.0 {
        line_bearing - 90.0
    } else {
        line_bearing - 270.0
    };

    let p3 = p2.with_vec2(ops.destination(b, distance, orthogonal_bearing));
    let p4 = p1.with_vec2(ops.destination(a, distance, orthogonal_bearing));
    (p3, p4)
}

impl EditMode for ExtrudeMode {
    fn name(&self) -> &str {
        "extrude"
    }

    fn handle_pointer_move(
        &mut self,
        event: &PointerMoveEvent,
        props: &ModeProps<'_>,
        host: &mut dyn ModeHost,
    ) {
        let cursor = picked_intermediate_edit_handle(&event.picks).and_then(|handle| {
            let selected = props.selected_features();
            let center = center_of_mass(selected.iter().map(|(_, f)| *f))?;
            let bearing = self.ops.bearing(center, handle.position.to_vec2());
            Some(cursor_for_bearing(bearing, props.view_bearing()))
        });
        host.on_update_cursor(cursor);
    }

    fn handle_start_dragging(
        &mut self,
        event: &DragEvent,
        props: &ModeProps<'_>,
        host: &mut dyn ModeHost,
    ) {
        if props.selected_indexes.is_empty() {
            return;
        }
        let Some(handle) = picked_intermediate_edit_handle(&event.picks) else {
            return;
        };
        let (Some(feature_index), Some(path)) = (handle.feature_index, handle.position_path())
        else {
            trace!("Intermediate handle without a vertex path");
            return;
        };

        let size = coordinates_size(Some(&path), feature_index, props.data);
        let (Some(p1), Some(p2)) = (
            point_for_position_indexes(Some(&path.prev(size)), feature_index, props.data),
            point_for_position_indexes(Some(&path), feature_index, props.data),
        ) else {
            trace!("Edge {} of feature {} does not resolve", path, feature_index);
            return;
        };

        let (updated_data, point_added) =
            match self.insert_corners(props.data, feature_index, &path, size, (p1, p2)) {
                Ok(result) => result,
                Err(e) => {
                    warn!("Failed to start extruding feature {}: {}", feature_index, e);
                    return;
                }
            };

        debug!(
            "Start extruding feature {} at {} (point added: {})",
            feature_index, path, point_added
        );
        self.state = ExtrudeState::Extruding {
            feature_index,
            path,
            point_added,
        };
        host.on_edit(EditAction {
            updated_data,
            edit_type: EditType::StartExtruding,
            edit_context: EditContext {
                feature_indexes: vec![feature_index],
                position_indexes: Some(path),
                position: Some(p1),
            },
        });
    }

    fn handle_dragging(&mut self, event: &DragEvent, props: &ModeProps<'_>, host: &mut dyn ModeHost) {
        if self.emit_extrusion(event, props, host, EditType::Extruding) {
            host.cancel_pan();
        }
    }

    fn handle_stop_dragging(
        &mut self,
        event: &DragEvent,
        props: &ModeProps<'_>,
        host: &mut dyn ModeHost,
    ) {
        if !props.selected_indexes.is_empty() {
            self.emit_extrusion(event, props, host, EditType::Extruded);
        }
        if self.state != ExtrudeState::Idle {
            debug!("Stop extruding");
        }
        self.state = ExtrudeState::Idle;
    }

    fn guides(&self, props: &ModeProps<'_>) -> GuideFeatureCollection {
        let mut handles = Vec::new();
        for (feature_index, feature) in props.selected_features() {
            if !feature.geometry.is_polygonal() {
                continue;
            }
            for (address, ring) in feature.geometry.rings() {
                for (i, pair) in ring.windows(2).enumerate() {
                    handles.push(GuideFeature::EditHandle(EditHandle::intermediate(
                        midpoint(&pair[0], &pair[1]),
                        feature_index,
                        address.vertex(i + 1),
                    )));
                }
            }
        }
        GuideFeatureCollection::new(handles)
    }

    fn is_active(&self) -> bool {
        matches!(self.state, ExtrudeState::Extruding { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModeConfig;
    use crate::cursor::Cursor;
    use crate::types::{Pick, RecordingHost};
    use approx::assert_relative_eq;
    use mapedit_core::{Feature, Geometry, PlanarOps};

    fn polygon(coords: &[[f64; 2]]) -> FeatureCollection {
        FeatureCollection::new(vec![Feature::new(Geometry::Polygon(vec![
            coords.iter().copied().map(Position::from).collect(),
        ]))])
    }

    fn square() -> FeatureCollection {
        polygon(&[[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]])
    }

    fn ring(data: &FeatureCollection) -> Vec<Position> {
        match &data.features[0].geometry {
            Geometry::Polygon(rings) => rings[0].clone(),
            other => panic!("expected polygon, got {}", other.type_name()),
        }
    }

    fn planar_mode() -> ExtrudeMode {
        ExtrudeMode::with_ops(Box::new(PlanarOps))
    }

    fn handle_pick(mode: &ExtrudeMode, props: &ModeProps<'_>, indexes: &[usize]) -> Pick {
        let guides = mode.guides(props);
        let (index, handle) = guides
            .edit_handles()
            .enumerate()
            .find(|(_, h)| h.position_indexes == indexes)
            .expect("handle for edge");
        Pick::guide(index, handle.to_feature())
    }

    fn drag_event(pick: &Pick, pointer: [f64; 2]) -> DragEvent {
        DragEvent {
            picks: vec![pick.clone()],
            map_coords: Position::from(pointer),
            pointer_down_picks: vec![pick.clone()],
            pointer_down_map_coords: pick.object.geometry.positions()[0],
        }
    }

    /// Run a full gesture, adopting each edit as the host would
    fn extrude_gesture(
        mode: &mut ExtrudeMode,
        data: FeatureCollection,
        indexes: &[usize],
        pointer: [f64; 2],
    ) -> (FeatureCollection, RecordingHost) {
        let config = ModeConfig::default();
        let selected = [0];
        let mut host = RecordingHost::new();
        let mut data = data;

        let pick = handle_pick(mode, &ModeProps::new(&data, &selected, &config), indexes);
        let event = drag_event(&pick, pointer);

        mode.handle_start_dragging(&event, &ModeProps::new(&data, &selected, &config), &mut host);
        if let Some(edit) = host.last_edit() {
            data = edit.updated_data.clone();
        }
        mode.handle_dragging(&event, &ModeProps::new(&data, &selected, &config), &mut host);
        if let Some(edit) = host.last_edit() {
            data = edit.updated_data.clone();
        }
        mode.handle_stop_dragging(&event, &ModeProps::new(&data, &selected, &config), &mut host);
        if let Some(edit) = host.last_edit() {
            data = edit.updated_data.clone();
        }
        (data, host)
    }

    #[test]
    fn test_guides_cover_every_edge() {
        let data = square();
        let config = ModeConfig::default();
        let mode = planar_mode();
        let guides = mode.guides(&ModeProps::new(&data, &[0], &config));

        let handles: Vec<&EditHandle> = guides.edit_handles().collect();
        assert_eq!(handles.len(), 4);
        assert_eq!(handles[0].position, Position::new(0.0, 0.5));
        assert_eq!(handles[0].position_indexes, vec![0, 1]);
        assert_eq!(handles[3].position_indexes, vec![0, 4]);
        assert!(handles.iter().all(|h| h.feature_index == Some(0)));

        // no selection, no guides
        assert!(mode.guides(&ModeProps::new(&data, &[], &config)).is_empty());
    }

    #[test]
    fn test_guides_use_real_feature_index() {
        let mut data = square();
        data.features.insert(0, Feature::new(Geometry::Point(Position::new(5.0, 5.0))));
        let config = ModeConfig::default();
        let guides = planar_mode().guides(&ModeProps::new(&data, &[0, 1], &config));
        assert_eq!(guides.len(), 4);
        assert!(guides.edit_handles().all(|h| h.feature_index == Some(1)));
    }

    #[test]
    fn test_get_bearing_range() {
        let mode = planar_mode();
        assert_eq!(mode.get_bearing(DVec2::ZERO, DVec2::new(1.0, 2.0)), 26);
        assert_eq!(mode.get_bearing(DVec2::ZERO, DVec2::new(-1.0, 2.0)), 333);
        assert_eq!(mode.get_bearing(DVec2::ZERO, DVec2::new(-1.0, -2.0)), 206);
    }

    #[test]
    fn test_square_corners_are_orthogonal() {
        let data = square();
        let mode = planar_mode();
        for vertex in 0..5 {
            let path = PositionPath::Ring { ring: 0, vertex };
            assert!(mode.is_orthogonal(&path, 0, 5, &data), "vertex {}", vertex);
        }
    }

    #[test]
    fn test_orthogonality_ignores_winding() {
        let coords = [[0.0, 0.0], [0.0, 2.0], [1.0, 2.0], [2.0, 0.0], [0.0, 0.0]];
        let mut reversed = coords;
        reversed.reverse();
        let (forward, backward) = (polygon(&coords), polygon(&reversed));
        let mode = planar_mode();

        let expected = [true, true, false, false];
        for (vertex, &orthogonal) in expected.iter().enumerate() {
            let path = PositionPath::Ring { ring: 0, vertex };
            let mirrored = PositionPath::Ring {
                ring: 0,
                vertex: 4 - vertex,
            };
            assert_eq!(mode.is_orthogonal(&path, 0, 5, &forward), orthogonal);
            assert_eq!(mode.is_orthogonal(&mirrored, 0, 5, &backward), orthogonal);
        }
    }

    #[test]
    fn test_is_orthogonal_unresolvable() {
        let data = square();
        let mode = planar_mode();
        let path = PositionPath::Ring { ring: 3, vertex: 1 };
        assert!(!mode.is_orthogonal(&path, 0, 5, &data));
        assert!(!mode.is_orthogonal(&path, 7, 5, &data));
    }

    #[test]
    fn test_points_parallel_to_line() {
        let (p1, p2) = (Position::new(0.0, 1.0), Position::new(1.0, 1.0));
        let (p3, p4) = points_parallel_to_line(&PlanarOps, &p1, &p2, &Position::new(0.5, 2.0));
        assert_relative_eq!(p3.lng, 1.0, epsilon = 1e-12);
        assert_relative_eq!(p3.lat, 2.0, epsilon = 1e-12);
        assert_relative_eq!(p4.lng, 0.0, epsilon = 1e-12);
        assert_relative_eq!(p4.lat, 2.0, epsilon = 1e-12);

        // pointer on the other side
        let (p3, p4) = points_parallel_to_line(&PlanarOps, &p1, &p2, &Position::new(0.5, 0.25));
        assert_relative_eq!(p3.lat, 0.25, epsilon = 1e-12);
        assert_relative_eq!(p4.lat, 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_extrude_square_edge() {
        let mut mode = planar_mode();
        let (data, host) = extrude_gesture(&mut mode, square(), &[0, 2], [0.5, 2.0]);

        let types: Vec<EditType> = host.edits.iter().map(|e| e.edit_type).collect();
        assert_eq!(
            types,
            vec![EditType::StartExtruding, EditType::Extruding, EditType::Extruded]
        );
        // right-angled corners need no new vertices
        assert_eq!(host.edits[0].updated_data, square());
        assert_eq!(host.pans_cancelled, 1);

        let extruding = &host.edits[1].edit_context;
        assert_eq!(extruding.feature_indexes, vec![0]);
        assert_eq!(
            extruding.position_indexes,
            Some(PositionPath::Ring { ring: 0, vertex: 3 })
        );

        let expected: Vec<Position> = [[0.0, 0.0], [0.0, 2.0], [1.0, 2.0], [1.0, 0.0], [0.0, 0.0]]
            .into_iter()
            .map(Position::from)
            .collect();
        for (actual, expected) in ring(&data).iter().zip(&expected) {
            assert_relative_eq!(actual.lng, expected.lng, epsilon = 1e-12);
            assert_relative_eq!(actual.lat, expected.lat, epsilon = 1e-12);
        }
        assert_eq!(mode.state(), ExtrudeState::Idle);
    }

    #[test]
    fn test_extrude_inserts_corner_copies() {
        let mut mode = planar_mode();
        let triangle = polygon(&[[0.0, 0.0], [2.0, 0.0], [1.0, 2.0], [0.0, 0.0]]);
        let (data, host) = extrude_gesture(&mut mode, triangle, &[0, 2], [3.0, 2.0]);

        let started = &host.edits[0];
        assert_eq!(started.edit_type, EditType::StartExtruding);
        assert_eq!(ring(&started.updated_data).len(), 6);
        assert_eq!(started.edit_context.position, Some(Position::new(2.0, 0.0)));

        let result = ring(&data);
        assert_eq!(result.len(), 6);
        assert_eq!(result[0], Position::new(0.0, 0.0));
        assert_eq!(result[1], Position::new(2.0, 0.0));
        assert_eq!(result[4], Position::new(1.0, 2.0));
        assert_eq!(result[5], result[0]);

        // the moved edge is the original one shifted by (1.6, 0.8)
        assert_relative_eq!(result[2].lng, 3.6, epsilon = 1e-9);
        assert_relative_eq!(result[2].lat, 0.8, epsilon = 1e-9);
        assert_relative_eq!(result[3].lng, 2.6, epsilon = 1e-9);
        assert_relative_eq!(result[3].lat, 2.8, epsilon = 1e-9);

        let extruded = host.last_edit().unwrap();
        assert_eq!(extruded.edit_type, EditType::Extruded);
        assert_eq!(
            extruded.edit_context.position_indexes,
            Some(PositionPath::Ring { ring: 0, vertex: 3 })
        );
    }

    #[test]
    fn test_extrude_closing_edge() {
        let mut mode = planar_mode();
        let triangle = polygon(&[[0.0, 0.0], [2.0, 0.0], [1.0, 2.0], [0.0, 0.0]]);
        let (data, host) = extrude_gesture(&mut mode, triangle, &[0, 3], [-1.0, 2.0]);

        let types: Vec<EditType> = host.edits.iter().map(|e| e.edit_type).collect();
        assert_eq!(
            types,
            vec![EditType::StartExtruding, EditType::Extruding, EditType::Extruded]
        );

        // both corners get a copy, and the ring stays closed on the untouched vertex
        let result = ring(&data);
        assert_eq!(result.len(), 6);
        assert_eq!(result[0], Position::new(0.0, 0.0));
        assert_eq!(result[1], Position::new(2.0, 0.0));
        assert_eq!(result[2], Position::new(1.0, 2.0));
        assert_eq!(result[5], Position::new(0.0, 0.0));
        assert_relative_eq!(result[3].lng, -0.6, epsilon = 1e-9);
        assert_relative_eq!(result[3].lat, 2.8, epsilon = 1e-9);
        assert_relative_eq!(result[4].lng, -1.6, epsilon = 1e-9);
        assert_relative_eq!(result[4].lat, 0.8, epsilon = 1e-9);

        assert_eq!(
            host.last_edit().unwrap().edit_context.position_indexes,
            Some(PositionPath::Ring { ring: 0, vertex: 4 })
        );
    }

    #[test]
    fn test_extrude_multi_polygon() {
        let polygons: Vec<Vec<Vec<Position>>> = vec![
            vec![
                [[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]]
                    .into_iter()
                    .map(Position::from)
                    .collect(),
            ],
            vec![
                [[0.0, 0.0], [2.0, 0.0], [1.0, 2.0], [0.0, 0.0]]
                    .into_iter()
                    .map(Position::from)
                    .collect(),
            ],
        ];
        let data = FeatureCollection::new(vec![Feature::new(Geometry::MultiPolygon(
            polygons.clone(),
        ))]);

        let config = ModeConfig::default();
        let mode = planar_mode();
        let guides = mode.guides(&ModeProps::new(&data, &[0], &config));
        let indexes: Vec<Vec<usize>> = guides
            .edit_handles()
            .map(|h| h.position_indexes.clone())
            .collect();
        assert_eq!(indexes.len(), 7);
        assert_eq!(indexes[0], vec![0, 0, 1]);
        assert_eq!(indexes[4..], [vec![1, 0, 1], vec![1, 0, 2], vec![1, 0, 3]]);

        let mut mode = mode;
        let (data, host) = extrude_gesture(&mut mode, data, &[1, 0, 2], [3.0, 2.0]);
        assert_eq!(host.edits.len(), 3);

        let Geometry::MultiPolygon(result) = &data.features[0].geometry else {
            panic!("expected multi polygon");
        };
        assert_eq!(result[0], polygons[0]);

        let triangle = &result[1][0];
        assert_eq!(triangle.len(), 6);
        assert_eq!(triangle[1], Position::new(2.0, 0.0));
        assert_eq!(triangle[4], Position::new(1.0, 2.0));
        assert_eq!(triangle[5], triangle[0]);
        assert_relative_eq!(triangle[2].lng, 3.6, epsilon = 1e-9);
        assert_relative_eq!(triangle[2].lat, 0.8, epsilon = 1e-9);
        assert_relative_eq!(triangle[3].lng, 2.6, epsilon = 1e-9);
        assert_relative_eq!(triangle[3].lat, 2.8, epsilon = 1e-9);

        assert_eq!(
            host.last_edit().unwrap().edit_context.position_indexes,
            Some(PositionPath::MultiRing {
                polygon: 1,
                ring: 0,
                vertex: 3
            })
        );
    }

    #[test]
    fn test_no_op_without_selection_or_handle() {
        let data = square();
        let config = ModeConfig::default();
        let mut mode = planar_mode();
        let mut host = RecordingHost::new();

        let pick = handle_pick(&mode, &ModeProps::new(&data, &[0], &config), &[0, 2]);
        let event = drag_event(&pick, [0.5, 2.0]);

        // empty selection
        let props = ModeProps::new(&data, &[], &config);
        mode.handle_start_dragging(&event, &props, &mut host);
        mode.handle_dragging(&event, &props, &mut host);
        mode.handle_stop_dragging(&event, &props, &mut host);

        // no picked handle
        let props = ModeProps::new(&data, &[0], &config);
        let empty = DragEvent::default();
        mode.handle_start_dragging(&empty, &props, &mut host);
        mode.handle_dragging(&empty, &props, &mut host);
        mode.handle_stop_dragging(&empty, &props, &mut host);

        assert!(host.edits.is_empty());
        assert_eq!(host.pans_cancelled, 0);
        assert_eq!(mode.state(), ExtrudeState::Idle);
    }

    #[test]
    fn test_state_resets_after_gesture() {
        let mut mode = planar_mode();
        let (data, mut host) = extrude_gesture(&mut mode, square(), &[0, 1], [-1.0, 0.5]);
        assert!(!mode.is_active());

        // a stray drag after the gesture does nothing
        host.clear();
        let config = ModeConfig::default();
        let event = DragEvent {
            map_coords: Position::new(5.0, 5.0),
            ..DragEvent::default()
        };
        mode.handle_dragging(&event, &ModeProps::new(&data, &[0], &config), &mut host);
        assert!(host.edits.is_empty());
    }

    #[test]
    fn test_cursor_follows_handle_direction() {
        let data = square();
        let config = ModeConfig::default();
        let props = ModeProps::new(&data, &[0], &config);
        let mut mode = planar_mode();
        let mut host = RecordingHost::new();

        // top edge midpoint is due north of the center
        let event = PointerMoveEvent {
            picks: vec![handle_pick(&mode, &props, &[0, 2])],
            ..PointerMoveEvent::default()
        };
        mode.handle_pointer_move(&event, &props, &mut host);
        assert_eq!(host.cursor(), Some(Cursor::NsResize));

        let event = PointerMoveEvent {
            picks: vec![handle_pick(&mode, &props, &[0, 3])],
            ..PointerMoveEvent::default()
        };
        mode.handle_pointer_move(&event, &props, &mut host);
        assert_eq!(host.cursor(), Some(Cursor::EwResize));

        mode.handle_pointer_move(&PointerMoveEvent::default(), &props, &mut host);
        assert_eq!(host.cursor_updates.len(), 3);
        assert_eq!(host.cursor(), None);
    }
}

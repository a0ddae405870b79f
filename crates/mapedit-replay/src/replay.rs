//! Gesture replay
//!
//! Feeds a script's steps to a mode the way an interactive host would:
//! picks come from hit-testing the mode's current guides, and every edit the
//! mode proposes is adopted before the next step.

use mapedit_core::{FeatureCollection, Position};
use mapedit_modes::{
    Cursor, DragEvent, EditHandle, EditMode, EditType, ModeProps, Pick, PointerMoveEvent,
    RecordingHost,
};
use tracing::{debug, info};

use crate::ReplayError;
use crate::script::{GestureScript, Step};

/// Result of a replay
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayOutcome {
    /// Collection after all adopted edits
    pub data: FeatureCollection,
    /// Kinds of the edits, in order
    pub edit_types: Vec<EditType>,
    /// Cursor at the end of the session
    pub cursor: Option<Cursor>,
}

/// Guide handles within `tolerance` of `at`, nearest first
fn hit_test(
    mode: &dyn EditMode,
    props: &ModeProps<'_>,
    at: &Position,
    tolerance: f64,
) -> Vec<Pick> {
    let pointer = at.to_vec2();
    let guides = mode.guides(props);
    let mut hits: Vec<(f64, Pick)> = guides
        .features
        .iter()
        .enumerate()
        .filter_map(|(index, guide)| {
            let feature = guide.to_feature();
            let handle = EditHandle::from_feature(&feature)?;
            let distance = handle.position.to_vec2().distance(pointer);
            (distance <= tolerance).then(|| (distance, Pick::guide(index, feature)))
        })
        .collect();
    hits.sort_by(|a, b| a.0.total_cmp(&b.0));
    hits.into_iter().map(|(_, pick)| pick).collect()
}

/// Replay `script` against `data`
pub fn run(data: FeatureCollection, script: &GestureScript) -> Result<ReplayOutcome, ReplayError> {
    if let Some(&index) = script.selected.iter().find(|&&i| i >= data.len()) {
        return Err(ReplayError::Selection {
            index,
            len: data.len(),
        });
    }

    let mut mode = script.mode.build(script.kernel);
    let mut host = RecordingHost::new();
    let mut data = data;
    let mut pointer_down: Option<(Position, Vec<Pick>)> = None;
    let mut edit_types = Vec::new();
    let tolerance = script.config.pick_tolerance;

    info!(
        "Replaying {} steps with {} mode",
        script.steps.len(),
        mode.name()
    );

    for (step_index, step) in script.steps.iter().enumerate() {
        let mut props = ModeProps::new(&data, &script.selected, &script.config);
        if let Some(view_state) = script.view_state {
            props = props.with_view_state(view_state);
        }
        let at = step.position();
        let picks = hit_test(mode.as_ref(), &props, &at, tolerance);
        debug!("Step {}: {:?} ({} picks)", step_index, step, picks.len());

        match step {
            Step::PointerMove(..) => {
                let event = PointerMoveEvent {
                    picks,
                    map_coords: at,
                    pointer_down_picks: pointer_down.as_ref().map(|(_, p)| p.clone()),
                    pointer_down_map_coords: pointer_down.as_ref().map(|(p, _)| *p),
                };
                mode.handle_pointer_move(&event, &props, &mut host);
            }
            Step::StartDrag(..) => {
                let event = DragEvent {
                    picks: picks.clone(),
                    map_coords: at,
                    pointer_down_picks: picks.clone(),
                    pointer_down_map_coords: at,
                };
                pointer_down = Some((at, picks));
                mode.handle_start_dragging(&event, &props, &mut host);
            }
            Step::Drag(..) | Step::StopDrag(..) => {
                let Some((down_at, down_picks)) = pointer_down.clone() else {
                    return Err(ReplayError::NoDragInProgress(step_index));
                };
                let event = DragEvent {
                    picks,
                    map_coords: at,
                    pointer_down_picks: down_picks,
                    pointer_down_map_coords: down_at,
                };
                if let Step::Drag(..) = step {
                    mode.handle_dragging(&event, &props, &mut host);
                } else {
                    mode.handle_stop_dragging(&event, &props, &mut host);
                    pointer_down = None;
                }
            }
        }

        // adopt this step's edits
        for edit in host.edits.drain(..) {
            edit_types.push(edit.edit_type);
            data = edit.updated_data;
        }
    }

    info!("Replay finished with {} edits", edit_types.len());
    Ok(ReplayOutcome {
        data,
        edit_types,
        cursor: host.cursor(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::{Kernel, ModeKind};
    use mapedit_core::{Feature, Geometry};
    use mapedit_modes::ModeConfig;

    fn square() -> FeatureCollection {
        FeatureCollection::new(vec![Feature::new(Geometry::Polygon(vec![
            [[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]]
                .into_iter()
                .map(Position::from)
                .collect(),
        ]))])
    }

    fn script(mode: ModeKind, steps: Vec<Step>) -> GestureScript {
        GestureScript {
            mode,
            kernel: Kernel::Planar,
            config: ModeConfig {
                pick_tolerance: 0.05,
                ..ModeConfig::default()
            },
            selected: vec![0],
            view_state: None,
            steps,
        }
    }

    #[test]
    fn test_replay_extrude() {
        let steps = vec![
            Step::PointerMove(0.5, 1.01),
            Step::StartDrag(0.5, 1.01),
            Step::Drag(0.5, 1.5),
            Step::StopDrag(0.5, 2.0),
        ];
        let outcome = run(square(), &script(ModeKind::Extrude, steps)).unwrap();

        assert_eq!(
            outcome.edit_types,
            vec![EditType::StartExtruding, EditType::Extruding, EditType::Extruded]
        );
        let positions = outcome.data.features[0].geometry.positions();
        assert_eq!(positions.len(), 5);
        assert!((positions[1].lat - 2.0).abs() < 1e-9);
        assert!((positions[2].lat - 2.0).abs() < 1e-9);
        assert_eq!(outcome.cursor, Some(Cursor::NsResize));
    }

    #[test]
    fn test_replay_scale() {
        let steps = vec![
            Step::PointerMove(1.0, 1.0),
            Step::StartDrag(1.0, 1.0),
            Step::Drag(1.5, 1.5),
            Step::StopDrag(2.0, 2.0),
        ];
        let outcome = run(square(), &script(ModeKind::Scale, steps)).unwrap();

        assert_eq!(outcome.edit_types, vec![EditType::Scaling, EditType::Scaled]);
        let positions = outcome.data.features[0].geometry.positions();
        assert!((positions[2].lng - 2.0).abs() < 1e-9);
        assert!((positions[2].lat - 2.0).abs() < 1e-9);
        assert_eq!(outcome.cursor, None);
    }

    #[test]
    fn test_missed_handle_leaves_data_alone() {
        let steps = vec![
            Step::PointerMove(5.0, 5.0),
            Step::StartDrag(5.0, 5.0),
            Step::Drag(6.0, 6.0),
            Step::StopDrag(6.0, 6.0),
        ];
        let outcome = run(square(), &script(ModeKind::Scale, steps)).unwrap();
        assert!(outcome.edit_types.is_empty());
        assert_eq!(outcome.data, square());
    }

    #[test]
    fn test_drag_without_start() {
        let steps = vec![Step::PointerMove(0.0, 0.0), Step::Drag(1.0, 1.0)];
        assert!(matches!(
            run(square(), &script(ModeKind::Extrude, steps)),
            Err(ReplayError::NoDragInProgress(1))
        ));
    }

    #[test]
    fn test_selection_out_of_range() {
        let mut gesture = script(ModeKind::Scale, Vec::new());
        gesture.selected = vec![0, 3];
        assert!(matches!(
            run(square(), &gesture),
            Err(ReplayError::Selection { index: 3, len: 1 })
        ));
    }
}

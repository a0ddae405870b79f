//! Edit mode trait
//!
//! The host drives a mode by forwarding pointer events; the mode keeps its
//! gesture state between calls and reports back through a [`ModeHost`].

use crate::guides::GuideFeatureCollection;
use crate::types::{DragEvent, ModeHost, ModeProps, PointerMoveEvent};

/// Interface implemented by every edit mode
///
/// Handlers never fail: requests that do not apply to the current state are
/// ignored without calling the host.
pub trait EditMode: Send {
    /// Mode name
    fn name(&self) -> &str;

    /// Pointer moved with no drag in progress
    fn handle_pointer_move(
        &mut self,
        event: &PointerMoveEvent,
        props: &ModeProps<'_>,
        host: &mut dyn ModeHost,
    );

    /// Drag began
    fn handle_start_dragging(
        &mut self,
        event: &DragEvent,
        props: &ModeProps<'_>,
        host: &mut dyn ModeHost,
    );

    /// Drag moved
    fn handle_dragging(&mut self, event: &DragEvent, props: &ModeProps<'_>, host: &mut dyn ModeHost);

    /// Drag ended
    fn handle_stop_dragging(
        &mut self,
        event: &DragEvent,
        props: &ModeProps<'_>,
        host: &mut dyn ModeHost,
    );

    /// Overlays to draw for the current data and selection
    fn guides(&self, props: &ModeProps<'_>) -> GuideFeatureCollection;

    /// Whether a gesture is in progress
    fn is_active(&self) -> bool {
        false
    }
}

//! Pointer-driven Edit Modes
//!
//! Each mode is a small state machine driven by a host pipeline that owns
//! rendering, picking and the cursor:
//! - The host forwards pointer events together with the current data and
//!   selection ([`ModeProps`])
//! - The mode answers through [`ModeHost`] with edit descriptors, cursor
//!   hints and pan cancellation
//! - Every frame the host asks for [`GuideFeatureCollection`] overlays

pub mod config;
pub mod cursor;
pub mod extrude;
pub mod guides;
pub mod mode;
pub mod scale;
pub mod types;

// Re-exports for convenience
pub use config::{ConfigError, ModeConfig};
pub use cursor::{Cursor, cursor_for_bearing};
pub use extrude::{ExtrudeMode, ExtrudeState, points_parallel_to_line};
pub use guides::{
    EditHandle, EditHandleType, GuideFeature, GuideFeatureCollection, HandleShape,
    picked_edit_handle, picked_intermediate_edit_handle,
};
pub use mode::EditMode;
pub use scale::{ScaleMode, ScaleState, scale_factor};
pub use types::{
    DragEvent, EditAction, EditContext, EditType, ModeHost, ModeProps, Pick, PointerMoveEvent,
    RecordingHost, ViewState,
};

//! Gesture scripts
//!
//! A script names the mode to drive, its configuration and selection, and
//! the pointer steps to feed it. Scripts are RON files:
//!
//! ```ron
//! (
//!     mode: Scale,
//!     kernel: Planar,
//!     selected: [0],
//!     steps: [
//!         PointerMove(1.0, 1.0),
//!         StartDrag(1.0, 1.0),
//!         Drag(2.0, 2.0),
//!         StopDrag(2.0, 2.0),
//!     ],
//! )
//! ```

use std::path::Path;

use mapedit_core::{GeometryOps, PlanarOps, Position, SphericalOps};
use mapedit_modes::{EditMode, ExtrudeMode, ModeConfig, ScaleMode, ViewState};
use serde::{Deserialize, Serialize};

use crate::ReplayError;

/// Edit mode to drive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModeKind {
    /// Push polygon edges out with `ExtrudeMode`
    Extrude,
    /// Resize the selection with `ScaleMode`
    Scale,
}

/// Geometry kernel the mode computes with
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Kernel {
    /// Longitude/latitude on a sphere
    #[default]
    Spherical,
    /// Projected plane coordinates
    Planar,
}

impl Kernel {
    /// Boxed geometry operations for this kernel
    pub fn ops(self) -> Box<dyn GeometryOps> {
        match self {
            Kernel::Spherical => Box::new(SphericalOps),
            Kernel::Planar => Box::new(PlanarOps),
        }
    }
}

impl ModeKind {
    /// Instantiate the mode with a kernel
    pub fn build(self, kernel: Kernel) -> Box<dyn EditMode> {
        match self {
            ModeKind::Extrude => Box::new(ExtrudeMode::with_ops(kernel.ops())),
            ModeKind::Scale => Box::new(ScaleMode::with_ops(kernel.ops())),
        }
    }
}

/// One pointer event, at map coordinates `(x, y)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Step {
    /// Hover without a button held
    PointerMove(f64, f64),
    /// Button pressed and drag threshold crossed
    StartDrag(f64, f64),
    /// Pointer moved while dragging
    Drag(f64, f64),
    /// Button released
    StopDrag(f64, f64),
}

impl Step {
    /// Pointer position of the step
    pub fn position(&self) -> Position {
        match *self {
            Step::PointerMove(x, y)
            | Step::StartDrag(x, y)
            | Step::Drag(x, y)
            | Step::StopDrag(x, y) => Position::new(x, y),
        }
    }
}

/// A scripted gesture session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GestureScript {
    /// Mode under test
    pub mode: ModeKind,
    /// Geometry kernel, spherical unless given
    #[serde(default)]
    pub kernel: Kernel,
    /// Mode configuration
    #[serde(default)]
    pub config: ModeConfig,
    /// Indexes of the selected features
    #[serde(default)]
    pub selected: Vec<usize>,
    /// Map view the gesture happens in
    #[serde(default)]
    pub view_state: Option<ViewState>,
    /// Pointer events, in order
    pub steps: Vec<Step>,
}

impl GestureScript {
    /// Parse from RON text
    pub fn from_ron_str(content: &str) -> Result<Self, ReplayError> {
        ron::from_str(content).map_err(|e| ReplayError::Script(e.to_string()))
    }

    /// Load from a RON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReplayError> {
        let content =
            std::fs::read_to_string(path.as_ref()).map_err(|e| ReplayError::Io(e.to_string()))?;
        Self::from_ron_str(&content)
    }
}

//! Resize cursor selection

use serde::{Deserialize, Serialize};

/// Double-arrow resize cursors, named after their CSS counterparts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cursor {
    /// Vertical arrow
    NsResize,
    /// Arrow from bottom-left to top-right
    NeswResize,
    /// Horizontal arrow
    EwResize,
    /// Arrow from top-left to bottom-right
    NwseResize,
}

impl Cursor {
    /// CSS cursor name
    pub fn as_str(&self) -> &'static str {
        match self {
            Cursor::NsResize => "ns-resize",
            Cursor::NeswResize => "nesw-resize",
            Cursor::EwResize => "ew-resize",
            Cursor::NwseResize => "nwse-resize",
        }
    }
}

impl std::fmt::Display for Cursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cursor for a drag pointing along `bearing` on a map rotated by
/// `view_bearing` (both in degrees)
///
/// Screen-relative bearings are folded onto a half turn since every cursor
/// points both ways, then bucketed into 45 degree sectors centered on the
/// cursor's axis.
pub fn cursor_for_bearing(bearing: f64, view_bearing: f64) -> Cursor {
    let screen = (bearing - view_bearing).rem_euclid(180.0);
    match screen {
        s if s < 22.5 => Cursor::NsResize,
        s if s < 67.5 => Cursor::NeswResize,
        s if s < 112.5 => Cursor::EwResize,
        s if s < 157.5 => Cursor::NwseResize,
        _ => Cursor::NsResize,
    }
}

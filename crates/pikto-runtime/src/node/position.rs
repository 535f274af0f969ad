//! Position type for visual editor node placement.

use serde::{Deserialize, Serialize};

/// Position of a node in the visual editor.
///
/// Carried but not interpreted by the engine, except for the fixed
/// horizontal offset applied when a result node is synthesized.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
}

impl Position {
    /// Creates a new position.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns this position shifted right by `dx`.
    pub fn offset_x(self, dx: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y,
        }
    }
}

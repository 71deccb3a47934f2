//! Layer - A single compositable layer

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use super::LayerId;

/// How a layer's blank cells combine with layers beneath it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Occlusion {
    /// Every cell covers what is underneath, blanks included
    Solid,
    /// Blank cells let lower layers show through
    Transparent,
}

/// A single layer in the compositor
pub struct Layer {
    /// Unique identifier
    pub id: LayerId,
    /// Z-order (higher = in front)
    pub z_index: i32,
    /// Position and size on screen
    pub bounds: Rect,
    /// Whether the layer is visible
    pub visible: bool,
    /// Blank-cell behavior
    pub occlusion: Occlusion,
    /// The layer's render buffer, in origin coordinates
    pub buffer: Buffer,
}

impl Layer {
    /// Create a new layer
    pub fn new(id: LayerId, bounds: Rect, z_index: i32, occlusion: Occlusion) -> Self {
        let buffer_area = Rect::new(0, 0, bounds.width, bounds.height);
        Self {
            id,
            z_index,
            bounds,
            visible: true,
            occlusion,
            buffer: Buffer::empty(buffer_area),
        }
    }

    /// Check if a screen point is within this layer's bounds
    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.bounds.x
            && x < self.bounds.x + self.bounds.width
            && y >= self.bounds.y
            && y < self.bounds.y + self.bounds.height
    }
}

// Uniform sprite-sheet grid
//
// Sprite sheets are laid out as a grid of equally sized cells. A cell is
// addressed by (column, row) and maps to a pixel rectangle in the atlas.

use crate::core::math::{Rect, Vec2};
use glam::UVec2;

/// Cell layout of a sprite sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteGrid {
    /// Width of each cell in pixels
    pub cell_width: u32,
    /// Height of each cell in pixels
    pub cell_height: u32,
}

impl SpriteGrid {
    pub fn new(cell_width: u32, cell_height: u32) -> Self {
        Self {
            cell_width,
            cell_height,
        }
    }

    /// Cell size in pixels
    pub fn cell_size(&self) -> Vec2 {
        Vec2::new(self.cell_width as f64, self.cell_height as f64)
    }

    /// Pixel rectangle covered by the cell at (column, row)
    pub fn cell_rect(&self, cell: UVec2) -> Rect {
        Rect::new(
            (cell.x * self.cell_width) as f64,
            (cell.y * self.cell_height) as f64,
            self.cell_width as f64,
            self.cell_height as f64,
        )
    }
}

/// Normalize a pixel rectangle into UV coordinates for a texture of the given size
/// Returns (u_min, v_min, u_max, v_max)
pub fn uv_rect(source: Rect, texture_width: u32, texture_height: u32) -> [f32; 4] {
    let width = texture_width.max(1) as f64;
    let height = texture_height.max(1) as f64;
    let max = source.max();

    [
        (source.min.x / width) as f32,
        (source.min.y / height) as f32,
        (max.x / width) as f32,
        (max.y / height) as f32,
    ]
}

// Drawing surface the game renders onto

use super::TextureHandle;
use crate::core::math::{Color, Rect, Vec2};

/// The drawing primitives a frame is built from
///
/// Coordinates are screen pixels with the origin at the top-left corner.
pub trait RenderSurface {
    /// Current drawable size in pixels
    fn screen_size(&self) -> Vec2;

    /// Clear the whole surface
    fn fill_background(&mut self, color: Color);

    /// Copy `source` (atlas pixels) of `texture` onto `destination` (screen pixels)
    fn blit(&mut self, texture: TextureHandle, source: Rect, destination: Rect);

    /// Fill a screen rectangle with a solid color
    fn fill_rect(&mut self, destination: Rect, color: Color);

    /// Show diagnostic text for this frame
    fn draw_debug_text(&mut self, text: &str);
}

/// Records draw calls instead of drawing them
#[cfg(test)]
#[derive(Debug)]
pub struct RecordingSurface {
    pub size: Vec2,
    pub calls: Vec<DrawCall>,
}

#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Background(Color),
    Blit {
        texture: TextureHandle,
        source: Rect,
        destination: Rect,
    },
    FillRect(Rect, Color),
    DebugText(String),
}

#[cfg(test)]
impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: Vec2::new(width, height),
            calls: Vec::new(),
        }
    }

    pub fn blits(&self) -> Vec<(TextureHandle, Rect, Rect)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Blit {
                    texture,
                    source,
                    destination,
                } => Some((*texture, *source, *destination)),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
impl RenderSurface for RecordingSurface {
    fn screen_size(&self) -> Vec2 {
        self.size
    }

    fn fill_background(&mut self, color: Color) {
        self.calls.push(DrawCall::Background(color));
    }

    fn blit(&mut self, texture: TextureHandle, source: Rect, destination: Rect) {
        self.calls.push(DrawCall::Blit {
            texture,
            source,
            destination,
        });
    }

    fn fill_rect(&mut self, destination: Rect, color: Color) {
        self.calls.push(DrawCall::FillRect(destination, color));
    }

    fn draw_debug_text(&mut self, text: &str) {
        self.calls.push(DrawCall::DebugText(text.to_string()));
    }
}

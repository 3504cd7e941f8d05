// Entity rendering through the camera

use super::entities::Entity;
use crate::core::math::{Rect, Vec2};
use crate::engine::renderer::{Camera, RenderSurface, TextureHandle};

/// One atlas-to-screen copy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteBlit {
    pub texture: TextureHandle,
    /// Atlas pixels
    pub source: Rect,
    /// Screen pixels
    pub destination: Rect,
}

/// Work out where an entity's current frame lands on screen
///
/// The entity position is the sprite's visual centre. Size is the atlas cell
/// scaled by both the entity and the camera.
pub fn sprite_blit(entity: &Entity, camera: &Camera, screen_size: Vec2) -> SpriteBlit {
    let resource = entity.resource();
    let grid = resource.grid();

    let source = grid.cell_rect(entity.current_cell());
    let size = grid.cell_size() * entity.scale * camera.scale;
    let center = camera.world_to_screen(entity.position, screen_size);

    SpriteBlit {
        texture: resource.atlas(),
        source,
        destination: Rect::from_center(center, size),
    }
}

/// Draw an entity's current frame with a single blit
pub fn render_entity(surface: &mut dyn RenderSurface, entity: &Entity, camera: &Camera) {
    let blit = sprite_blit(entity, camera, surface.screen_size());
    surface.blit(blit.texture, blit.source, blit.destination);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::SpriteGrid;
    use crate::engine::clock::{Clock, ManualClock};
    use crate::engine::renderer::RecordingSurface;
    use crate::game::entities::{
        FrameSequence, Resource, ResourceKind, DEFAULT_FRAME_DURATION,
    };
    use approx::assert_relative_eq;
    use std::sync::Arc;

    fn knight_at(position: Vec2, clock: &ManualClock) -> Entity {
        let frames = ResourceKind::Knight
            .frame_cells()
            .map(|cells| FrameSequence::new(cells).unwrap());
        let resource =
            Arc::new(Resource::new(TextureHandle(7), SpriteGrid::new(16, 16), frames).unwrap());
        Entity::new(
            resource,
            position,
            Vec2::ONE,
            DEFAULT_FRAME_DURATION,
            clock.now(),
        )
    }

    #[test]
    fn test_centered_entity_at_double_scale() {
        let clock = ManualClock::new();
        let entity = knight_at(Vec2::ZERO, &clock);
        let camera = Camera::new(Vec2::ZERO, Vec2::new(2.0, 2.0));
        let mut surface = RecordingSurface::new(640.0, 480.0);

        render_entity(&mut surface, &entity, &camera);

        let blits = surface.blits();
        assert_eq!(blits.len(), 1);
        let (texture, source, destination) = blits[0];
        assert_eq!(texture, TextureHandle(7));
        assert_eq!(source, Rect::new(0.0, 0.0, 16.0, 16.0));
        assert_relative_eq!(destination.min.x, 304.0);
        assert_relative_eq!(destination.min.y, 224.0);
        assert_relative_eq!(destination.size.x, 32.0);
        assert_relative_eq!(destination.size.y, 32.0);
    }

    #[test]
    fn test_offset_from_camera() {
        let clock = ManualClock::new();
        let entity = knight_at(Vec2::new(110.0, 95.0), &clock);
        let camera = Camera::new(Vec2::new(100.0, 100.0), Vec2::new(2.0, 2.0));

        let blit = sprite_blit(&entity, &camera, Vec2::new(640.0, 480.0));

        // centre lands at (340, 230)
        assert_relative_eq!(blit.destination.min.x, 324.0);
        assert_relative_eq!(blit.destination.min.y, 214.0);
    }

    #[test]
    fn test_entity_scale_grows_destination() {
        let clock = ManualClock::new();
        let mut entity = knight_at(Vec2::ZERO, &clock);
        entity.scale = Vec2::new(2.0, 1.0);
        let camera = Camera::new(Vec2::ZERO, Vec2::new(2.0, 2.0));

        let blit = sprite_blit(&entity, &camera, Vec2::new(640.0, 480.0));

        assert_eq!(blit.destination.size, Vec2::new(64.0, 32.0));
        assert_eq!(blit.destination.center(), Vec2::new(320.0, 240.0));
    }

    #[test]
    fn test_source_follows_facing_and_frame() {
        let clock = ManualClock::new();
        let mut entity = knight_at(Vec2::ZERO, &clock);
        let camera = Camera::default();

        entity.velocity = Vec2::new(-1.0, 0.0);
        entity.update_animation(&clock);
        clock.advance(DEFAULT_FRAME_DURATION);
        entity.update_animation(&clock);

        let blit = sprite_blit(&entity, &camera, Vec2::new(100.0, 100.0));
        // West frame 1 is cell (2, 1)
        assert_eq!(blit.source, Rect::new(32.0, 16.0, 16.0, 16.0));
    }
}

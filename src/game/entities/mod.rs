// Entities: facing, animation, shared sprite resources

mod animation;
mod direction;
mod entity;
mod resource;

pub use animation::DEFAULT_FRAME_DURATION;
pub use entity::{Entity, SPEED_STEP};
pub use resource::{ResourceCatalog, ResourceKind};

#[cfg(test)]
pub use direction::FacingDirection;
#[cfg(test)]
pub use resource::{FrameSequence, Resource};

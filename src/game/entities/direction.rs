// Facing direction

use crate::core::math::Vec2;

/// The four directions a sprite can face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FacingDirection {
    North,
    South,
    East,
    West,
}

impl Default for FacingDirection {
    fn default() -> Self {
        Self::South
    }
}

impl FacingDirection {
    /// All directions, in `index()` order
    pub const ALL: [Self; 4] = [Self::North, Self::South, Self::East, Self::West];

    /// Position of this direction in per-direction tables
    pub const fn index(self) -> usize {
        match self {
            Self::North => 0,
            Self::South => 1,
            Self::East => 2,
            Self::West => 3,
        }
    }

    /// Direction implied by a velocity
    ///
    /// Vertical movement wins over horizontal. Negative y is North. A
    /// velocity with no direction keeps `current`.
    pub fn from_velocity(velocity: Vec2, current: Self) -> Self {
        if velocity.y < 0.0 {
            Self::North
        } else if velocity.y > 0.0 {
            Self::South
        } else if velocity.x > 0.0 {
            Self::East
        } else if velocity.x < 0.0 {
            Self::West
        } else {
            current
        }
    }
}

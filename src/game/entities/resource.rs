// Sprite resources shared by entities of the same kind
//
// A resource is loaded once at startup and never changes afterwards. Entities
// hold it through an `Arc` so no image data is copied per entity.

use super::direction::FacingDirection;
use crate::engine::assets::{AssetError, AssetLoader, ImageLoader, SpriteGrid};
use crate::engine::renderer::TextureHandle;
use glam::UVec2;
use log::info;
use serde::Deserialize;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Resource loading errors
#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    #[error("Failed to load resource: {0}")]
    Load(#[from] AssetError),

    #[error("Invalid resource configuration: {0}")]
    Configuration(String),
}

/// The kinds of entity the game knows how to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Knight,
}

impl ResourceKind {
    pub const ALL: [Self; 1] = [Self::Knight];

    /// Atlas image path relative to the assets directory
    pub fn atlas_path(self) -> &'static str {
        match self {
            Self::Knight => "images/Knight/SpriteSheet.png",
        }
    }

    /// Cell layout of the atlas
    pub fn grid(self) -> SpriteGrid {
        match self {
            Self::Knight => SpriteGrid::new(16, 16),
        }
    }

    /// Frame cells (column, row) for each direction, in `FacingDirection::ALL` order
    pub fn frame_cells(self) -> [Vec<UVec2>; 4] {
        match self {
            Self::Knight => [
                vec![UVec2::new(1, 0), UVec2::new(1, 1)],
                vec![UVec2::new(0, 0), UVec2::new(0, 1)],
                vec![UVec2::new(3, 0), UVec2::new(3, 1)],
                vec![UVec2::new(2, 0), UVec2::new(2, 1)],
            ],
        }
    }
}

/// Ordered atlas cells making up one direction's walk cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameSequence {
    cells: Vec<UVec2>,
}

impl FrameSequence {
    /// Returns `None` for an empty sequence
    pub fn new(cells: Vec<UVec2>) -> Option<Self> {
        if cells.is_empty() {
            None
        } else {
            Some(Self { cells })
        }
    }

    pub fn frame_count(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.cells.len()).unwrap_or(NonZeroUsize::MIN)
    }

    /// Cell at `index`, wrapping around the sequence length
    pub fn cell(&self, index: usize) -> UVec2 {
        self.cells[index % self.cells.len()]
    }
}

/// A sprite atlas and the frames each direction plays from it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    atlas: TextureHandle,
    grid: SpriteGrid,
    frames: [FrameSequence; 4],
}

impl Resource {
    /// Create a resource, rejecting zero-sized cells
    pub fn new(
        atlas: TextureHandle,
        grid: SpriteGrid,
        frames: [FrameSequence; 4],
    ) -> Result<Self, ResourceError> {
        if grid.cell_width == 0 || grid.cell_height == 0 {
            return Err(ResourceError::Configuration(format!(
                "cell size must be non-zero, got {}x{}",
                grid.cell_width, grid.cell_height
            )));
        }

        Ok(Self {
            atlas,
            grid,
            frames,
        })
    }

    /// Load the atlas for `kind` and build its resource
    pub fn load(
        kind: ResourceKind,
        images: &mut dyn ImageLoader,
        assets: &AssetLoader,
    ) -> Result<Self, ResourceError> {
        let [north, south, east, west] = kind.frame_cells();
        let frames = [
            Self::sequence(kind, FacingDirection::North, north)?,
            Self::sequence(kind, FacingDirection::South, south)?,
            Self::sequence(kind, FacingDirection::East, east)?,
            Self::sequence(kind, FacingDirection::West, west)?,
        ];

        let path = kind.atlas_path();
        let bytes = assets.load_bytes(path)?;
        let atlas = images.load_image(path, &bytes)?;

        Self::new(atlas, kind.grid(), frames)
    }

    fn sequence(
        kind: ResourceKind,
        direction: FacingDirection,
        cells: Vec<UVec2>,
    ) -> Result<FrameSequence, ResourceError> {
        FrameSequence::new(cells).ok_or_else(|| {
            ResourceError::Configuration(format!(
                "{:?} has no frames for {:?}",
                kind, direction
            ))
        })
    }

    pub fn atlas(&self) -> TextureHandle {
        self.atlas
    }

    pub fn grid(&self) -> SpriteGrid {
        self.grid
    }

    /// Frame sequence for a direction
    pub fn frames(&self, direction: FacingDirection) -> &FrameSequence {
        &self.frames[direction.index()]
    }

    pub fn frame_count(&self, direction: FacingDirection) -> NonZeroUsize {
        self.frames(direction).frame_count()
    }
}

/// Every resource the game uses, loaded once at startup
#[derive(Debug, Clone)]
pub struct ResourceCatalog {
    knight: Arc<Resource>,
}

impl ResourceCatalog {
    /// Load all built-in resources
    pub fn load(images: &mut dyn ImageLoader, assets: &AssetLoader) -> Result<Self, ResourceError> {
        let knight = Arc::new(Resource::load(ResourceKind::Knight, images, assets)?);
        info!("Loaded {} resource kind(s)", ResourceKind::ALL.len());

        Ok(Self { knight })
    }

    /// Shared handle to the resource for `kind`
    pub fn get(&self, kind: ResourceKind) -> Arc<Resource> {
        match kind {
            ResourceKind::Knight => Arc::clone(&self.knight),
        }
    }
}

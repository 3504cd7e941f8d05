// Asset loading
//
// Resolves asset files under a base directory and hands their bytes to an
// `ImageLoader`, which turns them into texture handles. Decoding and GPU upload
// live behind that trait so game code can be tested without a device.

mod atlas;
mod loader;

pub use atlas::{uv_rect, SpriteGrid};
pub use loader::AssetLoader;

use crate::engine::renderer::TextureHandle;

/// Asset loading errors
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Failed to read asset {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
}

/// Turns encoded image bytes into a texture the renderer can blit from
pub trait ImageLoader {
    fn load_image(&mut self, name: &str, bytes: &[u8]) -> Result<TextureHandle, AssetError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_error_display() {
        let err = AssetError::NotFound("images/knight.png".to_string());
        assert_eq!(err.to_string(), "Asset not found: images/knight.png");
    }

    #[test]
    fn test_io_error_display_names_path() {
        let err = AssetError::Io {
            path: "images/knight.png".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("images/knight.png"));
    }
}

// Game configuration loaded from TOML

use crate::core::math::{Color, Vec2};
use crate::game::entities::{ResourceKind, DEFAULT_FRAME_DURATION};
use anyhow::{bail, Context, Result};
use log::info;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming an alternative config file
pub const CONFIG_ENV: &str = "KYANITE_CONFIG";

/// Config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "kyanite.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub assets_dir: PathBuf,
    /// Fixed updates per second
    pub tick_rate: u32,
    pub animation: AnimationConfig,
    pub camera: CameraConfig,
    /// Clear colour as sRGB RGBA8
    pub background: [u8; 4],
    pub world: WorldConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub frame_duration_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub scale: [f64; 2],
}

/// Where entities start
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub player: SpawnConfig,
    pub entities: Vec<SpawnConfig>,
}

/// One entity to spawn
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub kind: ResourceKind,
    pub position: [f64; 2],
    pub scale: [f64; 2],
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            assets_dir: PathBuf::from("assets"),
            tick_rate: 60,
            animation: AnimationConfig::default(),
            camera: CameraConfig::default(),
            background: [36, 54, 66, 255],
            world: WorldConfig::default(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Kyanite".to_string(),
            width: 640,
            height: 480,
        }
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            frame_duration_ms: DEFAULT_FRAME_DURATION.as_millis() as u64,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self { scale: [2.0, 2.0] }
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            player: SpawnConfig::default(),
            entities: vec![SpawnConfig {
                position: [100.0, 100.0],
                ..SpawnConfig::default()
            }],
        }
    }
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            kind: ResourceKind::Knight,
            position: [0.0, 0.0],
            scale: [1.0, 1.0],
        }
    }
}

impl SpawnConfig {
    pub fn position(&self) -> Vec2 {
        Vec2::from_array(self.position)
    }

    pub fn scale(&self) -> Vec2 {
        Vec2::from_array(self.scale)
    }
}

impl GameConfig {
    /// Load from `$KYANITE_CONFIG`, else `kyanite.toml`, else defaults
    pub fn load() -> Result<Self> {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        Self::load_from(&path)
    }

    /// Load from a file, falling back to defaults if it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config =
            Self::parse(&text).with_context(|| format!("Invalid config {}", path.display()))?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate TOML text
    pub fn parse(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.tick_rate == 0 {
            bail!("tick_rate must be greater than zero");
        }
        if self.animation.frame_duration_ms == 0 {
            bail!("animation.frame_duration_ms must be greater than zero");
        }
        if self.window.width == 0 || self.window.height == 0 {
            bail!("window size must be non-zero");
        }
        Ok(())
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_millis(self.animation.frame_duration_ms)
    }

    pub fn camera_scale(&self) -> Vec2 {
        Vec2::from_array(self.camera.scale)
    }

    pub fn background_color(&self) -> Color {
        Color::from_srgba8(self.background)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();

        assert_eq!(config.window.title, "Kyanite");
        assert_eq!((config.window.width, config.window.height), (640, 480));
        assert_eq!(config.tick_rate, 60);
        assert_eq!(config.frame_duration(), Duration::from_millis(200));
        assert_eq!(config.camera_scale(), Vec2::new(2.0, 2.0));
        assert_eq!(config.world.player.position(), Vec2::ZERO);
        assert_eq!(config.world.entities.len(), 1);
        assert_eq!(config.world.entities[0].position(), Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(GameConfig::parse("").unwrap(), GameConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = GameConfig::parse(
            r#"
            tick_rate = 30

            [window]
            title = "Test"

            [camera]
            scale = [3.0, 3.0]

            [[world.entities]]
            kind = "knight"
            position = [5.0, -5.0]

            [[world.entities]]
            position = [1.0, 2.0]
            scale = [2.0, 2.0]
            "#,
        )
        .unwrap();

        assert_eq!(config.tick_rate, 30);
        assert_eq!(config.window.title, "Test");
        assert_eq!(config.window.width, 640);
        assert_eq!(config.camera_scale(), Vec2::new(3.0, 3.0));
        assert_eq!(config.world.entities.len(), 2);
        assert_eq!(config.world.entities[0].position(), Vec2::new(5.0, -5.0));
        assert_eq!(config.world.entities[1].scale(), Vec2::new(2.0, 2.0));
        assert_eq!(config.world.player, SpawnConfig::default());
    }

    #[test]
    fn test_zero_tick_rate_rejected() {
        assert!(GameConfig::parse("tick_rate = 0").is_err());
    }

    #[test]
    fn test_zero_frame_duration_rejected() {
        assert!(GameConfig::parse("[animation]\nframe_duration_ms = 0").is_err());
    }

    #[test]
    fn test_unknown_kind_rejected() {
        assert!(GameConfig::parse("[world.player]\nkind = \"dragon\"").is_err());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join(format!(
            "kyanite-config-missing-{}.toml",
            std::process::id()
        ));
        assert_eq!(GameConfig::load_from(&path).unwrap(), GameConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let path =
            std::env::temp_dir().join(format!("kyanite-config-{}.toml", std::process::id()));
        std::fs::write(&path, "background = [0, 0, 0, 255]").unwrap();

        let config = GameConfig::load_from(&path).unwrap();
        assert_eq!(config.background_color(), Color::new(0.0, 0.0, 0.0, 1.0));

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_malformed_file_is_error() {
        let path = std::env::temp_dir().join(format!(
            "kyanite-config-bad-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "tick_rate = \"fast\"").unwrap();

        assert!(GameConfig::load_from(&path).is_err());

        std::fs::remove_file(&path).unwrap();
    }
}

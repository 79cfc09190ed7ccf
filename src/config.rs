//! Configuration persistence for snapmark settings

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Serializable color representation for shape annotations
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Default for ShapeColor {
    fn default() -> Self {
        // Green, the brush the original editor starts with
        Self {
            r: 0.0,
            g: 0.5,
            b: 0.0,
        }
    }
}

impl ShapeColor {
    /// Selection rectangle color
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    /// Convert to image crate RGBA format (0-255)
    pub fn to_rgba_u8(self) -> [u8; 4] {
        [
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
            255,
        ]
    }
}

/// Where to save exported screenshots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SaveLocation {
    #[default]
    Pictures,
    Documents,
}

/// Settings persisted between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Color for shape annotations
    pub shape_color: ShapeColor,
    /// Whether rectangle/ellipse tools draw filled shapes
    #[serde(default)]
    pub shape_filled: bool,
    /// Blur intensity slider value (0-100; radius = intensity / 10)
    pub blur_intensity: i32,
    /// Where to save exported screenshots
    pub save_location: SaveLocation,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            shape_color: ShapeColor::default(),
            shape_filled: false,
            // Mid-slider default, radius 5
            blur_intensity: 50,
            save_location: SaveLocation::Pictures,
        }
    }
}

impl AppConfig {
    const DIR_NAME: &'static str = "snapmark";
    const FILE_NAME: &'static str = "settings.json";

    fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(Self::DIR_NAME).join(Self::FILE_NAME))
    }

    /// Load configuration from disk, or return defaults if unavailable
    pub fn load() -> Self {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => {
                log::warn!("No config directory on this system, using defaults");
                Self::default()
            }
        }
    }

    /// Load configuration from a specific file, defaulting on any failure
    pub fn load_from(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(err) => {
                log::warn!("Could not read config {}: {err}", path.display());
                return Self::default();
            }
        };
        match serde_json::from_str(&json) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Error parsing config, using defaults: {err}");
                Self::default()
            }
        }
    }

    /// Save configuration to disk, logging on failure
    pub fn save(&self) {
        let Some(path) = Self::default_path() else {
            log::error!("No config directory on this system, not saving");
            return;
        };
        if let Err(err) = self.save_to(&path) {
            log::error!("Failed to save config: {err:?}");
        }
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}

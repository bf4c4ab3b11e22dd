//! Shelf configuration
//!
//! Every field is an optional override of a compiled constant; accessors fall
//! back to [`crate::constants`] when a field is `None`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{arrows, gesture, layout};
use crate::error::Result;
use crate::shelf::gesture::GestureConfig;
use crate::shelf::types::{LongPressPolicy, RowMode};

/// Environment variable overriding the long-press threshold (ms).
pub const ENV_LONG_PRESS_MS: &str = "GAMESHELF_LONG_PRESS_MS";
/// Environment variable overriding the initial row mode.
pub const ENV_ROW_MODE: &str = "GAMESHELF_ROW_MODE";

/// Optional overrides for the shelf's compiled defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShelfConfig {
    /// Pin the column count instead of deriving it from the viewport width.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<usize>,
    /// Base tile width (px).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tile_width: Option<f32>,
    /// Gap between tiles (px).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tile_spacing: Option<f32>,
    /// Long-press threshold (ms).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_press_ms: Option<u64>,
    /// Pointer travel that turns a contact into a drag (px).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drag_tolerance_px: Option<f32>,
    /// Arrow bounce length (ms).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounce_ms: Option<u64>,
    /// Whether a long-press also selects.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_press_policy: Option<LongPressPolicy>,
    /// Initial density when the host does not supply one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_mode: Option<RowMode>,
}

impl ShelfConfig {
    /// All defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from the user config directory, then apply environment overrides.
    /// A missing or unreadable file yields the defaults.
    pub fn load() -> Self {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => match Self::from_path(&path) {
                Ok(config) => config,
                Err(err) => {
                    log::warn!(
                        "Ignoring shelf config {}: {err}",
                        path.display()
                    );
                    Self::default()
                }
            },
            _ => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        config
    }

    /// Read an explicit JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&content)?)
    }

    /// `<config_dir>/gameshelf/shelf.json`, if the platform has one.
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("gameshelf").join("shelf.json"))
    }

    /// Write to [`ShelfConfig::config_path`]; a no-op without a config dir.
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            self.save_to(path)?;
        }
        Ok(())
    }

    /// Write pretty JSON to `path`, creating parent directories.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Apply overrides from a key lookup (the process environment in
    /// [`ShelfConfig::load`]).
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_LONG_PRESS_MS) {
            match raw.trim().parse::<u64>() {
                Ok(ms) => self.long_press_ms = Some(ms),
                Err(_) => log::warn!(
                    "{ENV_LONG_PRESS_MS}={raw:?} is not a duration in ms"
                ),
            }
        }
        if let Some(raw) = lookup(ENV_ROW_MODE) {
            self.row_mode = Some(RowMode::parse(&raw));
        }
    }

    // ========== LAYOUT ==========

    /// Pinned column count, if any.
    pub fn columns(&self) -> Option<usize> {
        self.columns.map(|c| c.clamp(1, layout::MAX_COLUMNS))
    }

    /// Tile width in px.
    pub fn tile_width(&self) -> f32 {
        self.tile_width.unwrap_or(layout::TILE_WIDTH)
    }

    /// Tile spacing in px.
    pub fn tile_spacing(&self) -> f32 {
        self.tile_spacing.unwrap_or(layout::TILE_SPACING)
    }

    /// Initial density.
    pub fn row_mode(&self) -> RowMode {
        self.row_mode.unwrap_or_default()
    }

    // ========== GESTURES ==========

    /// Long-press threshold.
    pub fn long_press(&self) -> Duration {
        Duration::from_millis(
            self.long_press_ms.unwrap_or(gesture::LONG_PRESS_MS),
        )
    }

    /// Drag tolerance in px, never negative.
    pub fn drag_tolerance(&self) -> f32 {
        self.drag_tolerance_px
            .unwrap_or(gesture::DRAG_TOLERANCE_PX)
            .max(0.0)
    }

    /// Long-press selection policy.
    pub fn long_press_policy(&self) -> LongPressPolicy {
        self.long_press_policy.unwrap_or_default()
    }

    /// Gesture thresholds for the detector.
    pub fn gesture_config(&self) -> GestureConfig {
        GestureConfig {
            long_press: self.long_press(),
            drag_tolerance: self.drag_tolerance(),
        }
    }

    // ========== ARROWS ==========

    /// Arrow bounce length.
    pub fn bounce_duration(&self) -> Duration {
        Duration::from_millis(self.bounce_ms.unwrap_or(arrows::BOUNCE_MS))
    }
}

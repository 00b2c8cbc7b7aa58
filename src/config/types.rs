use serde::Deserialize;
use std::path::Path;

use super::palette::{Color, Palette, DEFAULT_PALETTE};
use crate::audio::DEFAULT_VOLUME;
use crate::geometry::Size;

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    pub canvas: CanvasConfig,
    pub palette: PaletteConfig,
    pub audio: AudioConfig,
}

/// Initial canvas dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasConfig {
    pub width: f32,
    pub height: f32,
}

/// Colors offered for dragging, as parsed swatches.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PaletteConfig {
    pub palette: Palette,
}

/// Drop sound configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioConfig {
    pub volume: f32,
    pub muted: bool,
}

/// Errors that can occur during config loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("validation error: {0}")]
    Validation(String),
}

// ── Serde intermediate structs (unknown keys are ignored) ───────────────

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawConfig {
    canvas: RawCanvasConfig,
    palette: RawPaletteConfig,
    audio: RawAudioConfig,
}

#[derive(Deserialize)]
#[serde(default)]
struct RawCanvasConfig {
    width: f32,
    height: f32,
}

impl Default for RawCanvasConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 800.0,
        }
    }
}

#[derive(Deserialize)]
#[serde(default)]
struct RawPaletteConfig {
    colors: Vec<String>,
}

impl Default for RawPaletteConfig {
    fn default() -> Self {
        Self {
            colors: DEFAULT_PALETTE.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Deserialize)]
#[serde(default)]
struct RawAudioConfig {
    volume: f32,
    muted: bool,
}

impl Default for RawAudioConfig {
    fn default() -> Self {
        Self {
            volume: DEFAULT_VOLUME,
            muted: false,
        }
    }
}

// ── Default impls ───────────────────────────────────────────────────────

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 800.0,
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            volume: DEFAULT_VOLUME,
            muted: false,
        }
    }
}

impl CanvasConfig {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

// ── Config implementation ───────────────────────────────────────────────

impl Config {
    /// Load config from a TOML file path. Returns defaults if file does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_toml(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No config file at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(ConfigError::Io(e)),
        }
    }

    /// Parse a TOML string into a Config.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig =
            toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))?;

        let colors = raw
            .palette
            .colors
            .iter()
            .map(|hex| {
                Color::from_hex(hex).ok_or_else(|| {
                    ConfigError::Validation(format!("invalid palette color '{hex}', expected #RRGGBB"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let config = Self {
            canvas: CanvasConfig {
                width: raw.canvas.width,
                height: raw.canvas.height,
            },
            palette: PaletteConfig {
                palette: Palette::new(colors),
            },
            audio: AudioConfig {
                volume: raw.audio.volume,
                muted: raw.audio.muted,
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the config, returning an error if any values are out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.canvas.width > 0.0 && self.canvas.height > 0.0) {
            return Err(ConfigError::Validation(
                "canvas width and height must be > 0".to_string(),
            ));
        }

        if self.palette.palette.is_empty() {
            return Err(ConfigError::Validation(
                "palette must contain at least one color".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.audio.volume) {
            return Err(ConfigError::Validation(format!(
                "audio volume {} out of range 0.0..=1.0",
                self.audio.volume
            )));
        }

        Ok(())
    }
}

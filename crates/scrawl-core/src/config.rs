//! Canvas configuration.

use crate::color::SerializableColor;
use crate::surface::BackgroundImage;
use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default surface width in pixels.
pub const DEFAULT_SURFACE_WIDTH: u32 = 800;
/// Default surface height in pixels.
pub const DEFAULT_SURFACE_HEIGHT: u32 = 600;
/// Default delay between two playback steps.
pub const DEFAULT_PLAYBACK_INTERVAL_MS: u64 = 5;

/// Dimensions of the drawing surface, handed to every tool callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceConfig {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_SURFACE_WIDTH,
            height: DEFAULT_SURFACE_HEIGHT,
        }
    }
}

impl SurfaceConfig {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width as f64, self.height as f64)
    }

    /// Bounds of the surface in surface coordinates.
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(Point::ZERO, self.size())
    }

    /// Whether a point lies on the surface (edges included).
    pub fn contains(&self, point: Point) -> bool {
        point.x >= 0.0
            && point.y >= 0.0
            && point.x <= self.width as f64
            && point.y <= self.height as f64
    }
}

/// Playback cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Milliseconds between two replayed steps.
    pub interval_ms: u64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_PLAYBACK_INTERVAL_MS,
        }
    }
}

impl PlaybackConfig {
    pub fn interval(&self) -> Duration {
        // A zero interval would make every tick replay everything at once.
        Duration::from_millis(self.interval_ms.max(1))
    }
}

/// Static configuration of a canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasConfig {
    #[serde(default)]
    pub surface: SurfaceConfig,
    /// Initial background colour.
    #[serde(default = "default_background_color")]
    pub background: SerializableColor,
    #[serde(default)]
    pub playback: PlaybackConfig,
}

fn default_background_color() -> SerializableColor {
    SerializableColor::white()
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            surface: SurfaceConfig::default(),
            background: default_background_color(),
            playback: PlaybackConfig::default(),
        }
    }
}

impl CanvasConfig {
    /// Create a configuration for a surface of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            surface: SurfaceConfig::new(width, height),
            ..Self::default()
        }
    }

    /// Set the initial background colour.
    pub fn with_background(mut self, color: SerializableColor) -> Self {
        self.background = color;
        self
    }

    /// Set the playback interval.
    pub fn with_playback_interval(mut self, interval: Duration) -> Self {
        self.playback.interval_ms = interval.as_millis() as u64;
        self
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a configuration from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// What is painted beneath the recorded actions.
#[derive(Debug, Clone, PartialEq)]
pub enum Background {
    Color(SerializableColor),
    Image(BackgroundImage),
}

impl Default for Background {
    fn default() -> Self {
        Background::Color(SerializableColor::white())
    }
}

impl From<SerializableColor> for Background {
    fn from(color: SerializableColor) -> Self {
        Background::Color(color)
    }
}

impl From<BackgroundImage> for Background {
    fn from(image: BackgroundImage) -> Self {
        Background::Image(image)
    }
}

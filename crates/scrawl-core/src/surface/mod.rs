//! Abstract 2D drawing surface.
//!
//! The core never touches pixels itself. Tools and the replay engine draw
//! through the [`Surface`] trait; a backend (canvas element, GPU scene,
//! software raster) implements it.

mod image;
mod recording;

pub use image::{BackgroundImage, ImageFormat, to_data_url};
pub use recording::{DrawOp, RecordingSurface};

use crate::color::SerializableColor;
use kurbo::{Point, Size};
use peniko::Compose;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Surface errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    #[error("Unsupported export format: {}", .0.mime_type())]
    UnsupportedFormat(ImageFormat),
    #[error("Encoding failed: {0}")]
    Encode(String),
    #[error("Invalid image: {0}")]
    InvalidImage(String),
}

/// Result type for surface operations.
pub type SurfaceResult<T> = Result<T, SurfaceError>;

/// How a paint combines with what is already on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Blend {
    /// Paint over existing content.
    #[default]
    SourceOver,
    /// Remove existing content where painted (destination-out).
    Erase,
}

impl From<Blend> for Compose {
    fn from(blend: Blend) -> Self {
        match blend {
            Blend::SourceOver => Compose::SrcOver,
            Blend::Erase => Compose::DestOut,
        }
    }
}

/// Colour and compositing mode for strokes and fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Paint {
    pub color: SerializableColor,
    pub blend: Blend,
}

impl Paint {
    /// An opaque-over paint of the given colour.
    pub fn solid(color: SerializableColor) -> Self {
        Self {
            color,
            blend: Blend::SourceOver,
        }
    }

    /// A paint that erases whatever it covers.
    pub fn eraser() -> Self {
        Self {
            color: SerializableColor::white(),
            blend: Blend::Erase,
        }
    }
}

/// Drawing capability handed to tools and the replay engine.
///
/// Strokes use round caps and joins. Drawing calls are infallible; only
/// encoding can fail.
pub trait Surface {
    /// Size of the surface in pixels.
    fn size(&self) -> Size;

    /// Reset every pixel to transparent.
    fn clear(&mut self);

    /// Stroke a straight segment.
    fn draw_stroke(&mut self, from: Point, to: Point, width: f64, paint: &Paint);

    /// Fill the whole surface.
    fn fill(&mut self, paint: &Paint);

    /// Draw an image scaled to cover the whole surface.
    fn draw_image(&mut self, image: &BackgroundImage);

    /// Encode the current pixels. `quality` is in `0.0..=1.0` and only
    /// meaningful for lossy formats.
    fn encode(&self, format: ImageFormat, quality: Option<f32>) -> SurfaceResult<Vec<u8>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_maps_to_compose() {
        assert_eq!(Compose::from(Blend::SourceOver), Compose::SrcOver);
        assert_eq!(Compose::from(Blend::Erase), Compose::DestOut);
    }

    #[test]
    fn test_paint_constructors() {
        let paint = Paint::solid(SerializableColor::black());
        assert_eq!(paint.blend, Blend::SourceOver);
        assert_eq!(Paint::eraser().blend, Blend::Erase);
    }

    #[test]
    fn test_error_messages() {
        let err = SurfaceError::UnsupportedFormat(ImageFormat::Jpeg);
        assert_eq!(err.to_string(), "Unsupported export format: image/jpeg");
    }
}

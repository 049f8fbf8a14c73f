//! Encoded raster images: background images and export formats.

use super::{SurfaceError, SurfaceResult};
use base64::{Engine, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Image format for encoded image data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ImageFormat {
    /// PNG format.
    #[default]
    Png,
    /// JPEG format.
    Jpeg,
    /// WebP format.
    WebP,
}

impl ImageFormat {
    /// Get MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::WebP => "image/webp",
        }
    }

    /// Look up a format by MIME type.
    pub fn from_mime_type(mime: &str) -> Option<Self> {
        match mime.trim().to_lowercase().as_str() {
            "image/png" => Some(ImageFormat::Png),
            "image/jpeg" | "image/jpg" => Some(ImageFormat::Jpeg),
            "image/webp" => Some(ImageFormat::WebP),
            _ => None,
        }
    }

    /// Detect format from magic bytes.
    pub fn from_magic_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < 4 {
            return None;
        }

        // PNG: 89 50 4E 47
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
            return Some(ImageFormat::Png);
        }

        // JPEG: FF D8 FF
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(ImageFormat::Jpeg);
        }

        // WebP: RIFF....WEBP
        if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP" {
            return Some(ImageFormat::WebP);
        }

        None
    }
}

/// Build a `data:` URL for encoded image bytes.
pub fn to_data_url(format: ImageFormat, data: &[u8]) -> String {
    format!("data:{};base64,{}", format.mime_type(), STANDARD.encode(data))
}

/// An encoded image painted behind the drawing.
///
/// The bytes stay encoded; decoding and scaling to the surface is left to the
/// surface implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackgroundImage {
    /// Image format.
    pub format: ImageFormat,
    /// Source width in pixels.
    pub width: u32,
    /// Source height in pixels.
    pub height: u32,
    data: Arc<[u8]>,
}

impl BackgroundImage {
    /// Wrap encoded image bytes, detecting the format from their header.
    pub fn new(data: impl Into<Arc<[u8]>>, width: u32, height: u32) -> SurfaceResult<Self> {
        let data = data.into();
        let format = ImageFormat::from_magic_bytes(&data)
            .ok_or_else(|| SurfaceError::InvalidImage("unrecognized image header".to_string()))?;
        if width == 0 || height == 0 {
            return Err(SurfaceError::InvalidImage(format!(
                "image has empty dimensions {width}x{height}"
            )));
        }
        Ok(Self {
            format,
            width,
            height,
            data,
        })
    }

    /// Decode a `data:<mime>;base64,<payload>` URL.
    pub fn from_data_url(url: &str, width: u32, height: u32) -> SurfaceResult<Self> {
        let rest = url
            .strip_prefix("data:")
            .ok_or_else(|| SurfaceError::InvalidImage("not a data URL".to_string()))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| SurfaceError::InvalidImage("data URL has no payload".to_string()))?;
        let mime = header
            .strip_suffix(";base64")
            .ok_or_else(|| SurfaceError::InvalidImage("data URL is not base64".to_string()))?;
        let declared = ImageFormat::from_mime_type(mime)
            .ok_or_else(|| SurfaceError::InvalidImage(format!("unsupported image type {mime}")))?;

        let bytes = STANDARD
            .decode(payload)
            .map_err(|e| SurfaceError::InvalidImage(format!("invalid base64: {e}")))?;
        let image = Self::new(bytes, width, height)?;
        if image.format != declared {
            return Err(SurfaceError::InvalidImage(format!(
                "data URL declares {} but contains {}",
                declared.mime_type(),
                image.format.mime_type()
            )));
        }
        Ok(image)
    }

    /// The encoded image bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Re-encode as a data URL.
    pub fn to_data_url(&self) -> String {
        to_data_url(self.format, &self.data)
    }
}

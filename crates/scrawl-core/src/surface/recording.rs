//! Display-list surface.

use super::{BackgroundImage, ImageFormat, Paint, Surface, SurfaceError, SurfaceResult};
use kurbo::{Point, Size};

/// A single recorded drawing command.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Stroke {
        from: Point,
        to: Point,
        width: f64,
        paint: Paint,
    },
    Fill(Paint),
    Image(BackgroundImage),
}

/// Surface that records drawing commands instead of rasterizing them.
///
/// `clear()` drops everything recorded so far, so the op list always
/// describes exactly what is visible. Two surfaces hold the same pixels when
/// their op lists are equal.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingSurface {
    size: Size,
    ops: Vec<DrawOp>,
    /// Total draw calls since creation (not reset by `clear`).
    draw_calls: usize,
}

impl RecordingSurface {
    /// Create an empty surface of the given size.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: Size::new(width, height),
            ops: Vec::new(),
            draw_calls: 0,
        }
    }

    /// Commands visible since the last clear.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Number of stroke commands visible.
    pub fn stroke_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Stroke { .. }))
            .count()
    }

    /// Draw calls issued over the surface's lifetime.
    pub fn draw_calls(&self) -> usize {
        self.draw_calls
    }

    fn record(&mut self, op: DrawOp) {
        self.draw_calls += 1;
        self.ops.push(op);
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self) {
        self.ops.clear();
    }

    fn draw_stroke(&mut self, from: Point, to: Point, width: f64, paint: &Paint) {
        self.record(DrawOp::Stroke {
            from,
            to,
            width,
            paint: *paint,
        });
    }

    fn fill(&mut self, paint: &Paint) {
        self.record(DrawOp::Fill(*paint));
    }

    fn draw_image(&mut self, image: &BackgroundImage) {
        self.record(DrawOp::Image(image.clone()));
    }

    fn encode(&self, format: ImageFormat, _quality: Option<f32>) -> SurfaceResult<Vec<u8>> {
        // No pixels to encode.
        Err(SurfaceError::UnsupportedFormat(format))
    }
}

//! Scrawl Tools
//!
//! The standard tool set: freehand pen, eraser, straight line, bucket fill
//! and clear. Every tool is a pair of plain functions implementing the
//! core's input and draw contracts, plus a serde-friendly options struct.

mod gesture;

pub mod bucket;
pub mod clear;
pub mod eraser;
pub mod line;
pub mod pen;

pub use bucket::BucketOptions;
pub use clear::ClearOptions;
pub use eraser::EraserOptions;
pub use line::LineOptions;
pub use pen::PenOptions;

use scrawl_core::{Canvas, CanvasResult, Surface, ToolConfig, ToolOptions};
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolKind {
    Pen,
    Eraser,
    Line,
    Bucket,
    Clear,
}

impl ToolKind {
    pub const ALL: [ToolKind; 5] = [
        ToolKind::Pen,
        ToolKind::Eraser,
        ToolKind::Line,
        ToolKind::Bucket,
        ToolKind::Clear,
    ];
}

/// Configuration of any standard tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tool", rename_all = "snake_case")]
pub enum ToolSettings {
    Pen(PenOptions),
    Eraser(EraserOptions),
    Line(LineOptions),
    Bucket(BucketOptions),
    Clear(ClearOptions),
}

impl ToolConfig for ToolSettings {
    type Kind = ToolKind;

    fn kind(&self) -> ToolKind {
        match self {
            ToolSettings::Pen(_) => ToolKind::Pen,
            ToolSettings::Eraser(_) => ToolKind::Eraser,
            ToolSettings::Line(_) => ToolKind::Line,
            ToolSettings::Bucket(_) => ToolKind::Bucket,
            ToolSettings::Clear(_) => ToolKind::Clear,
        }
    }
}

macro_rules! tool_options {
    ($options:ident, $variant:ident) => {
        impl ToolOptions<ToolSettings> for $options {
            const KIND: ToolKind = ToolKind::$variant;

            fn into_config(self) -> ToolSettings {
                ToolSettings::$variant(self)
            }

            fn from_config(config: &ToolSettings) -> Option<&Self> {
                match config {
                    ToolSettings::$variant(options) => Some(options),
                    _ => None,
                }
            }
        }

        impl From<$options> for ToolSettings {
            fn from(options: $options) -> Self {
                ToolSettings::$variant(options)
            }
        }
    };
}

tool_options!(PenOptions, Pen);
tool_options!(EraserOptions, Eraser);
tool_options!(LineOptions, Line);
tool_options!(BucketOptions, Bucket);
tool_options!(ClearOptions, Clear);

/// Register every standard tool with default options.
///
/// No tool is selected afterwards.
pub fn register_defaults<S: Surface>(canvas: &mut Canvas<ToolSettings, S>) -> CanvasResult<()> {
    canvas.register(pen::handle_input, pen::draw, PenOptions::default())?;
    canvas.register(eraser::handle_input, eraser::draw, EraserOptions::default())?;
    canvas.register(line::handle_input, line::draw, LineOptions::default())?;
    canvas.register(bucket::handle_input, bucket::draw, BucketOptions::default())?;
    canvas.register(clear::handle_input, clear::draw, ClearOptions::default())?;
    log::debug!("Registered {} default tools", ToolKind::ALL.len());
    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use scrawl_core::{CanvasConfig, RecordingSurface};

    pub fn canvas_with(tool: ToolKind) -> Canvas<ToolSettings, RecordingSurface> {
        let mut canvas = Canvas::new(
            RecordingSurface::new(300.0, 300.0),
            CanvasConfig::new(300, 300),
        );
        register_defaults(&mut canvas).unwrap();
        canvas.select_tool(tool).unwrap();
        canvas
    }
}

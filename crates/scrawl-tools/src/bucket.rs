//! Bucket: floods the whole surface with one colour.

use crate::{ToolSettings, gesture};
use scrawl_core::{
    ActionStep, Dispatch, InputContext, Paint, PointerEvent, SerializableColor, StepTag, Surface,
    SurfaceConfig, ToolError, ToolOptions, ToolResult,
};
use serde::{Deserialize, Serialize};

/// Bucket options.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BucketOptions {
    pub color: SerializableColor,
}

impl Default for BucketOptions {
    fn default() -> Self {
        Self {
            color: SerializableColor::black(),
        }
    }
}

pub fn handle_input(
    event: &PointerEvent,
    ctx: &InputContext<'_, ToolSettings>,
) -> ToolResult<Dispatch<ToolSettings>> {
    gesture::click(event, ctx)
}

pub fn draw(
    step: &ActionStep<ToolSettings>,
    _prefix: &[ActionStep<ToolSettings>],
    surface: &mut dyn Surface,
    _surface_config: &SurfaceConfig,
) -> ToolResult<()> {
    let options = BucketOptions::view(&step.config)?;
    match &step.tag {
        StepTag::Down => Ok(()),
        StepTag::Up => {
            surface.fill(&Paint::solid(options.color));
            Ok(())
        }
        tag => Err(ToolError::UnrecognizedTag(tag.clone())),
    }
}

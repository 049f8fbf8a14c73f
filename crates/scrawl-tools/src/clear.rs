//! Clear: wipes the surface back to white as an undoable action.

use crate::{ToolSettings, gesture};
use scrawl_core::{
    ActionStep, Dispatch, InputContext, Paint, PointerEvent, SerializableColor, StepTag, Surface,
    SurfaceConfig, ToolError, ToolOptions, ToolResult,
};
use serde::{Deserialize, Serialize};

/// The clear tool has no options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClearOptions {}

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
    ClearOptions::view(&step.config)?;
    match &step.tag {
        StepTag::Down => Ok(()),
        StepTag::Up => {
            surface.clear();
            surface.fill(&Paint::solid(SerializableColor::white()));
            Ok(())
        }
        tag => Err(ToolError::UnrecognizedTag(tag.clone())),
    }
}

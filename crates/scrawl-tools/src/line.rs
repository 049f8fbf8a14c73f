//! Straight line following the pointer.
//!
//! Each move replaces the previous move, so the action always holds at most
//! a down and one end point, and renders as a single segment.

use crate::{ToolSettings, gesture};
use scrawl_core::{
    ActionStep, Dispatch, InputContext, Paint, PointerEvent, SerializableColor, StepTag, Surface,
    SurfaceConfig, ToolOptions, ToolResult,
};
use serde::{Deserialize, Serialize};

/// Line options.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineOptions {
    /// Stroke width in pixels.
    pub size: f64,
    pub color: SerializableColor,
}

impl Default for LineOptions {
    fn default() -> Self {
        Self {
            size: 4.0,
            color: SerializableColor::black(),
        }
    }
}

const LINE_TAGS: [StepTag; 2] = [StepTag::Down, StepTag::Move];

pub fn handle_input(
    event: &PointerEvent,
    ctx: &InputContext<'_, ToolSettings>,
) -> ToolResult<Dispatch<ToolSettings>> {
    let position = event.position();
    match event {
        PointerEvent::Down { .. } => Ok(Dispatch::append(ctx.step(StepTag::Down, position))),
        PointerEvent::Move { .. } => {
            let previous = ctx.require_previous(&LINE_TAGS, event)?;
            let step = ctx.step(StepTag::Move, position);
            if previous.tag == StepTag::Move {
                Ok(Dispatch::replace(step))
            } else {
                Ok(Dispatch::append(step))
            }
        }
        PointerEvent::Up { .. } => {
            let previous = ctx.require_previous(&LINE_TAGS, event)?;
            let step = ctx.step(StepTag::Up, position);
            if previous.tag == StepTag::Move {
                Ok(Dispatch::end_replacing(step))
            } else {
                Ok(Dispatch::end_with(step))
            }
        }
    }
}

pub fn draw(
    step: &ActionStep<ToolSettings>,
    prefix: &[ActionStep<ToolSettings>],
    surface: &mut dyn Surface,
    _surface_config: &SurfaceConfig,
) -> ToolResult<()> {
    let options = LineOptions::view(&step.config)?;
    gesture::stroke_segment(
        step,
        prefix,
        surface,
        options.size,
        &Paint::solid(options.color),
    )
}

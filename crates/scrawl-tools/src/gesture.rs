//! Input and drawing patterns shared by several tools.

use crate::ToolSettings;
use scrawl_core::{
    ActionStep, Dispatch, InputContext, Paint, PointerEvent, StepTag, Surface, ToolError,
    ToolResult,
};

type Ctx<'a> = InputContext<'a, ToolSettings>;

const STROKE_TAGS: [StepTag; 2] = [StepTag::Down, StepTag::Move];

/// Down, any number of moves, up. Every event records a step.
pub(crate) fn freehand(event: &PointerEvent, ctx: &Ctx<'_>) -> ToolResult<Dispatch<ToolSettings>> {
    let position = event.position();
    match event {
        PointerEvent::Down { .. } => Ok(Dispatch::append(ctx.step(StepTag::Down, position))),
        PointerEvent::Move { .. } => {
            ctx.require_previous(&STROKE_TAGS, event)?;
            Ok(Dispatch::append(ctx.step(StepTag::Move, position)))
        }
        PointerEvent::Up { .. } => {
            ctx.require_previous(&STROKE_TAGS, event)?;
            Ok(Dispatch::end_with(ctx.step(StepTag::Up, position)))
        }
    }
}

/// Down then up; moves are ignored. A release off the surface cancels.
pub(crate) fn click(event: &PointerEvent, ctx: &Ctx<'_>) -> ToolResult<Dispatch<ToolSettings>> {
    let position = event.position();
    match event {
        PointerEvent::Down { .. } => Ok(Dispatch::append(ctx.step(StepTag::Down, position))),
        PointerEvent::Move { .. } => Ok(Dispatch::ignore()),
        PointerEvent::Up { .. } => {
            ctx.require_previous(&[StepTag::Down], event)?;
            if !ctx.surface_config.contains(position) {
                log::debug!("Release at {position:?} outside the surface");
                return Ok(Dispatch::Cancel);
            }
            Ok(Dispatch::end_with(ctx.step(StepTag::Up, position)))
        }
    }
}

/// Stroke from the previous step of the action to `step`.
///
/// Down steps draw nothing; they only anchor the next segment.
pub(crate) fn stroke_segment(
    step: &ActionStep<ToolSettings>,
    prefix: &[ActionStep<ToolSettings>],
    surface: &mut dyn Surface,
    width: f64,
    paint: &Paint,
) -> ToolResult<()> {
    match &step.tag {
        StepTag::Down => Ok(()),
        StepTag::Move | StepTag::Up => {
            let from = prefix
                .last()
                .ok_or_else(|| ToolError::MissingPrecedingStep(step.tag.clone()))?;
            surface.draw_stroke(from.position, step.position, width, paint);
            Ok(())
        }
        tag => Err(ToolError::UnrecognizedTag(tag.clone())),
    }
}

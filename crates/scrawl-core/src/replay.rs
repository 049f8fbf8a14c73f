//! Replay engine.
//!
//! Rebuilds the surface from the background and the committed actions.
//! Rendering is deterministic: the same actions on the same background
//! always produce the same surface.

use crate::canvas::{CanvasError, CanvasResult};
use crate::color::SerializableColor;
use crate::config::{Background, SurfaceConfig};
use crate::history::{Action, StepPosition};
use crate::surface::{Paint, Surface};
use crate::tools::{ToolConfig, ToolRegistry};

/// Clear the surface and paint the background.
///
/// Image backgrounds are drawn over white so transparent regions of the
/// image do not show through.
pub fn paint_background(surface: &mut dyn Surface, background: &Background) {
    surface.clear();
    match background {
        Background::Color(color) => surface.fill(&Paint::solid(*color)),
        Background::Image(image) => {
            surface.fill(&Paint::solid(SerializableColor::white()));
            surface.draw_image(image);
        }
    }
}

/// Draw the step at `position` with its tool's draw-handler.
pub(crate) fn draw_step<C: ToolConfig>(
    surface: &mut dyn Surface,
    registry: &ToolRegistry<C>,
    action: &Action<C>,
    position: StepPosition,
    surface_config: &SurfaceConfig,
) -> CanvasResult<()> {
    let step = action
        .steps()
        .get(position.step)
        .ok_or_else(|| CanvasError::UnknownStep(position))?;
    let draw = registry.draw_handler(action.tool())?;
    draw.draw_step(step, action.prefix(position.step), surface, surface_config)
        .map_err(|source| CanvasError::DrawFailure {
            tool: format!("{:?}", action.tool()),
            position,
            source,
        })
}

/// Re-render `actions` from a blank surface.
///
/// With `stop_before`, rendering stops just before that step, leaving the
/// surface as it was before the step was first drawn.
pub fn render<C: ToolConfig>(
    surface: &mut dyn Surface,
    registry: &ToolRegistry<C>,
    actions: &[Action<C>],
    surface_config: &SurfaceConfig,
    background: &Background,
    stop_before: Option<StepPosition>,
) -> CanvasResult<()> {
    paint_background(surface, background);

    for (index, action) in actions.iter().enumerate() {
        for step in 0..action.len() {
            let position = StepPosition::new(index, step);
            if stop_before.is_some_and(|stop| position >= stop) {
                return Ok(());
            }
            if let Err(err) = draw_step(surface, registry, action, position, surface_config) {
                log::error!("Replay failed at {position}: {err}");
                return Err(err);
            }
        }
    }
    Ok(())
}

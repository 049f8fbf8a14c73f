//! Eraser: a freehand stroke that removes what it covers.

use crate::{ToolSettings, gesture};
use scrawl_core::{
    ActionStep, Dispatch, InputContext, Paint, PointerEvent, Surface, SurfaceConfig, ToolOptions,
    ToolResult,
};
use serde::{Deserialize, Serialize};

/// Eraser options.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EraserOptions {
    /// Stroke width in pixels.
    pub size: f64,
}

impl Default for EraserOptions {
    fn default() -> Self {
        Self { size: 20.0 }
    }
}

pub fn handle_input(
    event: &PointerEvent,
    ctx: &InputContext<'_, ToolSettings>,
) -> ToolResult<Dispatch<ToolSettings>> {
    gesture::freehand(event, ctx)
}

pub fn draw(
    step: &ActionStep<ToolSettings>,
    prefix: &[ActionStep<ToolSettings>],
    surface: &mut dyn Surface,
    _surface_config: &SurfaceConfig,
) -> ToolResult<()> {
    let options = EraserOptions::view(&step.config)?;
    gesture::stroke_segment(step, prefix, surface, options.size, &Paint::eraser())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ToolKind;
    use crate::test_support::canvas_with;
    use scrawl_core::{Blend, DispatchOutcome, DrawOp};

    #[test]
    fn test_strokes_erase() {
        let mut canvas = canvas_with(ToolKind::Eraser);
        canvas.handle_pointer_event(PointerEvent::down(10.0, 10.0)).unwrap();
        canvas.handle_pointer_event(PointerEvent::up(40.0, 10.0)).unwrap();

        match canvas.surface().ops().last() {
            Some(DrawOp::Stroke { width, paint, .. }) => {
                assert_eq!(*width, 20.0);
                assert_eq!(paint.blend, Blend::Erase);
            }
            other => panic!("expected an erasing stroke, got {other:?}"),
        }
    }

    #[test]
    fn test_up_without_down() {
        let mut canvas = canvas_with(ToolKind::Eraser);
        let outcome = canvas.handle_pointer_event(PointerEvent::up(40.0, 10.0)).unwrap();
        assert!(matches!(outcome, DispatchOutcome::Rejected(_)));
        assert_eq!(canvas.surface().stroke_count(), 0);
    }
}

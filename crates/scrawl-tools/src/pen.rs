//! Freehand pen.

use crate::{ToolSettings, gesture};
use scrawl_core::{
    ActionStep, Dispatch, InputContext, Paint, PointerEvent, SerializableColor, Surface,
    SurfaceConfig, ToolOptions, ToolResult,
};
use serde::{Deserialize, Serialize};

/// Pen options.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PenOptions {
    /// Stroke width in pixels.
    pub size: f64,
    pub color: SerializableColor,
}

impl Default for PenOptions {
    fn default() -> Self {
        Self {
            size: 4.0,
            color: SerializableColor::black(),
        }
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
    let options = PenOptions::view(&step.config)?;
    gesture::stroke_segment(
        step,
        prefix,
        surface,
        options.size,
        &Paint::solid(options.color),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ToolKind;
    use crate::test_support::canvas_with;
    use kurbo::Point;
    use scrawl_core::{DispatchOutcome, DrawOp, StepTag};

    #[test]
    fn test_stroke_records_down_move_up() {
        let mut canvas = canvas_with(ToolKind::Pen);
        canvas.handle_pointer_event(PointerEvent::down(10.0, 10.0)).unwrap();
        canvas.handle_pointer_event(PointerEvent::moved(20.0, 10.0)).unwrap();
        let outcome = canvas.handle_pointer_event(PointerEvent::up(30.0, 10.0)).unwrap();
        assert!(matches!(outcome, DispatchOutcome::Sealed));

        let history = canvas.history();
        assert_eq!(history.len(), 1);
        assert!(history.undone().is_empty());
        let tags: Vec<_> = history.committed()[0]
            .steps()
            .iter()
            .map(|step| step.tag.clone())
            .collect();
        assert_eq!(tags, vec![StepTag::Down, StepTag::Move, StepTag::Up]);
    }

    #[test]
    fn test_draws_segments_with_options() {
        let mut canvas = canvas_with(ToolKind::Pen);
        let red = SerializableColor::new(255, 0, 0, 255);
        canvas
            .set_tool_options(PenOptions { size: 9.0, color: red })
            .unwrap();
        canvas.handle_pointer_event(PointerEvent::down(10.0, 10.0)).unwrap();
        canvas.handle_pointer_event(PointerEvent::moved(20.0, 10.0)).unwrap();

        assert_eq!(
            canvas.surface().ops().last(),
            Some(&DrawOp::Stroke {
                from: Point::new(10.0, 10.0),
                to: Point::new(20.0, 10.0),
                width: 9.0,
                paint: Paint::solid(red),
            })
        );
    }

    #[test]
    fn test_move_without_down() {
        let mut canvas = canvas_with(ToolKind::Pen);
        let outcome = canvas.handle_pointer_event(PointerEvent::moved(20.0, 10.0)).unwrap();
        assert!(matches!(outcome, DispatchOutcome::Rejected(_)));
        assert!(canvas.history().is_empty());
    }
}

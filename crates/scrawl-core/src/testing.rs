//! Minimal tools used by the unit tests.

use crate::color::SerializableColor;
use crate::config::SurfaceConfig;
use crate::history::{ActionStep, StepTag};
use crate::input::PointerEvent;
use crate::surface::{Paint, Surface};
use crate::tools::{
    Dispatch, InputContext, ToolConfig, ToolError, ToolOptions, ToolRegistry, ToolResult,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TestKind {
    Pen,
    Line,
    Stamp,
    Faulty,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PenOptions {
    pub width: f64,
}

impl Default for PenOptions {
    fn default() -> Self {
        Self { width: 2.0 }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TestConfig {
    Pen(PenOptions),
    Line(PenOptions),
    Stamp,
    Faulty,
}

impl ToolConfig for TestConfig {
    type Kind = TestKind;

    fn kind(&self) -> TestKind {
        match self {
            TestConfig::Pen(_) => TestKind::Pen,
            TestConfig::Line(_) => TestKind::Line,
            TestConfig::Stamp => TestKind::Stamp,
            TestConfig::Faulty => TestKind::Faulty,
        }
    }
}

impl ToolOptions<TestConfig> for PenOptions {
    const KIND: TestKind = TestKind::Pen;

    fn into_config(self) -> TestConfig {
        TestConfig::Pen(self)
    }

    fn from_config(config: &TestConfig) -> Option<&Self> {
        match config {
            TestConfig::Pen(options) => Some(options),
            _ => None,
        }
    }
}

fn width_of(config: &TestConfig) -> f64 {
    match config {
        TestConfig::Pen(options) | TestConfig::Line(options) => options.width,
        _ => 1.0,
    }
}

/// Freehand: down, move*, up.
pub fn pen_input(
    event: &PointerEvent,
    ctx: &InputContext<'_, TestConfig>,
) -> ToolResult<Dispatch<TestConfig>> {
    let position = event.position();
    match event {
        PointerEvent::Down { .. } => Ok(Dispatch::append(ctx.step(StepTag::Down, position))),
        PointerEvent::Move { .. } => {
            ctx.require_previous(&[StepTag::Down, StepTag::Move], event)?;
            Ok(Dispatch::append(ctx.step(StepTag::Move, position)))
        }
        PointerEvent::Up { .. } => {
            ctx.require_previous(&[StepTag::Down, StepTag::Move], event)?;
            Ok(Dispatch::end_with(ctx.step(StepTag::Up, position)))
        }
    }
}

/// Straight segment: moves replace the previous move.
pub fn line_input(
    event: &PointerEvent,
    ctx: &InputContext<'_, TestConfig>,
) -> ToolResult<Dispatch<TestConfig>> {
    let position = event.position();
    match event {
        PointerEvent::Down { .. } => Ok(Dispatch::append(ctx.step(StepTag::Down, position))),
        PointerEvent::Move { .. } => {
            let previous = ctx.require_previous(&[StepTag::Down, StepTag::Move], event)?;
            let step = ctx.step(StepTag::Move, position);
            if previous.tag == StepTag::Move {
                Ok(Dispatch::replace(step))
            } else {
                Ok(Dispatch::append(step))
            }
        }
        PointerEvent::Up { .. } => {
            let previous = ctx.require_previous(&[StepTag::Down, StepTag::Move], event)?;
            let step = ctx.step(StepTag::Up, position);
            if previous.tag == StepTag::Move {
                Ok(Dispatch::end_replacing(step))
            } else {
                Ok(Dispatch::end_with(step))
            }
        }
    }
}

/// Strokes from the previous step of the same action.
pub fn stroke_draw(
    step: &ActionStep<TestConfig>,
    prefix: &[ActionStep<TestConfig>],
    surface: &mut dyn Surface,
    _surface_config: &SurfaceConfig,
) -> ToolResult<()> {
    match &step.tag {
        StepTag::Down => Ok(()),
        StepTag::Move | StepTag::Up => {
            let from = prefix
                .last()
                .ok_or_else(|| ToolError::MissingPrecedingStep(step.tag.clone()))?;
            surface.draw_stroke(
                from.position,
                step.position,
                width_of(&step.config),
                &Paint::solid(SerializableColor::black()),
            );
            Ok(())
        }
        tag => Err(ToolError::UnrecognizedTag(tag.clone())),
    }
}

/// Records on down, fills on release, cancels when released off-surface.
pub fn stamp_input(
    event: &PointerEvent,
    ctx: &InputContext<'_, TestConfig>,
) -> ToolResult<Dispatch<TestConfig>> {
    let position = event.position();
    match event {
        PointerEvent::Down { .. } => Ok(Dispatch::append(ctx.step(StepTag::Down, position))),
        PointerEvent::Move { .. } => Ok(Dispatch::ignore()),
        PointerEvent::Up { .. } => {
            ctx.require_previous(&[StepTag::Down], event)?;
            if !ctx.surface_config.contains(position) {
                return Ok(Dispatch::Cancel);
            }
            Ok(Dispatch::end_with(ctx.step(StepTag::Up, position)))
        }
    }
}

pub fn stamp_draw(
    step: &ActionStep<TestConfig>,
    _prefix: &[ActionStep<TestConfig>],
    surface: &mut dyn Surface,
    _surface_config: &SurfaceConfig,
) -> ToolResult<()> {
    match &step.tag {
        StepTag::Down => Ok(()),
        StepTag::Up => {
            surface.fill(&Paint::solid(SerializableColor::new(255, 0, 0, 255)));
            Ok(())
        }
        tag => Err(ToolError::UnrecognizedTag(tag.clone())),
    }
}

/// Records down and moves, fails on release. Moves far right are recorded
/// with a tag its draw-handler rejects.
pub fn faulty_input(
    event: &PointerEvent,
    ctx: &InputContext<'_, TestConfig>,
) -> ToolResult<Dispatch<TestConfig>> {
    let position = event.position();
    match event {
        PointerEvent::Down { .. } => Ok(Dispatch::append(ctx.step(StepTag::Down, position))),
        PointerEvent::Move { .. } if position.x >= 500.0 => Ok(Dispatch::append(
            ctx.step(StepTag::Custom("smudge".into()), position),
        )),
        PointerEvent::Move { .. } => Ok(Dispatch::append(ctx.step(StepTag::Move, position))),
        PointerEvent::Up { .. } => Err(ToolError::InconsistentGestureState(
            "release rejected".into(),
        )),
    }
}

pub fn register_test_tools(registry: &mut ToolRegistry<TestConfig>) {
    let registered = [
        registry.register(pen_input, stroke_draw, PenOptions::default()),
        registry.register_tool(
            TestKind::Line,
            line_input,
            stroke_draw,
            TestConfig::Line(PenOptions::default()),
        ),
        registry.register_tool(TestKind::Stamp, stamp_input, stamp_draw, TestConfig::Stamp),
        registry.register_tool(TestKind::Faulty, faulty_input, stroke_draw, TestConfig::Faulty),
    ];
    for result in registered {
        if let Err(err) = result {
            panic!("test tool registration failed: {err}");
        }
    }
}

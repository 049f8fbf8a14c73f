//! Tool contract.
//!
//! A tool is a pair of callbacks plus a configuration value. The
//! input-handler turns pointer events into [`Dispatch`] intents; the
//! draw-handler renders one recorded step. The core never knows what a tool
//! draws, only how its steps are recorded and replayed.

mod registry;

pub use registry::ToolRegistry;

use crate::config::SurfaceConfig;
use crate::history::{ActionStep, StepTag};
use crate::input::PointerEvent;
use crate::surface::Surface;
use kurbo::Point;
use std::fmt;
use std::hash::Hash;
use thiserror::Error;

/// Errors raised by tool callbacks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    #[error("Inconsistent gesture state: {0}")]
    InconsistentGestureState(String),
    #[error("Missing preceding step for {0} step")]
    MissingPrecedingStep(StepTag),
    #[error("Unrecognized step tag: {0}")]
    UnrecognizedTag(StepTag),
    #[error("Unexpected configuration: {0}")]
    UnexpectedConfig(String),
}

/// Result type for tool callbacks.
pub type ToolResult<T> = Result<T, ToolError>;

/// The configuration values of every tool of an application.
///
/// Usually an enum with one variant per tool, each wrapping that tool's
/// options type.
pub trait ToolConfig: Clone + fmt::Debug + 'static {
    /// Tool identifier.
    type Kind: Copy + Eq + Hash + fmt::Debug + 'static;

    /// The tool this configuration belongs to.
    fn kind(&self) -> Self::Kind;
}

/// Typed view of one tool's options inside the application's configuration.
pub trait ToolOptions<C: ToolConfig>: Clone + 'static {
    /// The tool these options configure.
    const KIND: C::Kind;

    fn into_config(self) -> C;

    /// Borrow the options if `config` belongs to this tool.
    fn from_config(config: &C) -> Option<&Self>;

    /// Like [`ToolOptions::from_config`], for use inside tool callbacks.
    fn view(config: &C) -> ToolResult<&Self> {
        Self::from_config(config).ok_or_else(|| {
            ToolError::UnexpectedConfig(format!(
                "expected {:?} options, found {:?}",
                Self::KIND,
                config.kind()
            ))
        })
    }
}

/// What an input-handler wants recorded.
#[derive(Debug, Clone, PartialEq)]
pub enum StepUpdate<C> {
    /// Append to the current action, starting one when idle.
    Append(ActionStep<C>),
    /// Replace the last step of the current action.
    Replace(ActionStep<C>),
}

impl<C> StepUpdate<C> {
    pub fn step(&self) -> &ActionStep<C> {
        match self {
            StepUpdate::Append(step) | StepUpdate::Replace(step) => step,
        }
    }
}

/// Intent returned by an input-handler.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch<C> {
    /// The gesture continues, optionally with a new or replaced step.
    Continue(Option<StepUpdate<C>>),
    /// The gesture is complete. The current action is sealed after the
    /// optional update is applied.
    End(Option<StepUpdate<C>>),
    /// Discard the in-progress action.
    Cancel,
}

impl<C> Dispatch<C> {
    /// Observed, nothing recorded.
    pub fn ignore() -> Self {
        Dispatch::Continue(None)
    }

    pub fn append(step: ActionStep<C>) -> Self {
        Dispatch::Continue(Some(StepUpdate::Append(step)))
    }

    pub fn replace(step: ActionStep<C>) -> Self {
        Dispatch::Continue(Some(StepUpdate::Replace(step)))
    }

    /// Append a final step and seal.
    pub fn end_with(step: ActionStep<C>) -> Self {
        Dispatch::End(Some(StepUpdate::Append(step)))
    }

    /// Replace the last step and seal.
    pub fn end_replacing(step: ActionStep<C>) -> Self {
        Dispatch::End(Some(StepUpdate::Replace(step)))
    }

    /// Seal without recording anything.
    pub fn seal() -> Self {
        Dispatch::End(None)
    }
}

/// Everything an input-handler may look at.
pub struct InputContext<'a, C: ToolConfig> {
    /// Read-only surface.
    pub surface: &'a dyn Surface,
    pub surface_config: &'a SurfaceConfig,
    /// Clone of the tool's current configuration.
    pub config: C,
    /// Steps of the current action; empty when idle.
    pub action: &'a [ActionStep<C>],
}

impl<'a, C: ToolConfig> InputContext<'a, C> {
    pub fn last_step(&self) -> Option<&'a ActionStep<C>> {
        self.action.last()
    }

    pub fn last_tag(&self) -> Option<&'a StepTag> {
        self.last_step().map(|step| &step.tag)
    }

    /// Build a step carrying the current configuration.
    pub fn step(&self, tag: StepTag, position: Point) -> ActionStep<C> {
        ActionStep::new(self.config.clone(), position, tag)
    }

    /// The last step, provided its tag is one of `allowed`.
    pub fn require_previous(
        &self,
        allowed: &[StepTag],
        event: &PointerEvent,
    ) -> ToolResult<&'a ActionStep<C>> {
        match self.last_step() {
            Some(step) if allowed.contains(&step.tag) => Ok(step),
            Some(step) => Err(ToolError::InconsistentGestureState(format!(
                "pointer {} after {} step",
                event.phase(),
                step.tag
            ))),
            None => Err(ToolError::InconsistentGestureState(format!(
                "pointer {} without a gesture in progress",
                event.phase()
            ))),
        }
    }
}

/// Turns pointer events into recording intents.
pub trait InputHandler<C: ToolConfig> {
    fn handle_input(&self, event: &PointerEvent, ctx: &InputContext<'_, C>)
    -> ToolResult<Dispatch<C>>;
}

impl<C, F> InputHandler<C> for F
where
    C: ToolConfig,
    F: Fn(&PointerEvent, &InputContext<'_, C>) -> ToolResult<Dispatch<C>>,
{
    fn handle_input(
        &self,
        event: &PointerEvent,
        ctx: &InputContext<'_, C>,
    ) -> ToolResult<Dispatch<C>> {
        self(event, ctx)
    }
}

/// Renders one recorded step.
///
/// `prefix` holds the steps of the same action recorded before `step`.
/// Must be deterministic: the same arguments draw the same pixels.
pub trait DrawHandler<C: ToolConfig> {
    fn draw_step(
        &self,
        step: &ActionStep<C>,
        prefix: &[ActionStep<C>],
        surface: &mut dyn Surface,
        surface_config: &SurfaceConfig,
    ) -> ToolResult<()>;
}

impl<C, F> DrawHandler<C> for F
where
    C: ToolConfig,
    F: Fn(&ActionStep<C>, &[ActionStep<C>], &mut dyn Surface, &SurfaceConfig) -> ToolResult<()>,
{
    fn draw_step(
        &self,
        step: &ActionStep<C>,
        prefix: &[ActionStep<C>],
        surface: &mut dyn Surface,
        surface_config: &SurfaceConfig,
    ) -> ToolResult<()> {
        self(step, prefix, surface, surface_config)
    }
}

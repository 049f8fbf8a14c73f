//! Input dispatcher.
//!
//! Routes pointer events to the active tool, applies the returned intent to
//! the history and draws the affected step. Tool failures during a gesture
//! roll the gesture back and re-render, so a half-drawn action never stays
//! on the surface.

use crate::canvas::{CanvasError, CanvasResult};
use crate::config::{Background, SurfaceConfig};
use crate::history::{Action, ActionStep, History, StepPosition};
use crate::input::PointerEvent;
use crate::replay;
use crate::surface::Surface;
use crate::tools::{Dispatch, InputContext, StepUpdate, ToolConfig, ToolError, ToolRegistry};

/// Whether a gesture is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureState<K> {
    Idle,
    /// A gesture is open; its action is the last committed one.
    Active { tool: K },
}

impl<K> Default for GestureState<K> {
    fn default() -> Self {
        GestureState::Idle
    }
}

impl<K> GestureState<K> {
    pub fn is_active(&self) -> bool {
        matches!(self, GestureState::Active { .. })
    }
}

/// What a dispatched event did.
#[derive(Debug)]
pub enum DispatchOutcome {
    /// The tool observed the event and recorded nothing.
    Ignored,
    /// A step was appended and drawn.
    Recorded,
    /// The last step was replaced and the surface re-rendered.
    Replaced,
    /// The gesture completed and its action is now an undo target.
    Sealed,
    /// The tool discarded its gesture.
    Cancelled,
    /// The tool failed while no gesture was open. Nothing changed.
    Rejected(CanvasError),
    /// The tool failed mid-gesture. The gesture was discarded and the
    /// surface re-rendered from history.
    RolledBack(CanvasError),
}

impl DispatchOutcome {
    /// The absorbed error, if the event failed.
    pub fn error(&self) -> Option<&CanvasError> {
        match self {
            DispatchOutcome::Rejected(err) | DispatchOutcome::RolledBack(err) => Some(err),
            _ => None,
        }
    }
}

/// Tool registry, history and gesture state.
#[derive(Debug)]
pub struct Dispatcher<C: ToolConfig> {
    registry: ToolRegistry<C>,
    history: History<C>,
    gesture: GestureState<C::Kind>,
}

impl<C: ToolConfig> Default for Dispatcher<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ToolConfig> Dispatcher<C> {
    pub fn new() -> Self {
        Self {
            registry: ToolRegistry::new(),
            history: History::new(),
            gesture: GestureState::Idle,
        }
    }

    pub fn registry(&self) -> &ToolRegistry<C> {
        &self.registry
    }

    /// Mutable registry access. A tool selected through it abandons the open
    /// gesture on the next event rather than immediately.
    pub fn registry_mut(&mut self) -> &mut ToolRegistry<C> {
        &mut self.registry
    }

    pub fn history(&self) -> &History<C> {
        &self.history
    }

    pub fn gesture(&self) -> GestureState<C::Kind> {
        self.gesture
    }

    /// Select a tool, abandoning a gesture of another tool.
    pub fn select_tool(&mut self, kind: C::Kind) -> CanvasResult<()> {
        self.registry.select_tool(kind)?;
        if matches!(self.gesture, GestureState::Active { tool } if tool != kind) {
            self.abandon_gesture();
        }
        Ok(())
    }

    /// Discard the open action, if any, without redrawing.
    /// Returns true if a gesture was abandoned.
    pub fn abandon_gesture(&mut self) -> bool {
        let GestureState::Active { tool } = self.gesture else {
            return false;
        };
        self.history.discard_last_action();
        self.gesture = GestureState::Idle;
        log::debug!("Abandoned {tool:?} gesture");
        true
    }

    /// Undo the last sealed action.
    pub fn undo(&mut self) -> bool {
        self.abandon_gesture();
        self.history.undo()
    }

    /// Redo the last undone action.
    pub fn redo(&mut self) -> bool {
        self.abandon_gesture();
        self.history.redo()
    }

    /// Forget every action.
    pub fn reset(&mut self) {
        self.abandon_gesture();
        self.history.reset();
        log::info!("History reset");
    }

    /// Re-render the whole history.
    pub fn render(
        &self,
        surface: &mut dyn Surface,
        surface_config: &SurfaceConfig,
        background: &Background,
    ) -> CanvasResult<()> {
        replay::render(
            surface,
            &self.registry,
            self.history.committed(),
            surface_config,
            background,
            None,
        )
    }

    /// Route one pointer event to the active tool.
    ///
    /// Tool failures are reported through the outcome. `Err` is returned
    /// only when no tool is selected or the history itself fails to replay.
    pub fn dispatch(
        &mut self,
        event: &PointerEvent,
        surface: &mut dyn Surface,
        surface_config: &SurfaceConfig,
        background: &Background,
    ) -> CanvasResult<DispatchOutcome> {
        let kind = self.registry.current_tool()?;
        if matches!(self.gesture, GestureState::Active { tool } if tool != kind) {
            self.abandon_gesture();
            self.render(surface, surface_config, background)?;
        }

        let action: &[ActionStep<C>] = match self.gesture {
            GestureState::Active { .. } => {
                self.history.last_action().map(Action::steps).unwrap_or(&[])
            }
            GestureState::Idle => &[],
        };
        let ctx = InputContext {
            surface: &*surface,
            surface_config,
            config: self.registry.tool_config(kind)?,
            action,
        };
        let dispatch = self.registry.input_handler(kind)?.handle_input(event, &ctx);

        let result = match dispatch {
            Ok(dispatch) => self.apply(kind, dispatch, surface, surface_config, background),
            Err(err) => Err(CanvasError::Tool(err)),
        };
        match result {
            Ok(outcome) => Ok(outcome),
            Err(err) => self.absorb(event, err, surface, surface_config, background),
        }
    }

    fn apply(
        &mut self,
        kind: C::Kind,
        dispatch: Dispatch<C>,
        surface: &mut dyn Surface,
        surface_config: &SurfaceConfig,
        background: &Background,
    ) -> CanvasResult<DispatchOutcome> {
        match dispatch {
            Dispatch::Continue(None) => Ok(DispatchOutcome::Ignored),
            Dispatch::Continue(Some(update)) => {
                self.apply_update(kind, update, surface, surface_config, background)
            }
            Dispatch::End(update) => {
                if let Some(update) = update {
                    self.apply_update(kind, update, surface, surface_config, background)?;
                }
                if !self.gesture.is_active() {
                    return Ok(DispatchOutcome::Ignored);
                }
                self.gesture = GestureState::Idle;
                self.history.clear_redo();
                log::debug!("Sealed {kind:?} action #{}", self.history.len());
                Ok(DispatchOutcome::Sealed)
            }
            Dispatch::Cancel => {
                if !self.abandon_gesture() {
                    return Ok(DispatchOutcome::Ignored);
                }
                self.render(surface, surface_config, background)?;
                Ok(DispatchOutcome::Cancelled)
            }
        }
    }

    fn apply_update(
        &mut self,
        kind: C::Kind,
        update: StepUpdate<C>,
        surface: &mut dyn Surface,
        surface_config: &SurfaceConfig,
        background: &Background,
    ) -> CanvasResult<DispatchOutcome> {
        match update {
            StepUpdate::Append(step) => {
                if !self.gesture.is_active() {
                    self.history.start_action(kind);
                    self.gesture = GestureState::Active { tool: kind };
                    log::debug!("Started {kind:?} gesture");
                }
                self.history.append_step(step);
                self.draw_last_step(surface, surface_config)?;
                Ok(DispatchOutcome::Recorded)
            }
            StepUpdate::Replace(step) => {
                let position = self.last_step_position().ok_or_else(|| {
                    CanvasError::Tool(ToolError::InconsistentGestureState(
                        "replace without a step to replace".into(),
                    ))
                })?;
                replay::render(
                    surface,
                    &self.registry,
                    self.history.committed(),
                    surface_config,
                    background,
                    Some(position),
                )?;
                self.history.replace_last_step(step);
                self.draw_last_step(surface, surface_config)?;
                log::debug!("Replaced step at {position}");
                Ok(DispatchOutcome::Replaced)
            }
        }
    }

    /// Position of the last step of the open action.
    fn last_step_position(&self) -> Option<StepPosition> {
        if !self.gesture.is_active() {
            return None;
        }
        let action = self.history.last_action()?;
        let step = action.len().checked_sub(1)?;
        Some(StepPosition::new(self.history.len() - 1, step))
    }

    fn draw_last_step(
        &self,
        surface: &mut dyn Surface,
        surface_config: &SurfaceConfig,
    ) -> CanvasResult<()> {
        let (Some(position), Some(action)) = (self.last_step_position(), self.history.last_action())
        else {
            return Ok(());
        };
        replay::draw_step(surface, &self.registry, action, position, surface_config)
    }

    /// Turn a tool failure into an outcome, rolling back an open gesture.
    fn absorb(
        &mut self,
        event: &PointerEvent,
        err: CanvasError,
        surface: &mut dyn Surface,
        surface_config: &SurfaceConfig,
        background: &Background,
    ) -> CanvasResult<DispatchOutcome> {
        if self.abandon_gesture() {
            log::warn!("Rolled back gesture on pointer {}: {err}", event.phase());
            self.render(surface, surface_config, background)?;
            Ok(DispatchOutcome::RolledBack(err))
        } else {
            log::debug!("Rejected pointer {}: {err}", event.phase());
            Ok(DispatchOutcome::Rejected(err))
        }
    }
}

//! Canvas controller.
//!
//! [`Canvas`] is what a host talks to. It owns the surface, the tools, the
//! history, the background and the running playback, and keeps the surface
//! consistent with them.

use crate::color::SerializableColor;
use crate::config::{Background, CanvasConfig};
use crate::dispatch::{DispatchOutcome, Dispatcher, GestureState};
use crate::history::{History, StepPosition};
use crate::input::PointerEvent;
use crate::playback::{CompleteCallback, Instant, Playback, PlaybackStatus, StepCallback};
use crate::replay;
use crate::surface::{BackgroundImage, ImageFormat, Surface, SurfaceError, to_data_url};
use crate::tools::{DrawHandler, InputHandler, ToolConfig, ToolError, ToolOptions, ToolRegistry};
use thiserror::Error;

/// Canvas errors.
#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("No tool selected")]
    NoToolSelected,
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
    #[error("Configuration mismatch: expected {expected} configuration, found {found}")]
    ConfigMismatch { expected: String, found: String },
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),
    #[error("Tool {tool} failed to draw {position}: {source}")]
    DrawFailure {
        tool: String,
        position: StepPosition,
        source: ToolError,
    },
    #[error("No step at {0}")]
    UnknownStep(StepPosition),
    #[error("Surface error: {0}")]
    Surface(#[from] SurfaceError),
    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type for canvas operations.
pub type CanvasResult<T> = Result<T, CanvasError>;

/// A drawing surface with pluggable tools, undo/redo and playback.
pub struct Canvas<C: ToolConfig, S: Surface> {
    surface: S,
    config: CanvasConfig,
    background: Background,
    dispatcher: Dispatcher<C>,
    playback: Option<Playback>,
}

impl<C: ToolConfig, S: Surface> Canvas<C, S> {
    /// Create a canvas and paint the configured background.
    pub fn new(surface: S, config: CanvasConfig) -> Self {
        let mut canvas = Self {
            surface,
            background: Background::Color(config.background),
            config,
            dispatcher: Dispatcher::new(),
            playback: None,
        };
        replay::paint_background(&mut canvas.surface, &canvas.background);
        canvas
    }

    /// Create a canvas from a JSON configuration.
    pub fn from_json_config(surface: S, json: &str) -> CanvasResult<Self> {
        Ok(Self::new(surface, CanvasConfig::from_json(json)?))
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Give the surface back to the host.
    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn background(&self) -> &Background {
        &self.background
    }

    pub fn history(&self) -> &History<C> {
        self.dispatcher.history()
    }

    pub fn registry(&self) -> &ToolRegistry<C> {
        self.dispatcher.registry()
    }

    pub fn gesture(&self) -> GestureState<C::Kind> {
        self.dispatcher.gesture()
    }

    // --- Tools ---

    /// Register a tool, replacing any previous registration of `kind`.
    pub fn register_tool(
        &mut self,
        kind: C::Kind,
        input: impl InputHandler<C> + 'static,
        draw: impl DrawHandler<C> + 'static,
        config: C,
    ) -> CanvasResult<()> {
        self.dispatcher
            .registry_mut()
            .register_tool(kind, input, draw, config)
    }

    /// Register a tool under its options' identifier.
    pub fn register<O: ToolOptions<C>>(
        &mut self,
        input: impl InputHandler<C> + 'static,
        draw: impl DrawHandler<C> + 'static,
        options: O,
    ) -> CanvasResult<()> {
        self.dispatcher.registry_mut().register(input, draw, options)
    }

    pub fn tool_config(&self, kind: C::Kind) -> CanvasResult<C> {
        self.registry().tool_config(kind)
    }

    /// Change a tool's configuration. Steps already recorded keep the
    /// configuration they were recorded with.
    pub fn set_tool_config(&mut self, kind: C::Kind, config: C) -> CanvasResult<()> {
        self.dispatcher.registry_mut().set_tool_config(kind, config)
    }

    pub fn tool_options<O: ToolOptions<C>>(&self) -> CanvasResult<O> {
        self.registry().tool_options()
    }

    pub fn set_tool_options<O: ToolOptions<C>>(&mut self, options: O) -> CanvasResult<()> {
        self.dispatcher.registry_mut().set_tool_options(options)
    }

    /// Make a registered tool the active one.
    pub fn select_tool(&mut self, kind: C::Kind) -> CanvasResult<()> {
        self.dispatcher.select_tool(kind)
    }

    pub fn current_tool(&self) -> CanvasResult<C::Kind> {
        self.registry().current_tool()
    }

    // --- Input ---

    /// Feed one pointer event to the active tool.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) -> CanvasResult<DispatchOutcome> {
        if self.cancel_playback() {
            self.render()?;
        }
        self.dispatcher.dispatch(
            &event,
            &mut self.surface,
            &self.config.surface,
            &self.background,
        )
    }

    // --- History ---

    /// Undo the last action. With `redraw` false the surface keeps showing
    /// the old state until the next [`Canvas::render`].
    pub fn undo(&mut self, redraw: bool) -> CanvasResult<bool> {
        self.cancel_playback();
        let undone = self.dispatcher.undo();
        if redraw {
            self.render()?;
        }
        Ok(undone)
    }

    /// Redo the last undone action.
    pub fn redo(&mut self, redraw: bool) -> CanvasResult<bool> {
        self.cancel_playback();
        let redone = self.dispatcher.redo();
        if redraw {
            self.render()?;
        }
        Ok(redone)
    }

    /// Forget every action and repaint the background.
    pub fn reset(&mut self) -> CanvasResult<()> {
        self.cancel_playback();
        self.dispatcher.reset();
        self.render()
    }

    /// Re-render the background and every committed action, stopping any
    /// running playback.
    pub fn render(&mut self) -> CanvasResult<()> {
        self.cancel_playback();
        self.dispatcher
            .render(&mut self.surface, &self.config.surface, &self.background)
    }

    // --- Playback ---

    /// Replay the history step by step, then run `on_complete`.
    pub fn play(&mut self, on_complete: impl FnOnce() + 'static) -> CanvasResult<PlaybackStatus> {
        self.start_playback(None, Some(Box::new(on_complete)))
    }

    /// Like [`Canvas::play`], also reporting every replayed step.
    pub fn play_with(
        &mut self,
        on_step: impl FnMut(StepPosition) + 'static,
        on_complete: impl FnOnce() + 'static,
    ) -> CanvasResult<PlaybackStatus> {
        self.start_playback(Some(Box::new(on_step)), Some(Box::new(on_complete)))
    }

    fn start_playback(
        &mut self,
        on_step: Option<StepCallback>,
        on_complete: Option<CompleteCallback>,
    ) -> CanvasResult<PlaybackStatus> {
        self.cancel_playback();
        if self.dispatcher.abandon_gesture() {
            log::debug!("Gesture abandoned for playback");
        }
        replay::paint_background(&mut self.surface, &self.background);

        let Some(start) = self.history().first_position() else {
            log::info!("Playback of empty history");
            if let Some(on_complete) = on_complete {
                on_complete();
            }
            return Ok(PlaybackStatus::Finished);
        };

        let interval = self.config.playback.interval();
        log::info!(
            "Playing back {} steps every {:?}",
            self.history().step_count(),
            interval
        );
        self.playback = Some(Playback::new(
            Some(start),
            interval,
            Instant::now(),
            on_step,
            on_complete,
        ));
        Ok(PlaybackStatus::Playing)
    }

    /// Advance the running playback to `now`.
    pub fn tick(&mut self, now: Instant) -> CanvasResult<PlaybackStatus> {
        let Some(playback) = self.playback.as_mut() else {
            return Ok(PlaybackStatus::Finished);
        };
        let result = playback.tick(now, &self.dispatcher, &mut self.surface, &self.config.surface);
        self.settle_playback(result)
    }

    /// Draw the next playback step immediately.
    pub fn step_playback(&mut self) -> CanvasResult<PlaybackStatus> {
        let Some(playback) = self.playback.as_mut() else {
            return Ok(PlaybackStatus::Finished);
        };
        let result = playback.step(&self.dispatcher, &mut self.surface, &self.config.surface);
        self.settle_playback(result)
    }

    fn settle_playback(
        &mut self,
        result: CanvasResult<PlaybackStatus>,
    ) -> CanvasResult<PlaybackStatus> {
        match result {
            Ok(PlaybackStatus::Playing) => Ok(PlaybackStatus::Playing),
            Ok(PlaybackStatus::Finished) => {
                self.playback = None;
                Ok(PlaybackStatus::Finished)
            }
            Err(err) => {
                log::error!("Playback aborted: {err}");
                self.playback = None;
                Err(err)
            }
        }
    }

    /// Stop the running playback and show the full history again.
    /// Returns true if a playback was running.
    pub fn stop_playback(&mut self) -> CanvasResult<bool> {
        if !self.cancel_playback() {
            return Ok(false);
        }
        self.render()?;
        Ok(true)
    }

    pub fn is_playing(&self) -> bool {
        self.playback.is_some()
    }

    fn cancel_playback(&mut self) -> bool {
        match self.playback.take() {
            Some(playback) => {
                playback.cancel();
                true
            }
            None => false,
        }
    }

    // --- Export ---

    /// Encode the surface as a `data:` URL. PNG unless another format is
    /// given; `quality` is clamped to `0.0..=1.0`.
    pub fn export_image(
        &self,
        format: Option<ImageFormat>,
        quality: Option<f32>,
    ) -> CanvasResult<String> {
        let format = format.unwrap_or_default();
        let quality = quality.filter(|q| q.is_finite()).map(|q| q.clamp(0.0, 1.0));
        let bytes = self.surface.encode(format, quality)?;
        Ok(to_data_url(format, &bytes))
    }

    // --- Background ---

    /// Replace the background and re-render.
    pub fn set_background(&mut self, background: impl Into<Background>) -> CanvasResult<()> {
        self.cancel_playback();
        self.background = background.into();
        self.render()
    }

    pub fn set_background_color(&mut self, color: SerializableColor) -> CanvasResult<()> {
        self.set_background(color)
    }

    pub fn set_background_image(&mut self, image: BackgroundImage) -> CanvasResult<()> {
        self.set_background(image)
    }
}

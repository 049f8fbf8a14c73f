//! Animated replay of the history.
//!
//! Playback is cooperative: the host calls [`Playback::tick`] from its frame
//! or timer loop and one step is drawn per elapsed interval.

use crate::canvas::CanvasResult;
use crate::config::SurfaceConfig;
use crate::dispatch::Dispatcher;
use crate::history::StepPosition;
use crate::replay;
use crate::surface::Surface;
use crate::tools::ToolConfig;
use std::fmt;
use std::time::Duration;

// Use web-time on WASM, std::time otherwise
#[cfg(not(target_arch = "wasm32"))]
pub use std::time::Instant;
#[cfg(target_arch = "wasm32")]
pub use web_time::Instant;

/// Called after each replayed step.
pub type StepCallback = Box<dyn FnMut(StepPosition)>;
/// Called once when every step has been replayed.
pub type CompleteCallback = Box<dyn FnOnce()>;

/// Progress of a playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackStatus {
    Playing,
    Finished,
}

/// One running playback.
pub struct Playback {
    /// Next step to draw; `None` once exhausted.
    cursor: Option<StepPosition>,
    interval: Duration,
    last_tick: Instant,
    on_step: Option<StepCallback>,
    on_complete: Option<CompleteCallback>,
}

impl fmt::Debug for Playback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Playback")
            .field("cursor", &self.cursor)
            .field("interval", &self.interval)
            .field("last_tick", &self.last_tick)
            .finish_non_exhaustive()
    }
}

impl Playback {
    /// Start a playback at `start`, the history's first step.
    pub fn new(
        start: Option<StepPosition>,
        interval: Duration,
        now: Instant,
        on_step: Option<StepCallback>,
        on_complete: Option<CompleteCallback>,
    ) -> Self {
        Self {
            cursor: start,
            interval,
            last_tick: now,
            on_step,
            on_complete,
        }
    }

    /// Next step to be drawn.
    pub fn cursor(&self) -> Option<StepPosition> {
        self.cursor
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_finished(&self) -> bool {
        self.cursor.is_none()
    }

    /// Draw one step per interval elapsed since the last tick.
    pub fn tick<C: ToolConfig>(
        &mut self,
        now: Instant,
        dispatcher: &Dispatcher<C>,
        surface: &mut dyn Surface,
        surface_config: &SurfaceConfig,
    ) -> CanvasResult<PlaybackStatus> {
        if self.is_finished() {
            self.complete();
            return Ok(PlaybackStatus::Finished);
        }
        while now.saturating_duration_since(self.last_tick) >= self.interval {
            self.last_tick += self.interval;
            if self.step(dispatcher, surface, surface_config)? == PlaybackStatus::Finished {
                return Ok(PlaybackStatus::Finished);
            }
        }
        Ok(PlaybackStatus::Playing)
    }

    /// Draw the next step regardless of time.
    pub fn step<C: ToolConfig>(
        &mut self,
        dispatcher: &Dispatcher<C>,
        surface: &mut dyn Surface,
        surface_config: &SurfaceConfig,
    ) -> CanvasResult<PlaybackStatus> {
        let history = dispatcher.history();
        let Some((position, action)) = self
            .cursor
            .and_then(|position| Some((position, history.committed().get(position.action)?)))
        else {
            self.cursor = None;
            self.complete();
            return Ok(PlaybackStatus::Finished);
        };

        replay::draw_step(surface, dispatcher.registry(), action, position, surface_config)?;
        if let Some(on_step) = self.on_step.as_mut() {
            on_step(position);
        }

        self.cursor = history.next_position(position);
        if self.cursor.is_none() {
            self.complete();
            return Ok(PlaybackStatus::Finished);
        }
        Ok(PlaybackStatus::Playing)
    }

    /// Stop without running the completion callback.
    pub fn cancel(self) {
        match self.cursor {
            Some(position) => log::warn!("Playback cancelled before {position}"),
            None => log::debug!("Playback dropped after completion"),
        }
    }

    fn complete(&mut self) {
        if let Some(on_complete) = self.on_complete.take() {
            log::info!("Playback finished");
            on_complete();
        }
    }
}

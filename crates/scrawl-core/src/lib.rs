//! Scrawl Core Library
//!
//! Platform-agnostic core of the Scrawl drawing surface: pluggable tools,
//! an undoable action history, the input state machine that records into it
//! and the replay engine that renders it back.

pub mod canvas;
pub mod color;
pub mod config;
pub mod dispatch;
pub mod history;
pub mod input;
pub mod playback;
pub mod replay;
pub mod surface;
pub mod tools;

#[cfg(test)]
mod testing;

pub use canvas::{Canvas, CanvasError, CanvasResult};
pub use color::SerializableColor;
pub use config::{Background, CanvasConfig, PlaybackConfig, SurfaceConfig};
pub use dispatch::{DispatchOutcome, Dispatcher, GestureState};
pub use history::{Action, ActionId, ActionStep, History, StepPosition, StepTag};
pub use input::{PointerEvent, PointerPhase};
pub use playback::{Instant, PlaybackStatus};
pub use surface::{
    BackgroundImage, Blend, DrawOp, ImageFormat, Paint, RecordingSurface, Surface, SurfaceError,
    SurfaceResult,
};
pub use tools::{
    Dispatch, DrawHandler, InputContext, InputHandler, StepUpdate, ToolConfig, ToolError,
    ToolOptions, ToolRegistry, ToolResult,
};

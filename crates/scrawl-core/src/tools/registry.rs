//! Tool registry.

use super::{DrawHandler, InputHandler, ToolConfig, ToolOptions};
use crate::canvas::{CanvasError, CanvasResult};
use std::collections::HashMap;
use std::fmt;

struct ToolEntry<C: ToolConfig> {
    config: C,
    input: Box<dyn InputHandler<C>>,
    draw: Box<dyn DrawHandler<C>>,
}

/// Registered tools and the active-tool pointer.
pub struct ToolRegistry<C: ToolConfig> {
    tools: HashMap<C::Kind, ToolEntry<C>>,
    current: Option<C::Kind>,
}

impl<C: ToolConfig> Default for ToolRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ToolConfig> fmt::Debug for ToolRegistry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.tools.keys().collect::<Vec<_>>())
            .field("current", &self.current)
            .finish()
    }
}

fn unknown<K: fmt::Debug>(kind: K) -> CanvasError {
    CanvasError::UnknownTool(format!("{kind:?}"))
}

fn mismatch<K: fmt::Debug>(expected: K, found: K) -> CanvasError {
    CanvasError::ConfigMismatch {
        expected: format!("{expected:?}"),
        found: format!("{found:?}"),
    }
}

impl<C: ToolConfig> ToolRegistry<C> {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
            current: None,
        }
    }

    /// Register a tool, replacing any previous registration of `kind`.
    pub fn register_tool(
        &mut self,
        kind: C::Kind,
        input: impl InputHandler<C> + 'static,
        draw: impl DrawHandler<C> + 'static,
        config: C,
    ) -> CanvasResult<()> {
        if config.kind() != kind {
            return Err(mismatch(kind, config.kind()));
        }
        let replaced = self
            .tools
            .insert(
                kind,
                ToolEntry {
                    config,
                    input: Box::new(input),
                    draw: Box::new(draw),
                },
            )
            .is_some();
        if replaced {
            log::debug!("Re-registered tool {kind:?}");
        } else {
            log::debug!("Registered tool {kind:?}");
        }
        Ok(())
    }

    /// Register a tool under its options' identifier.
    pub fn register<O: ToolOptions<C>>(
        &mut self,
        input: impl InputHandler<C> + 'static,
        draw: impl DrawHandler<C> + 'static,
        options: O,
    ) -> CanvasResult<()> {
        self.register_tool(O::KIND, input, draw, options.into_config())
    }

    pub fn is_registered(&self, kind: C::Kind) -> bool {
        self.tools.contains_key(&kind)
    }

    /// Identifiers of every registered tool, in no particular order.
    pub fn kinds(&self) -> impl Iterator<Item = C::Kind> + '_ {
        self.tools.keys().copied()
    }

    /// Clone of a tool's configuration.
    pub fn tool_config(&self, kind: C::Kind) -> CanvasResult<C> {
        self.config_ref(kind).cloned()
    }

    pub(crate) fn config_ref(&self, kind: C::Kind) -> CanvasResult<&C> {
        self.tools
            .get(&kind)
            .map(|entry| &entry.config)
            .ok_or_else(|| unknown(kind))
    }

    pub fn set_tool_config(&mut self, kind: C::Kind, config: C) -> CanvasResult<()> {
        let entry = self.tools.get_mut(&kind).ok_or_else(|| unknown(kind))?;
        if config.kind() != kind {
            return Err(mismatch(kind, config.kind()));
        }
        entry.config = config;
        Ok(())
    }

    /// Typed copy of one tool's options.
    pub fn tool_options<O: ToolOptions<C>>(&self) -> CanvasResult<O> {
        let config = self.config_ref(O::KIND)?;
        O::from_config(config)
            .cloned()
            .ok_or_else(|| mismatch(O::KIND, config.kind()))
    }

    pub fn set_tool_options<O: ToolOptions<C>>(&mut self, options: O) -> CanvasResult<()> {
        self.set_tool_config(O::KIND, options.into_config())
    }

    /// Make a registered tool the active one.
    pub fn select_tool(&mut self, kind: C::Kind) -> CanvasResult<()> {
        if !self.is_registered(kind) {
            return Err(unknown(kind));
        }
        self.current = Some(kind);
        Ok(())
    }

    pub fn current_tool(&self) -> CanvasResult<C::Kind> {
        self.current.ok_or(CanvasError::NoToolSelected)
    }

    pub(crate) fn input_handler(&self, kind: C::Kind) -> CanvasResult<&dyn InputHandler<C>> {
        self.tools
            .get(&kind)
            .map(|entry| entry.input.as_ref())
            .ok_or_else(|| unknown(kind))
    }

    pub(crate) fn draw_handler(&self, kind: C::Kind) -> CanvasResult<&dyn DrawHandler<C>> {
        self.tools
            .get(&kind)
            .map(|entry| entry.draw.as_ref())
            .ok_or_else(|| unknown(kind))
    }
}

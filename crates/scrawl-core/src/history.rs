//! Action history: the source of truth for what is on the surface.
//!
//! An [`Action`] is the ordered list of steps one tool recorded during one
//! gesture, and is the unit of undo and redo. The rendered pixels are always
//! a pure function of the background and the committed actions.

use crate::tools::ToolConfig;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for an action.
pub type ActionId = Uuid;

/// State tag recorded with every step.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepTag {
    Down,
    Move,
    Up,
    /// Tool-specific tag.
    Custom(String),
}

impl fmt::Display for StepTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepTag::Down => write!(f, "down"),
            StepTag::Move => write!(f, "move"),
            StepTag::Up => write!(f, "up"),
            StepTag::Custom(tag) => write!(f, "{tag}"),
        }
    }
}

/// One atomic unit of drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionStep<C> {
    /// Snapshot of the tool configuration in effect for this step.
    pub config: C,
    /// Position in surface coordinates.
    pub position: Point,
    pub tag: StepTag,
}

impl<C> ActionStep<C> {
    pub fn new(config: C, position: Point, tag: StepTag) -> Self {
        Self {
            config,
            position,
            tag,
        }
    }
}

/// Steps produced by one continuous interaction with one tool.
#[derive(Debug, Clone)]
pub struct Action<C: ToolConfig> {
    id: ActionId,
    tool: C::Kind,
    steps: Vec<ActionStep<C>>,
}

impl<C: ToolConfig> Action<C> {
    /// Create an empty action for a tool.
    pub fn new(tool: C::Kind) -> Self {
        Self {
            id: Uuid::new_v4(),
            tool,
            steps: Vec::new(),
        }
    }

    pub fn id(&self) -> ActionId {
        self.id
    }

    /// The tool that recorded this action.
    pub fn tool(&self) -> C::Kind {
        self.tool
    }

    pub fn steps(&self) -> &[ActionStep<C>] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn last_step(&self) -> Option<&ActionStep<C>> {
        self.steps.last()
    }

    /// Steps recorded before `index`, the context a draw-handler gets.
    pub fn prefix(&self, index: usize) -> &[ActionStep<C>] {
        &self.steps[..index.min(self.steps.len())]
    }
}

/// Address of one step inside the committed actions.
///
/// Positions order chronologically: by action, then by step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StepPosition {
    pub action: usize,
    pub step: usize,
}

impl StepPosition {
    pub fn new(action: usize, step: usize) -> Self {
        Self { action, step }
    }
}

impl fmt::Display for StepPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "action {} step {}", self.action, self.step)
    }
}

/// Committed actions plus the redo stack.
///
/// The two sequences are disjoint. Starting a new action clears the redo
/// stack, so redo is only meaningful right after undo. The cleared actions
/// are held back until the new action is sealed, and come back if it is
/// discarded instead.
#[derive(Debug, Clone)]
pub struct History<C: ToolConfig> {
    committed: Vec<Action<C>>,
    undone: Vec<Action<C>>,
    /// Redo stack cleared by the open action, keyed by its id.
    held_redo: Option<(ActionId, Vec<Action<C>>)>,
}

impl<C: ToolConfig> Default for History<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ToolConfig> History<C> {
    /// Create an empty history.
    pub fn new() -> Self {
        Self {
            committed: Vec::new(),
            undone: Vec::new(),
            held_redo: None,
        }
    }

    /// Committed actions in chronological order.
    pub fn committed(&self) -> &[Action<C>] {
        &self.committed
    }

    /// Undone actions, most recently undone last.
    pub fn undone(&self) -> &[Action<C>] {
        &self.undone
    }

    /// Append an empty action and clear the redo stack.
    ///
    /// The cleared actions return to the redo stack if this action is
    /// discarded before [`History::clear_redo`] seals it.
    pub fn start_action(&mut self, tool: C::Kind) -> ActionId {
        let action = Action::new(tool);
        let id = action.id();
        self.committed.push(action);
        let mut cleared = std::mem::take(&mut self.undone);
        if let Some((_, held)) = self.held_redo.take() {
            cleared.extend(held);
        }
        self.held_redo = Some((id, cleared));
        id
    }

    /// Append a step to the last action.
    /// Returns false if there is no action.
    pub fn append_step(&mut self, step: ActionStep<C>) -> bool {
        match self.committed.last_mut() {
            Some(action) => {
                action.steps.push(step);
                true
            }
            None => false,
        }
    }

    /// Replace the last step of the last action, returning the old step.
    /// Returns None (and changes nothing) if there is no step to replace.
    pub fn replace_last_step(&mut self, step: ActionStep<C>) -> Option<ActionStep<C>> {
        let last = self.committed.last_mut()?.steps.last_mut()?;
        Some(std::mem::replace(last, step))
    }

    /// Remove the last action without making it redoable.
    ///
    /// Discarding the action that is still open restores the redo stack its
    /// start cleared.
    pub fn discard_last_action(&mut self) -> Option<Action<C>> {
        let action = self.committed.pop()?;
        if let Some((id, held)) = self.held_redo.take() {
            if id == action.id() {
                self.undone = held;
            } else {
                self.held_redo = Some((id, held));
            }
        }
        Some(action)
    }

    /// Undo the last action.
    /// Returns true if undo was performed, false if nothing to undo.
    pub fn undo(&mut self) -> bool {
        self.held_redo = None;
        if let Some(action) = self.committed.pop() {
            self.undone.push(action);
            true
        } else {
            false
        }
    }

    /// Redo the last undone action.
    /// Returns true if redo was performed, false if nothing to redo.
    pub fn redo(&mut self) -> bool {
        self.held_redo = None;
        if let Some(action) = self.undone.pop() {
            self.committed.push(action);
            true
        } else {
            false
        }
    }

    /// Drop the redo stack for good, including any held back by the open
    /// action.
    pub fn clear_redo(&mut self) {
        self.undone.clear();
        self.held_redo = None;
    }

    /// Clear both sequences.
    pub fn reset(&mut self) {
        self.committed.clear();
        self.clear_redo();
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        !self.committed.is_empty()
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }

    pub fn last_action(&self) -> Option<&Action<C>> {
        self.committed.last()
    }

    /// Check if nothing is committed.
    pub fn is_empty(&self) -> bool {
        self.committed.is_empty()
    }

    /// Number of committed actions.
    pub fn len(&self) -> usize {
        self.committed.len()
    }

    /// Number of steps across all committed actions.
    pub fn step_count(&self) -> usize {
        self.committed.iter().map(Action::len).sum()
    }

    /// The action, step and step prefix at a position.
    pub fn step_at(
        &self,
        position: StepPosition,
    ) -> Option<(&Action<C>, &ActionStep<C>, &[ActionStep<C>])> {
        let action = self.committed.get(position.action)?;
        let step = action.steps.get(position.step)?;
        Some((action, step, action.prefix(position.step)))
    }

    /// First step position, skipping empty actions.
    pub fn first_position(&self) -> Option<StepPosition> {
        self.position_from(StepPosition::new(0, 0))
    }

    /// Position following `position` in chronological order.
    pub fn next_position(&self, position: StepPosition) -> Option<StepPosition> {
        self.position_from(StepPosition::new(position.action, position.step + 1))
    }

    /// First valid position at or after `candidate`.
    fn position_from(&self, candidate: StepPosition) -> Option<StepPosition> {
        let mut position = candidate;
        while let Some(action) = self.committed.get(position.action) {
            if position.step < action.len() {
                return Some(position);
            }
            position = StepPosition::new(position.action + 1, 0);
        }
        None
    }

    /// Every step position in chronological order.
    pub fn positions(&self) -> impl Iterator<Item = StepPosition> + '_ {
        self.committed
            .iter()
            .enumerate()
            .flat_map(|(a, action)| (0..action.len()).map(move |s| StepPosition::new(a, s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{PenOptions, TestConfig, TestKind};

    fn step(x: f64, tag: StepTag) -> ActionStep<TestConfig> {
        ActionStep::new(
            TestConfig::Pen(PenOptions { width: 1.0 }),
            Point::new(x, 0.0),
            tag,
        )
    }

    fn history_with_actions(count: usize) -> History<TestConfig> {
        let mut history = History::new();
        for i in 0..count {
            history.start_action(TestKind::Pen);
            history.append_step(step(i as f64, StepTag::Down));
            history.append_step(step(i as f64 + 1.0, StepTag::Up));
        }
        history
    }

    #[test]
    fn test_start_action_clears_redo() {
        let mut history = history_with_actions(2);
        assert!(history.undo());
        assert!(history.can_redo());

        history.start_action(TestKind::Pen);
        assert!(!history.can_redo());
        assert!(!history.redo());
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_undo_redo_preserve_total() {
        let mut history = history_with_actions(3);
        let total = history.committed().len() + history.undone().len();

        for op in [true, true, false, true, true, true, false, false, false, false] {
            if op {
                history.undo();
            } else {
                history.redo();
            }
            assert_eq!(history.committed().len() + history.undone().len(), total);
        }
    }

    #[test]
    fn test_undo_moves_whole_actions() {
        let mut history = history_with_actions(2);
        let last = history.last_action().unwrap().id();

        assert!(history.undo());
        assert_eq!(history.undone().len(), 1);
        assert_eq!(history.undone()[0].id(), last);
        assert_eq!(history.undone()[0].len(), 2);

        assert!(history.redo());
        assert_eq!(history.last_action().unwrap().id(), last);
    }

    #[test]
    fn test_undo_redo_empty_are_noops() {
        let mut history = History::<TestConfig>::new();
        assert!(!history.undo());
        assert!(!history.redo());
        assert!(history.is_empty());
    }

    #[test]
    fn test_append_and_replace_need_an_action() {
        let mut history = History::<TestConfig>::new();
        assert!(!history.append_step(step(0.0, StepTag::Down)));
        assert!(history.replace_last_step(step(0.0, StepTag::Down)).is_none());

        history.start_action(TestKind::Line);
        assert!(history.replace_last_step(step(0.0, StepTag::Down)).is_none());
        assert!(history.append_step(step(0.0, StepTag::Down)));
        assert!(history.append_step(step(1.0, StepTag::Move)));

        let old = history.replace_last_step(step(5.0, StepTag::Move)).unwrap();
        assert_eq!(old.position, Point::new(1.0, 0.0));
        let action = history.last_action().unwrap();
        assert_eq!(action.len(), 2);
        assert_eq!(action.steps()[1].position, Point::new(5.0, 0.0));
    }

    #[test]
    fn test_discard_does_not_feed_redo() {
        let mut history = history_with_actions(1);
        assert!(history.discard_last_action().is_some());
        assert!(history.is_empty());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_discarding_open_action_restores_redo() {
        let mut history = history_with_actions(3);
        assert!(history.undo());
        assert!(history.undo());

        history.start_action(TestKind::Pen);
        history.append_step(step(0.0, StepTag::Down));
        assert!(!history.can_redo());

        history.discard_last_action();
        assert_eq!(history.committed().len(), 1);
        assert_eq!(history.undone().len(), 2);
        assert!(history.redo());
        assert_eq!(history.committed().len() + history.undone().len(), 3);
    }

    #[test]
    fn test_clear_redo_seals_the_cleared_stack() {
        let mut history = history_with_actions(2);
        assert!(history.undo());

        history.start_action(TestKind::Pen);
        history.append_step(step(0.0, StepTag::Down));
        history.clear_redo();

        // A later discard of a sealed action brings nothing back.
        history.discard_last_action();
        assert!(!history.can_redo());
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_reset_clears_both() {
        let mut history = history_with_actions(2);
        history.undo();
        history.reset();
        assert!(history.committed().is_empty());
        assert!(history.undone().is_empty());
    }

    #[test]
    fn test_positions_skip_empty_actions() {
        let mut history = history_with_actions(1);
        history.start_action(TestKind::Pen);
        history.start_action(TestKind::Pen);
        history.append_step(step(9.0, StepTag::Down));

        let positions: Vec<_> = history.positions().collect();
        assert_eq!(
            positions,
            vec![
                StepPosition::new(0, 0),
                StepPosition::new(0, 1),
                StepPosition::new(2, 0)
            ]
        );
        assert_eq!(history.first_position(), Some(StepPosition::new(0, 0)));
        assert_eq!(
            history.next_position(StepPosition::new(0, 1)),
            Some(StepPosition::new(2, 0))
        );
        assert_eq!(history.next_position(StepPosition::new(2, 0)), None);
        assert_eq!(history.step_count(), 3);
    }

    #[test]
    fn test_step_at_exposes_prefix() {
        let history = history_with_actions(1);
        let (action, step, prefix) = history.step_at(StepPosition::new(0, 1)).unwrap();
        assert_eq!(action.tool(), TestKind::Pen);
        assert_eq!(step.tag, StepTag::Up);
        assert_eq!(prefix.len(), 1);
        assert_eq!(prefix[0].tag, StepTag::Down);
        assert!(history.step_at(StepPosition::new(0, 2)).is_none());
    }

    #[test]
    fn test_position_order() {
        assert!(StepPosition::new(0, 5) < StepPosition::new(1, 0));
        assert!(StepPosition::new(1, 0) < StepPosition::new(1, 1));
    }
}

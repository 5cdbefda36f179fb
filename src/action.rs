//! Reversible action log.
//!
//! Every visible change the search makes is recorded as an [`Action`]: an
//! atomic field mutation carrying both the old and the new value, so it can
//! be applied and reversed without drift. Actions are grouped into steps,
//! and a [`StepQueue`] moves a cursor forward and backward over them.
//!
//! Settable fields form a closed tagged union per entity kind; apply and
//! reverse are exhaustive matches, never dynamic field access.

use tracing::trace;

use crate::node::{EdgeId, NodeId};
use crate::tree::Tree;

/// A settable node field together with its old and new value.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeField {
    Value { old: Option<f64>, new: Option<f64> },
    Alpha { old: Option<f64>, new: Option<f64> },
    Beta { old: Option<f64>, new: Option<f64> },
    Entered { old: bool, new: bool },
    Pruned { old: bool, new: bool },
}

/// A settable edge field together with its old and new value.
#[derive(Debug, Clone, PartialEq)]
pub enum EdgeField {
    Entered { old: bool, new: bool },
    Pruned { old: bool, new: bool },
}

/// An atomic, reversible field mutation on one node or edge.
///
/// Actions are immutable once created; their only side effect is the field
/// write performed by [`apply`](Action::apply) or [`reverse`](Action::reverse).
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Node { id: NodeId, field: NodeField },
    Edge { id: EdgeId, field: EdgeField },
}

impl Action {
    /// Write the new value to the target field.
    pub fn apply(&self, tree: &mut Tree) {
        match self {
            Action::Node { id, field } => {
                let node = tree.get_mut(*id);
                match field {
                    NodeField::Value { new, .. } => node.value = *new,
                    NodeField::Alpha { new, .. } => node.alpha = *new,
                    NodeField::Beta { new, .. } => node.beta = *new,
                    NodeField::Entered { new, .. } => node.entered = *new,
                    NodeField::Pruned { new, .. } => node.pruned = *new,
                }
            }
            Action::Edge { id, field } => {
                let edge = tree.edge_mut(*id);
                match field {
                    EdgeField::Entered { new, .. } => edge.entered = *new,
                    EdgeField::Pruned { new, .. } => edge.pruned = *new,
                }
            }
        }
    }

    /// Write the old value back to the target field.
    pub fn reverse(&self, tree: &mut Tree) {
        match self {
            Action::Node { id, field } => {
                let node = tree.get_mut(*id);
                match field {
                    NodeField::Value { old, .. } => node.value = *old,
                    NodeField::Alpha { old, .. } => node.alpha = *old,
                    NodeField::Beta { old, .. } => node.beta = *old,
                    NodeField::Entered { old, .. } => node.entered = *old,
                    NodeField::Pruned { old, .. } => node.pruned = *old,
                }
            }
            Action::Edge { id, field } => {
                let edge = tree.edge_mut(*id);
                match field {
                    EdgeField::Entered { old, .. } => edge.entered = *old,
                    EdgeField::Pruned { old, .. } => edge.pruned = *old,
                }
            }
        }
    }
}

/// A group of actions applied or reversed together as one playback unit.
pub type Step = Vec<Action>;

/// Step-grouped, cursor-addressed undo/redo log.
///
/// The cursor is the index of the last applied step: -1 means no step
/// applied, `len - 1` means fully played. `in_action` marks whether
/// playback mode is engaged; the log is append-only before playback starts
/// and frozen while it is active.
#[derive(Debug, Clone)]
pub struct StepQueue {
    steps: Vec<Step>,
    cursor: isize,
    in_action: bool,
}

impl Default for StepQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl StepQueue {
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            cursor: -1,
            in_action: false,
        }
    }

    /// Append one step. Fails while playback is engaged.
    pub fn push_step(&mut self, step: Step) -> bool {
        if self.in_action {
            return false;
        }
        self.steps.push(step);
        true
    }

    /// Append several steps in order. Fails while playback is engaged.
    pub fn push_steps(&mut self, steps: Vec<Step>) -> bool {
        if self.in_action {
            return false;
        }
        self.steps.extend(steps);
        true
    }

    /// Engage playback mode. The cursor sits at -1 whenever playback is not
    /// engaged, so entering always starts from the initial state.
    pub fn begin_playback(&mut self) {
        self.in_action = true;
    }

    /// Leave playback mode, rewinding to the initial state first.
    pub fn end_playback(&mut self, tree: &mut Tree) {
        self.go_to_beginning(tree);
        self.in_action = false;
    }

    /// Advance the cursor by one step and apply its actions in order.
    ///
    /// Returns `false` without touching the tree when playback is not
    /// engaged or the cursor is already at the last step.
    pub fn step_forward(&mut self, tree: &mut Tree) -> bool {
        if !self.in_action || self.cursor + 1 >= self.steps.len() as isize {
            return false;
        }
        self.cursor += 1;
        for action in &self.steps[self.cursor as usize] {
            action.apply(tree);
        }
        trace!(cursor = self.cursor, "step forward");
        true
    }

    /// Reverse the current step's actions and move the cursor back by one.
    ///
    /// Returns `false` without touching the tree when playback is not
    /// engaged or the cursor is at -1.
    pub fn step_backward(&mut self, tree: &mut Tree) -> bool {
        if !self.in_action || self.cursor < 0 {
            return false;
        }
        for action in &self.steps[self.cursor as usize] {
            action.reverse(tree);
        }
        self.cursor -= 1;
        trace!(cursor = self.cursor, "step backward");
        true
    }

    /// Apply steps until the cursor reaches the end. Idempotent there.
    pub fn go_to_end(&mut self, tree: &mut Tree) {
        while self.step_forward(tree) {}
    }

    /// Reverse steps until the cursor reaches -1. Idempotent there.
    pub fn go_to_beginning(&mut self, tree: &mut Tree) {
        while self.step_backward(tree) {}
    }

    /// Number of steps in the log.
    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Index of the last applied step, -1 when none is applied.
    #[inline]
    pub fn cursor(&self) -> isize {
        self.cursor
    }

    /// Whether playback mode is engaged.
    #[inline]
    pub fn in_action(&self) -> bool {
        self.in_action
    }

    /// The recorded steps, for inspection.
    #[inline]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TreeConfig;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn test_tree() -> Tree {
        let mut rng = ChaCha20Rng::seed_from_u64(11);
        Tree::generate(&TreeConfig::for_testing(), &mut rng)
    }

    fn enter_root_step(tree: &Tree) -> Step {
        vec![Action::Node {
            id: tree.root(),
            field: NodeField::Entered {
                old: false,
                new: true,
            },
        }]
    }

    fn value_step(tree: &Tree, old: Option<f64>, new: Option<f64>) -> Step {
        vec![Action::Node {
            id: tree.root(),
            field: NodeField::Value { old, new },
        }]
    }

    #[test]
    fn test_apply_and_reverse_are_inverse() {
        let mut tree = test_tree();
        let action = Action::Edge {
            id: EdgeId(0),
            field: EdgeField::Pruned {
                old: false,
                new: true,
            },
        };

        action.apply(&mut tree);
        assert!(tree.edge(EdgeId(0)).pruned);
        action.reverse(&mut tree);
        assert!(!tree.edge(EdgeId(0)).pruned);
    }

    #[test]
    fn test_stepping_requires_playback_mode() {
        let mut tree = test_tree();
        let mut queue = StepQueue::new();
        assert!(queue.push_step(enter_root_step(&tree)));

        // Not in playback: stepping is a no-op.
        assert!(!queue.step_forward(&mut tree));
        assert!(!queue.step_backward(&mut tree));
        assert!(!tree.get(tree.root()).entered);

        queue.begin_playback();
        assert!(queue.step_forward(&mut tree));
        assert!(tree.get(tree.root()).entered);
        assert_eq!(queue.cursor(), 0);
    }

    #[test]
    fn test_cursor_bounds_are_noops() {
        let mut tree = test_tree();
        let mut queue = StepQueue::new();
        queue.push_step(enter_root_step(&tree));
        queue.begin_playback();

        assert!(!queue.step_backward(&mut tree));
        assert!(queue.step_forward(&mut tree));
        assert!(!queue.step_forward(&mut tree));
        assert_eq!(queue.cursor(), 0);
    }

    #[test]
    fn test_push_rejected_during_playback() {
        let mut tree = test_tree();
        let mut queue = StepQueue::new();
        queue.push_step(enter_root_step(&tree));
        queue.begin_playback();

        assert!(!queue.push_step(enter_root_step(&tree)));
        assert!(!queue.push_steps(vec![enter_root_step(&tree)]));
        assert_eq!(queue.len(), 1);

        queue.end_playback(&mut tree);
        assert!(queue.push_step(enter_root_step(&tree)));
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_forward_back_round_trip() {
        let mut tree = test_tree();
        let mut queue = StepQueue::new();
        queue.push_step(enter_root_step(&tree));
        queue.push_step(value_step(&tree, None, Some(4.0)));
        queue.push_step(value_step(&tree, Some(4.0), Some(8.0)));

        let before = tree.clone();
        queue.begin_playback();

        queue.go_to_end(&mut tree);
        assert_eq!(queue.cursor(), 2);
        assert_eq!(tree.get(tree.root()).value, Some(8.0));
        assert!(tree.get(tree.root()).entered);

        queue.go_to_beginning(&mut tree);
        assert_eq!(queue.cursor(), -1);
        assert_eq!(tree, before);
    }

    #[test]
    fn test_boundary_traversal_is_idempotent() {
        let mut tree = test_tree();
        let mut queue = StepQueue::new();
        queue.push_step(value_step(&tree, None, Some(1.0)));
        queue.push_step(value_step(&tree, Some(1.0), Some(2.0)));
        queue.begin_playback();

        queue.go_to_end(&mut tree);
        let at_end = tree.clone();
        queue.go_to_end(&mut tree);
        assert_eq!(tree, at_end);
        assert_eq!(queue.cursor(), 1);

        queue.go_to_beginning(&mut tree);
        let at_start = tree.clone();
        queue.go_to_beginning(&mut tree);
        assert_eq!(tree, at_start);
        assert_eq!(queue.cursor(), -1);
    }

    #[test]
    fn test_end_playback_rewinds() {
        let mut tree = test_tree();
        let before = tree.clone();
        let mut queue = StepQueue::new();
        queue.push_step(enter_root_step(&tree));
        queue.begin_playback();
        queue.go_to_end(&mut tree);

        queue.end_playback(&mut tree);
        assert!(!queue.in_action());
        assert_eq!(queue.cursor(), -1);
        assert_eq!(tree, before);
    }
}

//! Playback session: the state machine tying tree, log and solution together.
//!
//! A [`Session`] owns one generated tree plus the lazily compiled step queue
//! and shadow solution for it. It enforces the lifecycle rules: the tree is
//! immutable while playback is engaged, leaving playback rewinds and
//! discards the log, and regeneration discards everything.

use rand_chacha::ChaCha20Rng;
use tracing::debug;

use crate::action::StepQueue;
use crate::config::TreeConfig;
use crate::node::{EdgeId, NodeId, NodeKind};
use crate::search::{compile_search, CompileError};
use crate::solution::{self, Solution};
use crate::tree::Tree;

/// Where the session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// No log exists; the tree is editable.
    Idle,
    /// A log is cached but playback is not engaged.
    Armed,
    /// Playback is engaged; the tree is frozen and the cursor is live.
    Playing,
}

/// One learner session over one generated tree.
pub struct Session {
    tree: Tree,
    queue: Option<StepQueue>,
    solution: Option<Solution>,
}

impl Session {
    /// Generate a fresh tree and start in the idle state.
    pub fn new(config: &TreeConfig, rng: &mut ChaCha20Rng) -> Self {
        Self {
            tree: Tree::generate(config, rng),
            queue: None,
            solution: None,
        }
    }

    /// The tree, for rendering.
    #[inline]
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// The cached step queue, if one has been compiled.
    #[inline]
    pub fn queue(&self) -> Option<&StepQueue> {
        self.queue.as_ref()
    }

    /// The shadow solution, if a search has been compiled.
    #[inline]
    pub fn solution(&self) -> Option<&Solution> {
        self.solution.as_ref()
    }

    /// Current state, derived from the owned pieces.
    pub fn state(&self) -> PlaybackState {
        match &self.queue {
            None => PlaybackState::Idle,
            Some(queue) if queue.in_action() => PlaybackState::Playing,
            Some(_) => PlaybackState::Armed,
        }
    }

    /// Compile the search for the current tree, caching the result.
    /// Idempotent per generation.
    pub fn compile(&mut self) -> Result<(), CompileError> {
        if self.queue.is_none() {
            let (queue, solution) = compile_search(&self.tree)?;
            self.queue = Some(queue);
            self.solution = Some(solution);
        }
        Ok(())
    }

    /// Enter or leave playback mode.
    ///
    /// Entering compiles on demand, freezes the tree and places the cursor
    /// before the first step. Leaving rewinds to the initial state, unfreezes
    /// the tree and discards the log (the solution is kept for verification).
    pub fn toggle_playback(&mut self) -> Result<PlaybackState, CompileError> {
        if self.state() == PlaybackState::Playing {
            if let Some(queue) = &mut self.queue {
                queue.end_playback(&mut self.tree);
            }
            self.queue = None;
            self.tree.set_mutable(true);
            debug!("playback disengaged");
            return Ok(PlaybackState::Idle);
        }

        self.compile()?;
        if let Some(queue) = &mut self.queue {
            queue.begin_playback();
        }
        self.tree.set_mutable(false);
        debug!("playback engaged");
        Ok(PlaybackState::Playing)
    }

    /// Advance one step. No-op returning `false` unless playing.
    pub fn step_forward(&mut self) -> bool {
        match &mut self.queue {
            Some(queue) => queue.step_forward(&mut self.tree),
            None => false,
        }
    }

    /// Rewind one step. No-op returning `false` unless playing.
    pub fn step_backward(&mut self) -> bool {
        match &mut self.queue {
            Some(queue) => queue.step_backward(&mut self.tree),
            None => false,
        }
    }

    /// Play all remaining steps.
    pub fn go_to_end(&mut self) {
        if let Some(queue) = &mut self.queue {
            queue.go_to_end(&mut self.tree);
        }
    }

    /// Rewind all applied steps.
    pub fn go_to_beginning(&mut self) {
        if let Some(queue) = &mut self.queue {
            queue.go_to_beginning(&mut self.tree);
        }
    }

    /// Compare the learner's annotations against the solution, compiling
    /// the search first if none is cached yet.
    pub fn verify(&mut self) -> Result<bool, CompileError> {
        self.compile()?;
        Ok(self
            .solution
            .as_ref()
            .map(|solution| solution::verify(&self.tree, solution))
            .unwrap_or(false))
    }

    /// Copy the solution into the visible state, compiling on demand.
    pub fn reveal_solution(&mut self) -> Result<(), CompileError> {
        self.compile()?;
        if let Some(solution) = &self.solution {
            solution::reveal_solution(&mut self.tree, solution);
        }
        Ok(())
    }

    /// Clear the visible annotations. Discards any log, keeps the solution.
    pub fn reset(&mut self) {
        self.queue = None;
        self.tree.set_mutable(true);
        solution::reset_tree(&mut self.tree);
    }

    /// Throw the tree away and generate a new one; log and solution go too.
    pub fn regenerate(&mut self, config: &TreeConfig, rng: &mut ChaCha20Rng) {
        self.tree = Tree::generate(config, rng);
        self.queue = None;
        self.solution = None;
    }

    /// Learner value edit, gated by the tree's mutability.
    ///
    /// Editing a leaf changes the inputs the search was compiled from, so it
    /// invalidates any cached log and solution.
    pub fn edit_value(&mut self, id: NodeId, text: &str) -> bool {
        let is_leaf = self.tree.get(id).kind == NodeKind::Leaf;
        let before = self.tree.get(id).value;
        let accepted = self.tree.edit_value(id, text);
        if accepted && is_leaf && self.tree.get(id).value != before {
            self.queue = None;
            self.solution = None;
        }
        accepted
    }

    /// Learner pruned-annotation toggle, gated by the tree's mutability.
    pub fn toggle_edge_pruned(&mut self, id: EdgeId) -> bool {
        self.tree.toggle_edge_pruned(id)
    }
}

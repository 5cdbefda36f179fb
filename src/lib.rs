//! Alpha-beta pruning teaching core.
//!
//! This crate generates a synthetic game tree, runs a minimax search with
//! alpha-beta pruning over it, and compiles that search into a sequence of
//! discrete, reversible visual changes a learner can step through forward
//! and backward. The learner's own value and pruning annotations can then be
//! checked against the search's recorded ground truth.
//!
//! # Overview
//!
//! The pipeline has four stages:
//!
//! 1. **Generation** ([`Tree::generate`]): build a complete tree of a given
//!    depth and branching factor, alternating max and min levels, with
//!    random leaf scores.
//! 2. **Compilation** ([`compile_search`]): run the pruning search once,
//!    synchronously, recording every state change as an atomic reversible
//!    [`Action`] grouped into steps, while writing the ground truth into a
//!    [`Solution`] shadow table.
//! 3. **Playback** ([`StepQueue`], [`Session`]): move a cursor over the step
//!    list; forward applies a step's actions, backward reverses them, with
//!    exact undo semantics.
//! 4. **Checking** ([`verify`], [`reveal_solution`], [`reset_tree`]):
//!    compare the learner's visible annotations to the shadow solution,
//!    copy the solution in, or clear the slate.
//!
//! Rendering, layout, widgets and timers are external collaborators: they
//! read the tree and queue and call the setters exposed here, but no pixel
//! or timing concern lives in this crate.
//!
//! # Usage
//!
//! ```
//! use alphabeta::{PlaybackState, Session, TreeConfig};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let mut rng = ChaCha20Rng::seed_from_u64(7);
//! let mut session = Session::new(&TreeConfig::for_testing(), &mut rng);
//!
//! // Watch the search once...
//! session.toggle_playback().unwrap();
//! while session.step_forward() {}
//! session.toggle_playback().unwrap();
//!
//! // ...then answer by hand and check.
//! assert_eq!(session.state(), PlaybackState::Idle);
//! session.reveal_solution().unwrap();
//! assert!(session.verify().unwrap());
//! ```

pub mod action;
pub mod config;
pub mod node;
pub mod playback;
pub mod search;
pub mod solution;
pub mod tree;

// Re-export main types
pub use action::{Action, EdgeField, NodeField, Step, StepQueue};
pub use config::TreeConfig;
pub use node::{Edge, EdgeId, Node, NodeId, NodeKind};
pub use playback::{PlaybackState, Session};
pub use search::{compile_search, CompileError};
pub use solution::{reset_tree, reveal_solution, verify, Solution, SolutionEdge, SolutionNode};
pub use tree::Tree;

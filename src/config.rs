//! Tree shape and value-range configuration.

use crate::node::NodeKind;

/// Configuration for generating a game tree.
///
/// The core performs no input validation: callers (typically the UI layer)
/// are expected to clamp `depth >= 1` and `branching >= 2` before
/// generating. Behavior outside those ranges is unspecified.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeConfig {
    /// Kind of the root node. Levels below alternate max <-> min.
    pub root_kind: NodeKind,

    /// Number of tree levels, 1 = a lone leaf. The UI enforces >= 3.
    pub depth: u32,

    /// Children per interior node. The UI enforces >= 2.
    pub branching: u32,

    /// Smallest leaf score (inclusive).
    pub min_value: i32,

    /// Largest leaf score (inclusive).
    pub max_value: i32,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            root_kind: NodeKind::Max,
            depth: 4,
            branching: 2,
            min_value: 0,
            max_value: 20,
        }
    }
}

impl TreeConfig {
    /// Create a small config for testing.
    pub fn for_testing() -> Self {
        Self {
            root_kind: NodeKind::Max,
            depth: 3,
            branching: 2,
            min_value: 0,
            max_value: 9,
        }
    }

    /// Builder pattern: set the root node kind.
    pub fn with_root_kind(mut self, kind: NodeKind) -> Self {
        self.root_kind = kind;
        self
    }

    /// Builder pattern: set the tree depth.
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    /// Builder pattern: set the branching factor.
    pub fn with_branching(mut self, branching: u32) -> Self {
        self.branching = branching;
        self
    }

    /// Builder pattern: set the inclusive leaf value range.
    pub fn with_value_range(mut self, min: i32, max: i32) -> Self {
        self.min_value = min;
        self.max_value = max;
        self
    }
}

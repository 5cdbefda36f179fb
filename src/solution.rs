//! Shadow solution table and the learner-facing tools built on it.
//!
//! The compiler records the ground-truth search results here, keyed by
//! arena index and decoupled from the visible/editable fields on the tree.
//! Playback and learner edits never touch this table; it is the sole source
//! of truth for "correct" when verifying or revealing.

use crate::node::{EdgeId, NodeId};
use crate::tree::Tree;

/// Ground-truth search results for one node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolutionNode {
    pub value: Option<f64>,
    pub alpha: Option<f64>,
    pub beta: Option<f64>,
    pub pruned: bool,
}

/// Ground-truth pruning decision for one edge.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolutionEdge {
    pub pruned: bool,
}

/// Write-once shadow state for a whole tree, produced by one search run.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    nodes: Vec<SolutionNode>,
    edges: Vec<SolutionEdge>,
}

impl Solution {
    /// An empty solution sized to the tree's arenas.
    pub fn for_tree(tree: &Tree) -> Self {
        Self {
            nodes: vec![SolutionNode::default(); tree.len()],
            edges: vec![SolutionEdge::default(); tree.num_edges()],
        }
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &SolutionNode {
        &self.nodes[id.index()]
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut SolutionNode {
        &mut self.nodes[id.index()]
    }

    #[inline]
    pub fn edge(&self, id: EdgeId) -> &SolutionEdge {
        &self.edges[id.index()]
    }

    #[inline]
    pub(crate) fn edge_mut(&mut self, id: EdgeId) -> &mut SolutionEdge {
        &mut self.edges[id.index()]
    }
}

/// Compare the learner's visible annotations against the shadow solution.
///
/// True iff every interior node's visible value equals its shadow value and
/// every shadow-pruned edge is visibly marked pruned. Leaves are always
/// considered correct; their values are never asked to be recomputed.
pub fn verify(tree: &Tree, solution: &Solution) -> bool {
    for (i, node) in tree.nodes().iter().enumerate() {
        if node.is_interior() && node.value != solution.node(NodeId(i as u32)).value {
            return false;
        }
    }
    for (i, edge) in tree.edges().iter().enumerate() {
        let shadow = solution.edge(EdgeId(i as u32));
        if shadow.pruned && !edge.pruned {
            return false;
        }
    }
    true
}

/// Copy the shadow solution into the visible state.
///
/// Interior nodes receive their shadow value/alpha/beta/pruned; shadow-pruned
/// edges are visibly marked pruned. Leaves are untouched.
pub fn reveal_solution(tree: &mut Tree, solution: &Solution) {
    for i in 0..tree.len() {
        let id = NodeId(i as u32);
        if tree.get(id).is_leaf() {
            continue;
        }
        let shadow = solution.node(id).clone();
        let node = tree.get_mut(id);
        node.value = shadow.value;
        node.alpha = shadow.alpha;
        node.beta = shadow.beta;
        node.pruned = shadow.pruned;
    }
    for i in 0..tree.num_edges() {
        let id = EdgeId(i as u32);
        if solution.edge(id).pruned {
            tree.edge_mut(id).pruned = true;
        }
    }
}

/// Clear the visible annotations back to the unevaluated state.
///
/// Interior values and bounds go back to null and all highlight flags drop,
/// while leaf values and the shadow solution stay untouched.
pub fn reset_tree(tree: &mut Tree) {
    for i in 0..tree.len() {
        let node = tree.get_mut(NodeId(i as u32));
        if node.is_interior() {
            node.value = None;
            node.alpha = None;
            node.beta = None;
        }
        node.entered = false;
        node.pruned = false;
    }
    for i in 0..tree.num_edges() {
        let edge = tree.edge_mut(EdgeId(i as u32));
        edge.entered = false;
        edge.pruned = false;
    }
}

//! Game tree with arena allocation.
//!
//! Nodes and edges are stored in contiguous Vecs and referenced by
//! [`NodeId`]/[`EdgeId`] indices. The arena is built in one root-to-leaf
//! pass by [`Tree::generate`] and replaced wholesale on regeneration; ids
//! are never reused within a generation and never survive one.

use rand::Rng;
use rand_chacha::ChaCha20Rng;
use tracing::debug;

use crate::config::TreeConfig;
use crate::node::{Edge, EdgeId, Node, NodeId, NodeKind};

/// Game tree with arena-based node and edge storage.
///
/// The `mutable` flag gates the learner-facing edit surface
/// ([`edit_value`](Tree::edit_value), [`toggle_edge_pruned`](Tree::toggle_edge_pruned));
/// it is cleared while step playback is engaged so the visible state cannot
/// diverge from the recorded old/new values in the action log.
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    root: NodeId,
    root_kind: NodeKind,
    depth: u32,
    branching: u32,
    mutable: bool,
}

impl Tree {
    /// Create an empty tree shell with the declared shape and no root.
    pub fn new(config: &TreeConfig) -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            root: NodeId::NONE,
            root_kind: config.root_kind,
            depth: config.depth,
            branching: config.branching,
            mutable: true,
        }
    }

    /// Generate a fully populated tree.
    ///
    /// Node kinds alternate max <-> min from the configured root kind; nodes
    /// at the declared depth become leaves and receive a uniform integer
    /// score in `[min_value, max_value]`. No search state is touched.
    pub fn generate(config: &TreeConfig, rng: &mut ChaCha20Rng) -> Self {
        let mut tree = Self::new(config);
        tree.root = tree.build(config.root_kind, 1, config, rng);
        debug!(
            nodes = tree.len(),
            edges = tree.num_edges(),
            depth = config.depth,
            branching = config.branching,
            "tree generated"
        );
        tree
    }

    fn build(
        &mut self,
        kind: NodeKind,
        level: u32,
        config: &TreeConfig,
        rng: &mut ChaCha20Rng,
    ) -> NodeId {
        let at_bottom = level >= config.depth;
        let kind = if at_bottom { NodeKind::Leaf } else { kind };
        let id = self.allocate(Node::new(kind, level));

        if at_bottom {
            let score = rng.gen_range(config.min_value..=config.max_value);
            self.nodes[id.index()].value = Some(f64::from(score));
        } else {
            for _ in 0..config.branching {
                let child = self.build(kind.flipped(), level + 1, config, rng);
                let edge = self.allocate_edge(Edge::new(id, child));
                let child_node = &mut self.nodes[child.index()];
                child_node.parent = id;
                child_node.parent_edge = edge;
                self.nodes[id.index()].children.push(child);
            }
        }

        id
    }

    fn allocate(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    fn allocate_edge(&mut self, edge: Edge) -> EdgeId {
        let id = EdgeId(self.edges.len() as u32);
        self.edges.push(edge);
        id
    }

    /// Get the root node ID (NONE before generation).
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a reference to a node by ID.
    #[inline]
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Get a mutable reference to a node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    /// Get a reference to an edge by ID.
    #[inline]
    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.index()]
    }

    /// Get a mutable reference to an edge by ID.
    #[inline]
    pub fn edge_mut(&mut self, id: EdgeId) -> &mut Edge {
        &mut self.edges[id.index()]
    }

    /// Total number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check whether the tree has been generated yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Total number of edges in the tree.
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// The node arena, for read access (renderer traversal).
    #[inline]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// The edge arena, for read access.
    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Declared kind of the root node.
    #[inline]
    pub fn root_kind(&self) -> NodeKind {
        self.root_kind
    }

    /// Declared number of tree levels.
    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Declared branching factor.
    #[inline]
    pub fn branching(&self) -> u32 {
        self.branching
    }

    /// Whether the learner may currently edit values and pruned flags.
    #[inline]
    pub fn is_mutable(&self) -> bool {
        self.mutable
    }

    /// Gate or ungate the edit surface. Cleared while playback is engaged.
    pub fn set_mutable(&mut self, mutable: bool) {
        self.mutable = mutable;
    }

    /// Leaf node ids in document (left-to-right) order.
    ///
    /// Generation allocates nodes in preorder, so arena order is document
    /// order for every generated tree.
    pub fn leaves(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.is_leaf())
            .map(|(i, _)| NodeId(i as u32))
            .collect()
    }

    /// Apply a learner's value edit from raw text.
    ///
    /// Empty text, a bare sign, or a bare decimal point clears the value.
    /// Unparseable non-empty text is ignored and the prior value retained.
    /// Returns `false` when the edit was ignored or the tree is immutable.
    pub fn edit_value(&mut self, id: NodeId, text: &str) -> bool {
        if !self.mutable {
            return false;
        }
        let trimmed = text.trim();
        if trimmed.is_empty() || matches!(trimmed, "-" | "+" | ".") {
            self.nodes[id.index()].value = None;
            return true;
        }
        match trimmed.parse::<f64>() {
            Ok(value) => {
                self.nodes[id.index()].value = Some(value);
                true
            }
            Err(_) => false,
        }
    }

    /// Toggle the learner's pruned annotation on an edge.
    ///
    /// Returns `false` when the tree is immutable.
    pub fn toggle_edge_pruned(&mut self, id: EdgeId) -> bool {
        if !self.mutable {
            return false;
        }
        let edge = &mut self.edges[id.index()];
        edge.pruned = !edge.pruned;
        true
    }
}

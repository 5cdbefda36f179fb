//! Tree node and edge representation.
//!
//! Nodes and edges live in arenas owned by [`Tree`](crate::tree::Tree) and
//! are referenced by index newtypes. All parent/child/edge relationships are
//! non-owning indices; the tree owns everything.

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    pub fn is_some(self) -> bool {
        !self.is_none()
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index into the edge arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeId(pub u32);

impl EdgeId {
    pub const NONE: EdgeId = EdgeId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    pub fn is_some(self) -> bool {
        !self.is_none()
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// The role a node plays in the search.
///
/// `Rand` is part of the type vocabulary but is never produced by the
/// generator and is rejected by the search compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Max,
    Min,
    Leaf,
    Rand,
}

impl NodeKind {
    /// The kind of the next tree level: max and min alternate, other kinds
    /// are fixed points.
    pub fn flipped(self) -> NodeKind {
        match self {
            NodeKind::Max => NodeKind::Min,
            NodeKind::Min => NodeKind::Max,
            other => other,
        }
    }

    #[inline]
    pub fn is_maximizing(self) -> bool {
        self == NodeKind::Max
    }
}

/// A node in the game tree.
///
/// The `value`, `alpha`, `beta`, `entered` and `pruned` fields are the
/// *visible* state: what a renderer draws and what a learner edits. The
/// ground-truth search results live in a separate
/// [`Solution`](crate::solution::Solution) table.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Role of this node in the search.
    pub kind: NodeKind,

    /// Tree level, 1 = root.
    pub depth: u32,

    /// Parent node index (NONE for root).
    pub parent: NodeId,

    /// Edge connecting this node to its parent (NONE for root).
    pub parent_edge: EdgeId,

    /// Children in slot order. Length equals the tree's branching factor
    /// for interior nodes, empty for leaves.
    pub children: Vec<NodeId>,

    /// Visible value: generated score for leaves, learner/playback
    /// annotation for interior nodes.
    pub value: Option<f64>,

    /// Visible alpha bound, meaningful only for interior nodes.
    pub alpha: Option<f64>,

    /// Visible beta bound, meaningful only for interior nodes.
    pub beta: Option<f64>,

    /// Highlight: the search is currently inside this node.
    pub entered: bool,

    /// Highlight: at least one of this node's children was cut off.
    pub pruned: bool,
}

impl Node {
    pub fn new(kind: NodeKind, depth: u32) -> Self {
        Self {
            kind,
            depth,
            parent: NodeId::NONE,
            parent_edge: EdgeId::NONE,
            children: Vec::new(),
            value: None,
            alpha: None,
            beta: None,
            entered: false,
            pruned: false,
        }
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.kind == NodeKind::Leaf
    }

    #[inline]
    pub fn is_interior(&self) -> bool {
        !self.is_leaf()
    }
}

/// An edge connecting a parent node to one child.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub parent: NodeId,
    pub child: NodeId,

    /// Highlight: the search is currently inside the subtree below.
    pub entered: bool,

    /// This edge was (or is marked by the learner as) cut off.
    pub pruned: bool,
}

impl Edge {
    pub fn new(parent: NodeId, child: NodeId) -> Self {
        Self {
            parent,
            child,
            entered: false,
            pruned: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_none_sentinels() {
        assert!(NodeId::NONE.is_none());
        assert!(!NodeId::NONE.is_some());
        assert!(NodeId(0).is_some());
        assert!(EdgeId::NONE.is_none());
        assert!(EdgeId(3).is_some());
    }

    #[test]
    fn test_kind_alternation() {
        assert_eq!(NodeKind::Max.flipped(), NodeKind::Min);
        assert_eq!(NodeKind::Min.flipped(), NodeKind::Max);
        assert_eq!(NodeKind::Leaf.flipped(), NodeKind::Leaf);
        assert_eq!(NodeKind::Rand.flipped(), NodeKind::Rand);
        assert!(NodeKind::Max.is_maximizing());
        assert!(!NodeKind::Min.is_maximizing());
    }

    #[test]
    fn test_new_node_is_unevaluated() {
        let node = Node::new(NodeKind::Min, 2);
        assert!(node.parent.is_none());
        assert!(node.parent_edge.is_none());
        assert!(node.children.is_empty());
        assert_eq!(node.value, None);
        assert_eq!(node.alpha, None);
        assert_eq!(node.beta, None);
        assert!(!node.entered);
        assert!(!node.pruned);
        assert!(node.is_interior());
    }
}

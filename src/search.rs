//! Search-to-actions compiler.
//!
//! Runs a minimax search with alpha-beta pruning over a generated tree and
//! records every visible change the search would make as an ordered list of
//! reversible actions, grouped into playback steps. The same pass writes the
//! ground truth (values, bounds, pruning decisions) into a
//! [`Solution`] table that playback and learner edits never touch.
//!
//! Step grouping follows the search's own rhythm:
//!
//! 1. Entering a node is one step: its incoming edge and the node light up,
//!    and interior nodes take on the incoming (alpha, beta) window.
//! 2. A leaf child's evaluation folds the parent's value/bound bookkeeping
//!    into the leaf's entry step, so a trivial evaluation reads as one move.
//! 3. An interior child keeps its own inner steps; the parent's bookkeeping
//!    rides on the child's exit step instead.
//! 4. When beta <= alpha, the cut for all remaining siblings is appended to
//!    the exit step of the last child actually searched, so pruning becomes
//!    visible at the moment it is discovered.

use thiserror::Error;
use tracing::{debug, trace};

use crate::action::{Action, EdgeField, NodeField, Step, StepQueue};
use crate::node::{EdgeId, NodeId, NodeKind};
use crate::solution::Solution;
use crate::tree::Tree;

/// Errors that can occur when compiling a search.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("tree has no root node")]
    EmptyTree,

    #[error("search does not support {0:?} nodes")]
    UnsupportedKind(NodeKind),
}

/// Everything one recursive call contributes to the step list.
struct Subtree {
    /// Step fragment that enters the node.
    entry: Step,
    /// Steps produced below the node, in document order.
    inner: Vec<Step>,
    /// Step fragment that exits the node again.
    exit: Step,
    /// Minimax value of the node.
    value: f64,
}

/// Run the pruning search over `tree` and compile it into a step queue plus
/// the shadow solution.
///
/// The tree itself is not mutated; old values for every action are read from
/// a private simulation copy that the compiler advances as it emits, so the
/// first write to any field captures the true pre-playback visible value and
/// the round-trip law holds even over learner pre-annotations.
pub fn compile_search(tree: &Tree) -> Result<(StepQueue, Solution), CompileError> {
    if tree.root().is_none() {
        return Err(CompileError::EmptyTree);
    }
    if tree.nodes().iter().any(|n| n.kind == NodeKind::Rand) {
        return Err(CompileError::UnsupportedKind(NodeKind::Rand));
    }

    let mut compiler = Compiler {
        sim: tree.clone(),
        solution: Solution::for_tree(tree),
    };
    let root = compiler.search(tree.root(), f64::NEG_INFINITY, f64::INFINITY);

    let mut steps = Vec::with_capacity(root.inner.len() + 2);
    steps.push(root.entry);
    steps.extend(root.inner);
    steps.push(root.exit);

    let mut queue = StepQueue::new();
    queue.push_steps(steps);
    debug!(
        steps = queue.len(),
        nodes = tree.len(),
        value = root.value,
        "search compiled"
    );
    Ok((queue, compiler.solution))
}

struct Compiler {
    /// Simulated visible state, advanced as actions are emitted.
    sim: Tree,
    solution: Solution,
}

impl Compiler {
    fn search(&mut self, id: NodeId, mut alpha: f64, mut beta: f64) -> Subtree {
        let (kind, parent_edge, children) = {
            let node = self.sim.get(id);
            (node.kind, node.parent_edge, node.children.clone())
        };
        trace!(node = id.0, alpha, beta, ?kind, "enter");

        let mut entry = Step::new();
        if parent_edge.is_some() {
            entry.push(self.set_edge_entered(parent_edge, true));
        }
        entry.push(self.set_node_entered(id, true));

        if kind == NodeKind::Leaf {
            let value = self.sim.get(id).value.unwrap_or(0.0);
            self.solution.node_mut(id).value = Some(value);
            let mut exit = Step::new();
            if parent_edge.is_some() {
                exit.push(self.set_edge_entered(parent_edge, false));
            }
            return Subtree {
                entry,
                inner: Vec::new(),
                exit,
                value,
            };
        }

        let maximizing = kind.is_maximizing();
        entry.push(self.set_node_alpha(id, alpha));
        entry.push(self.set_node_beta(id, beta));

        let mut best = if maximizing {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
        let mut inner: Vec<Step> = Vec::new();
        let mut cutoff = false;
        let mut cut: Step = Step::new();

        for child in children {
            if cutoff {
                if cut.is_empty() {
                    cut.push(self.set_node_pruned(id, true));
                }
                self.prune_subtree(child, &mut cut);
                continue;
            }

            let sub = self.search(child, alpha, beta);

            let mut updates = Step::new();
            let improved = if maximizing {
                sub.value > best
            } else {
                sub.value < best
            };
            if improved {
                best = sub.value;
                updates.push(self.set_node_value(id, best));
            }
            if maximizing && sub.value > alpha {
                alpha = sub.value;
                updates.push(self.set_node_alpha(id, alpha));
            } else if !maximizing && sub.value < beta {
                beta = sub.value;
                updates.push(self.set_node_beta(id, beta));
            }

            if sub.inner.is_empty() {
                // Leaf child: its evaluation and the parent's bookkeeping
                // stay within a single playback step.
                let mut step = sub.entry;
                step.extend(updates);
                inner.push(step);
                inner.push(sub.exit);
            } else {
                inner.push(sub.entry);
                inner.extend(sub.inner);
                let mut exit = sub.exit;
                exit.extend(updates);
                inner.push(exit);
            }

            if beta <= alpha {
                cutoff = true;
                trace!(node = id.0, alpha, beta, "cutoff");
            }
        }

        if !cut.is_empty() {
            // The cut becomes visible on the exit of the last searched child.
            if let Some(last) = inner.last_mut() {
                last.extend(cut);
            }
        }

        let mut exit = Step::new();
        exit.push(self.set_node_entered(id, false));
        if parent_edge.is_some() {
            exit.push(self.set_edge_entered(parent_edge, false));
        }

        Subtree {
            entry,
            inner,
            exit,
            value: best,
        }
    }

    /// Record the whole subtree under `id` (incoming edge included) as
    /// pruned: shadow flags for every node and edge, visible actions for the
    /// edges.
    fn prune_subtree(&mut self, id: NodeId, out: &mut Step) {
        self.solution.node_mut(id).pruned = true;
        let (parent_edge, children) = {
            let node = self.sim.get(id);
            (node.parent_edge, node.children.clone())
        };
        if parent_edge.is_some() {
            out.push(self.set_edge_pruned(parent_edge, true));
        }
        for child in children {
            self.prune_subtree(child, out);
        }
    }

    fn set_node_entered(&mut self, id: NodeId, new: bool) -> Action {
        let old = self.sim.get(id).entered;
        self.sim.get_mut(id).entered = new;
        Action::Node {
            id,
            field: NodeField::Entered { old, new },
        }
    }

    fn set_node_value(&mut self, id: NodeId, value: f64) -> Action {
        let old = self.sim.get(id).value;
        let new = Some(value);
        self.sim.get_mut(id).value = new;
        self.solution.node_mut(id).value = new;
        Action::Node {
            id,
            field: NodeField::Value { old, new },
        }
    }

    fn set_node_alpha(&mut self, id: NodeId, alpha: f64) -> Action {
        let old = self.sim.get(id).alpha;
        let new = Some(alpha);
        self.sim.get_mut(id).alpha = new;
        self.solution.node_mut(id).alpha = new;
        Action::Node {
            id,
            field: NodeField::Alpha { old, new },
        }
    }

    fn set_node_beta(&mut self, id: NodeId, beta: f64) -> Action {
        let old = self.sim.get(id).beta;
        let new = Some(beta);
        self.sim.get_mut(id).beta = new;
        self.solution.node_mut(id).beta = new;
        Action::Node {
            id,
            field: NodeField::Beta { old, new },
        }
    }

    fn set_node_pruned(&mut self, id: NodeId, new: bool) -> Action {
        let old = self.sim.get(id).pruned;
        self.sim.get_mut(id).pruned = new;
        self.solution.node_mut(id).pruned = new;
        Action::Node {
            id,
            field: NodeField::Pruned { old, new },
        }
    }

    fn set_edge_pruned(&mut self, id: EdgeId, new: bool) -> Action {
        let old = self.sim.edge(id).pruned;
        self.sim.edge_mut(id).pruned = new;
        self.solution.edge_mut(id).pruned = new;
        Action::Edge {
            id,
            field: EdgeField::Pruned { old, new },
        }
    }

    fn set_edge_entered(&mut self, id: EdgeId, new: bool) -> Action {
        let old = self.sim.edge(id).entered;
        self.sim.edge_mut(id).entered = new;
        Action::Edge {
            id,
            field: EdgeField::Entered { old, new },
        }
    }
}

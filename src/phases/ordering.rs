//! Phase 3: Determining Emission Order
//!
//! Computes the order in which files are written so that every file comes
//! after everything it requires.
//!
//! ## Process
//!
//! 1.  **Depth-First Traversal**: Nodes are visited in first-reference order
//!     (entry files first, then files in the order discovery met them). For
//!     each node its dependencies are visited first, in declaration order,
//!     and the node is appended afterwards (post-order).
//!
//! 2.  **Visited Tracking**: A file reached along several branches is
//!     emitted once, at its first completion.
//!
//! 3.  **Elimination** (optional): files that neither require nor are
//!     required by another file are dropped from the finished order.
//!
//! The traversal only depends on registry order and declaration order, so
//! the same inputs always give the same order.

use log::debug;

use super::graph::DependencyGraph;
use super::FileOrder;
use crate::source::{SourceId, SourceRegistry};

/// Execute Phase 3: compute a dependencies-first order over the graph.
///
/// The graph is expected to be acyclic (Phase 2 guarantees it). Ordering
/// itself cannot fail.
pub fn execute(graph: &DependencyGraph) -> FileOrder {
    let mut order = Vec::with_capacity(graph.node_count());
    let mut visited = vec![false; graph.node_count()];

    for node in graph.nodes() {
        build_order(graph, node, &mut order, &mut visited);
    }

    FileOrder::new(order)
}

/// Visit dependencies before the node itself.
///
/// Uses an explicit stack of `(node, next dependency index)` frames; a node
/// is appended when its frame is popped.
fn build_order(
    graph: &DependencyGraph,
    root: SourceId,
    order: &mut Vec<SourceId>,
    visited: &mut [bool],
) {
    if visited[root.index()] {
        return;
    }
    visited[root.index()] = true;
    let mut stack = vec![(root, 0usize)];

    while let Some(frame) = stack.last_mut() {
        let (node, next) = *frame;
        match graph.dependencies(node).get(next) {
            Some(&dep) => {
                frame.1 += 1;
                if !visited[dep.index()] {
                    visited[dep.index()] = true;
                    stack.push((dep, 0));
                }
            }
            None => {
                order.push(node);
                stack.pop();
            }
        }
    }
}

/// Drop files with no dependencies and no dependents.
pub fn eliminate_unused(
    order: FileOrder,
    graph: &DependencyGraph,
    registry: &SourceRegistry,
) -> FileOrder {
    let kept = order
        .order
        .into_iter()
        .filter(|&id| {
            let used = !graph.dependencies(id).is_empty() || graph.dependent_count(id) > 0;
            if !used {
                debug!("Eliminating unused file '{}'", registry.file(id).path().display());
            }
            used
        })
        .collect();
    FileOrder::new(kept)
}

//! Phase 2: Dependency Graph Construction
//!
//! Builds one node per discovered file and one edge `file -> dependency`
//! per declared dependency, then rejects the graph if it contains a cycle.
//!
//! ## Process
//!
//! 1.  **Edges**: Each file's dependency list becomes its outgoing edges, in
//!     declaration order. A file requiring itself contributes no edge, and a
//!     dependency declared twice contributes one.
//!
//! 2.  **Cycle Detection**: A depth-first walk from every node keeps the
//!     current path; reaching a node already on that path is a cycle, and
//!     the path from that node back to itself is reported.

use log::debug;

use crate::error::{Error, Result};
use crate::source::{SourceId, SourceRegistry};

/// Directed `file -> dependency` graph over a registry's files.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    /// Outgoing edges per node, indexed by `SourceId::index`.
    edges: Vec<Vec<SourceId>>,
    /// Number of incoming edges per node.
    dependents: Vec<usize>,
}

impl DependencyGraph {
    /// Nodes in first-reference order.
    pub fn nodes(&self) -> impl Iterator<Item = SourceId> + '_ {
        (0..self.edges.len()).map(SourceId::from_index)
    }

    pub fn node_count(&self) -> usize {
        self.edges.len()
    }

    /// Dependencies of `id`, in declaration order.
    pub fn dependencies(&self, id: SourceId) -> &[SourceId] {
        &self.edges[id.index()]
    }

    /// Number of files that depend on `id`.
    pub fn dependent_count(&self, id: SourceId) -> usize {
        self.dependents[id.index()]
    }
}

/// Execute Phase 2: build the dependency graph and reject cycles.
pub fn execute(registry: &SourceRegistry) -> Result<DependencyGraph> {
    let graph = build(registry);
    detect_cycles(&graph, registry)?;
    Ok(graph)
}

/// Build the graph without checking for cycles.
pub fn build(registry: &SourceRegistry) -> DependencyGraph {
    let mut edges = vec![Vec::new(); registry.len()];
    let mut dependents = vec![0; registry.len()];

    for (id, file) in registry.iter() {
        let out: &mut Vec<SourceId> = &mut edges[id.index()];
        for &dep in file.dependencies() {
            if dep == id {
                debug!("Ignoring self reference in '{}'", file.path().display());
                continue;
            }
            if out.contains(&dep) {
                continue;
            }
            out.push(dep);
            dependents[dep.index()] += 1;
        }
    }

    DependencyGraph { edges, dependents }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    New,
    OnPath,
    Done,
}

/// Detect cycles in the dependency graph.
///
/// Files reachable along several branches are fine; only a file that
/// appears twice on one path is a cycle. The walk keeps its own stack, so
/// chain length is bounded by memory rather than by the thread stack.
pub fn detect_cycles(graph: &DependencyGraph, registry: &SourceRegistry) -> Result<()> {
    let mut state = vec![Visit::New; graph.node_count()];
    // Current path, with the index of the next dependency to visit per node.
    let mut path: Vec<(SourceId, usize)> = Vec::new();

    for root in graph.nodes() {
        if state[root.index()] != Visit::New {
            continue;
        }
        state[root.index()] = Visit::OnPath;
        path.push((root, 0));

        while let Some(frame) = path.last_mut() {
            let (node, next) = *frame;
            let Some(&dep) = graph.dependencies(node).get(next) else {
                state[node.index()] = Visit::Done;
                path.pop();
                continue;
            };
            frame.1 += 1;

            match state[dep.index()] {
                Visit::New => {
                    state[dep.index()] = Visit::OnPath;
                    path.push((dep, 0));
                }
                Visit::OnPath => return Err(cycle_error(registry, &path, dep)),
                Visit::Done => {}
            }
        }
    }
    Ok(())
}

/// Report the part of `path` from `dep` onwards, closed by `dep` again.
fn cycle_error(registry: &SourceRegistry, path: &[(SourceId, usize)], dep: SourceId) -> Error {
    let start = path.iter().position(|&(id, _)| id == dep).unwrap_or(0);
    let mut members = path[start..]
        .iter()
        .map(|&(id, _)| registry.file(id).path().display().to_string())
        .collect::<Vec<_>>();
    members.push(registry.file(dep).path().display().to_string());

    Error::CycleDetected {
        cycle: members.join(" -> "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CombineOptions;
    use crate::phases::discovery;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn discover(entries: &[PathBuf]) -> SourceRegistry {
        discovery::execute(entries, &CombineOptions::default())
            .unwrap()
            .registry
    }

    #[test]
    fn test_edges_follow_declarations() {
        let temp = TempDir::new().unwrap();
        let main = write(temp.path(), "main.js", "/*requires b.js *//*requires a.js */");
        write(temp.path(), "a.js", "");
        write(temp.path(), "b.js", "/*requires a.js */");

        let registry = discover(&[main.clone()]);
        let graph = execute(&registry).unwrap();
        let main_id = registry.lookup(&main).unwrap();
        let a = registry.lookup(temp.path().join("a.js")).unwrap();
        let b = registry.lookup(temp.path().join("b.js")).unwrap();

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.dependencies(main_id), &[b, a]);
        assert_eq!(graph.dependencies(b), &[a]);
        assert_eq!(graph.dependent_count(a), 2);
        assert_eq!(graph.dependent_count(main_id), 0);
    }

    #[test]
    fn test_self_reference_is_not_an_edge() {
        let temp = TempDir::new().unwrap();
        let a = write(temp.path(), "a.js", "/*requires a.js */a");

        let registry = discover(&[a]);
        let graph = execute(&registry).unwrap();
        let (id, _) = registry.iter().next().unwrap();

        assert!(graph.dependencies(id).is_empty());
        assert_eq!(graph.dependent_count(id), 0);
    }

    #[test]
    fn test_duplicate_declaration_is_one_edge() {
        let temp = TempDir::new().unwrap();
        let a = write(temp.path(), "a.js", "/*requires b.js *//*requires ./b.js */");
        write(temp.path(), "b.js", "");

        let registry = discover(&[a]);
        let graph = execute(&registry).unwrap();
        let b = registry.lookup(temp.path().join("b.js")).unwrap();

        assert_eq!(graph.dependent_count(b), 1);
    }

    #[test]
    fn test_two_file_cycle_detected() {
        let temp = TempDir::new().unwrap();
        let a = write(temp.path(), "a.js", "/*requires b.js */");
        write(temp.path(), "b.js", "/*requires a.js */");

        let registry = discover(&[a]);
        let err = execute(&registry).unwrap_err();

        match err {
            Error::CycleDetected { cycle } => {
                let parts: Vec<&str> = cycle.split(" -> ").collect();
                assert_eq!(parts.len(), 3);
                assert!(parts[0].ends_with("a.js"));
                assert!(parts[1].ends_with("b.js"));
                assert!(parts[2].ends_with("a.js"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_cycle_below_entry_reports_only_cycle_members() {
        let temp = TempDir::new().unwrap();
        let main = write(temp.path(), "main.js", "/*requires x.js */");
        write(temp.path(), "x.js", "/*requires y.js */");
        write(temp.path(), "y.js", "/*requires z.js */");
        write(temp.path(), "z.js", "/*requires x.js */");

        let registry = discover(&[main]);
        let err = execute(&registry).unwrap_err();
        let message = err.to_string();

        assert!(!message.contains("main.js"));
        assert!(message.contains("x.js"));
        assert!(message.contains("y.js"));
        assert!(message.contains("z.js"));
    }

    #[test]
    fn test_diamond_is_not_a_cycle() {
        let temp = TempDir::new().unwrap();
        let top = write(temp.path(), "top.js", "/*requires left.js *//*requires right.js */");
        write(temp.path(), "left.js", "/*requires base.js */");
        write(temp.path(), "right.js", "/*requires base.js */");
        write(temp.path(), "base.js", "");

        let registry = discover(&[top]);
        assert!(execute(&registry).is_ok());
    }

    #[test]
    fn test_long_chain_does_not_exhaust_stack() {
        let temp = TempDir::new().unwrap();
        let n = 20_000;
        for i in 0..n {
            let text = if i + 1 < n {
                format!("/*requires f{}.js */", i + 1)
            } else {
                String::new()
            };
            write(temp.path(), &format!("f{i}.js"), &text);
        }

        let registry = discover(&[temp.path().join("f0.js")]);
        assert!(execute(&registry).is_ok());
    }

    #[test]
    fn test_cycle_at_end_of_long_chain() {
        let temp = TempDir::new().unwrap();
        let n = 5_000;
        for i in 0..n {
            let next = if i + 1 < n { i + 1 } else { n - 2 };
            write(temp.path(), &format!("f{i}.js"), &format!("/*requires f{next}.js */"));
        }

        let registry = discover(&[temp.path().join("f0.js")]);
        match execute(&registry).unwrap_err() {
            Error::CycleDetected { cycle } => {
                let parts: Vec<&str> = cycle.split(" -> ").collect();
                assert_eq!(parts.len(), 3);
                assert!(parts[0].ends_with(&format!("f{}.js", n - 2)));
                assert!(parts[1].ends_with(&format!("f{}.js", n - 1)));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}

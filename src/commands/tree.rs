//! # Tree Command Implementation
//!
//! This module implements the `tree` subcommand, which displays the
//! `/*requires */` dependencies of each entry file as a tree.
//!
//! ## Functionality
//!
//! - **Dependency Visualization**: Children are shown in declaration order.
//! - **Depth Control**: `--depth` limits how many levels are shown.
//! - **Cycles**: Only discovery runs, so cyclic inputs can still be
//!   inspected; a file already on the current branch is shown with a
//!   `(cycle)` marker instead of being expanded again.
//! - **Shared Files**: A file whose dependencies were already shown is
//!   printed once more as a leaf marked `(see above)`, so output grows with
//!   the number of edges rather than the number of paths.
//!
//! This command is a read-only operation that does not write any output.

use std::borrow::Cow;
use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::Path;

use anyhow::Result;
use clap::Args;
use ptree::{print_tree, TreeItem};

use file_combiner::phases::discovery;
use file_combiner::source::{SourceId, SourceRegistry};
use file_combiner::{suggestions, Combiner};

use super::InputArgs;

/// Display the dependency tree
#[derive(Args, Debug)]
pub struct TreeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Maximum depth to display in the tree.
    ///
    /// If not specified, displays the full tree.
    /// Use 0 to show only the entry files, 1 to show their direct
    /// dependencies, etc.
    #[arg(long, value_name = "NUM")]
    pub depth: Option<usize>,
}

/// Execute the `tree` command.
pub fn execute(args: TreeArgs) -> Result<()> {
    let resolved = args.input.resolve()?;
    let combiner = Combiner::new(resolved.options);
    let entries = discovery::filter_entries(&resolved.files, combiner.options());
    let discovered = combiner.discover(&entries).map_err(suggestions::with_hint)?;

    let base = env::current_dir()
        .and_then(fs::canonicalize)
        .unwrap_or_default();
    let max_depth = args.depth.unwrap_or(usize::MAX);
    let mut expanded = HashSet::new();
    for &entry in &discovered.entries {
        let root = build_tree(
            &discovered.registry,
            entry,
            &base,
            max_depth,
            &mut expanded,
        );
        print_tree(&root).map_err(|e| anyhow::anyhow!("Failed to display tree: {}", e))?;
    }

    Ok(())
}

/// A tree node whose children are still being built.
struct Frame {
    id: SourceId,
    depth: usize,
    label: String,
    children: Vec<TreeNode>,
    next: usize,
}

/// Build the tree below `root`.
///
/// Files on the current branch are marked `(cycle)`; files already expanded
/// anywhere (tracked in `expanded`) are marked `(see above)`. Both become
/// leaves. Built with an explicit stack so deep chains need no recursion.
fn build_tree(
    registry: &SourceRegistry,
    root: SourceId,
    base: &Path,
    max_depth: usize,
    expanded: &mut HashSet<SourceId>,
) -> TreeNode {
    let label = |id: SourceId| display_path(registry.file(id).path(), base);
    let frame = |id: SourceId, depth: usize| Frame {
        id,
        depth,
        label: label(id),
        children: Vec::new(),
        next: 0,
    };

    expanded.insert(root);
    let mut branch = HashSet::from([root]);
    let mut stack = vec![frame(root, 0)];
    let mut tree = TreeNode::leaf(label(root));

    while let Some(top) = stack.last_mut() {
        let deps = registry.file(top.id).dependencies();
        let next = if top.depth < max_depth {
            deps.get(top.next).copied()
        } else {
            None
        };

        let Some(dep) = next else {
            branch.remove(&top.id);
            let Some(done) = stack.pop() else { break };
            let node = TreeNode {
                label: done.label,
                children: done.children,
            };
            match stack.last_mut() {
                Some(parent) => parent.children.push(node),
                None => tree = node,
            }
            continue;
        };

        top.next += 1;
        let depth = top.depth + 1;
        if branch.contains(&dep) {
            let node = TreeNode::leaf(format!("{} (cycle)", label(dep)));
            push_child(&mut stack, node);
        } else if registry.file(dep).dependencies().is_empty() || depth >= max_depth {
            push_child(&mut stack, TreeNode::leaf(label(dep)));
        } else if !expanded.insert(dep) {
            let node = TreeNode::leaf(format!("{} (see above)", label(dep)));
            push_child(&mut stack, node);
        } else {
            branch.insert(dep);
            stack.push(frame(dep, depth));
        }
    }

    tree
}

fn push_child(stack: &mut [Frame], node: TreeNode) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
    }
}

fn display_path(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .display()
        .to_string()
}

/// Tree node structure for ptree visualization
#[derive(Clone, Debug)]
struct TreeNode {
    label: String,
    children: Vec<TreeNode>,
}

impl TreeNode {
    fn leaf(label: String) -> Self {
        Self {
            label,
            children: vec![],
        }
    }
}

impl Drop for TreeNode {
    // Unlinks children first so dropping a deep chain does not recurse.
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

impl TreeItem for TreeNode {
    type Child = TreeNode;

    fn write_self<W: std::io::Write>(
        &self,
        f: &mut W,
        _style: &ptree::Style,
    ) -> std::io::Result<()> {
        write!(f, "{}", self.label)
    }

    fn children(&self) -> Cow<'_, [Self::Child]> {
        Cow::Borrowed(&self.children)
    }
}

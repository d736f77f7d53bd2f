//! Orchestrator for the complete combine operation
//!
//! This module coordinates all phases behind a small API:
//!
//! - [`Combiner::plan`] runs discovery, graph construction and ordering and
//!   returns a [`CombinePlan`] without touching any output.
//! - [`CombinePlan::write_to`] runs the writing phase.
//! - [`Combiner::combine`] and [`Combiner::combine_paths`] do both.
//!
//! Every call starts from a fresh registry and work queue, so a `Combiner`
//! can be reused without state leaking between runs. Because the output is
//! only touched after ordering succeeds, a missing dependency, malformed
//! directive or cycle leaves the sink untouched.

use std::io::Write;
use std::path::{Path, PathBuf};

use super::{phase1, phase2, phase3, phase4, DiscoveredSources, FileOrder};
use crate::charset::Charset;
use crate::config::CombineOptions;
use crate::error::Result;
use crate::source::{SourceFile, SourceId, SourceRegistry};

/// Entry point for combining files.
#[derive(Debug, Clone, Default)]
pub struct Combiner {
    options: CombineOptions,
}

impl Combiner {
    pub fn new(options: CombineOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CombineOptions {
        &self.options
    }

    /// Execute Phase 1 only: discover and parse every reachable file.
    ///
    /// Useful for inspecting declared dependencies even when they form a cycle.
    pub fn discover(&self, entries: &[PathBuf]) -> Result<DiscoveredSources> {
        phase1::execute(entries, &self.options)
    }

    /// Execute Phases 1-3 over entry files that must all exist.
    pub fn plan(&self, entries: &[PathBuf]) -> Result<CombinePlan> {
        // Phase 1: Discovery
        let discovered = phase1::execute(entries, &self.options)?;

        // Phase 2: Graph Construction
        let graph = phase2::execute(&discovered.registry)?;

        // Phase 3: Ordering
        let mut order = phase3::execute(&graph);
        if self.options.eliminate_unused {
            order = phase3::eliminate_unused(order, &graph, &discovered.registry);
        }

        Ok(CombinePlan {
            discovered,
            order,
            options: self.options,
        })
    }

    /// Like [`Combiner::plan`], but entries that are not regular files are
    /// skipped and logged instead of failing the run.
    pub fn plan_paths<P: AsRef<Path>>(&self, entries: &[P]) -> Result<CombinePlan> {
        let files = phase1::filter_entries(entries, &self.options);
        self.plan(&files)
    }

    /// Combine `entries` into `sink` (Phases 1-4).
    pub fn combine<W: Write + ?Sized>(&self, sink: &mut W, entries: &[PathBuf]) -> Result<()> {
        self.plan(entries)?.write_to(sink)
    }

    /// Combine path names into `sink`, skipping names that are not files.
    pub fn combine_paths<W, P>(&self, sink: &mut W, entries: &[P]) -> Result<()>
    where
        W: Write + ?Sized,
        P: AsRef<Path>,
    {
        self.plan_paths(entries)?.write_to(sink)
    }
}

/// The outcome of discovery, graph construction and ordering.
#[derive(Debug)]
pub struct CombinePlan {
    discovered: DiscoveredSources,
    order: FileOrder,
    options: CombineOptions,
}

impl CombinePlan {
    /// Files in output order.
    pub fn files(&self) -> impl Iterator<Item = &SourceFile> + '_ {
        self.order
            .order
            .iter()
            .map(|&id| self.discovered.registry.file(id))
    }

    /// Output order as registry ids.
    pub fn order(&self) -> &FileOrder {
        &self.order
    }

    /// Every discovered file, whether or not it is emitted.
    pub fn registry(&self) -> &SourceRegistry {
        &self.discovered.registry
    }

    /// Entry files that were combined, in the order given.
    pub fn entries(&self) -> &[SourceId] {
        &self.discovered.entries
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Execute Phase 4: write the ordered files to `sink`.
    pub fn write_to<W: Write + ?Sized>(&self, sink: &mut W) -> Result<()> {
        phase4::execute(sink, self.files(), &self.options)
    }
}

/// Combine `inputs` into `out` in dependency order.
///
/// Inputs that do not name a regular file are skipped.
pub fn combine<W, P>(
    out: &mut W,
    inputs: &[P],
    charset: Charset,
    verbose: bool,
    separator: bool,
    eliminate_unused: bool,
) -> Result<()>
where
    W: Write + ?Sized,
    P: AsRef<Path>,
{
    let combiner = Combiner::new(CombineOptions {
        charset,
        verbose,
        separator,
        eliminate_unused,
    });
    combiner.combine_paths(out, inputs)
}

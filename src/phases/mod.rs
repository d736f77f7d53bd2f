//! Implementation of the phases of a combine run.
//!
//! ## Overview
//!
//! A combine run follows 4 phases:
//! 1. Discovery - Parse entry files and everything they transitively require
//! 2. Graph Construction - Build `file -> dependency` edges and reject cycles
//! 3. Ordering - Compute a deterministic dependencies-first order
//! 4. Writing - Concatenate the ordered contents into the output sink
//!
//! The `orchestrator` module ties them together behind [`orchestrator::Combiner`].
//! Each phase depends only on the previous phases and the foundation modules
//! (`directive`, `source`, `config`).

use crate::source::{SourceId, SourceRegistry};

// Phase modules
pub mod discovery;
pub mod graph;
pub mod orchestrator;
pub mod ordering;
pub mod write;

pub use discovery as phase1;
pub use graph as phase2;
pub use ordering as phase3;
pub use write as phase4;

/// Output of the discovery phase: every reachable file, parsed.
#[derive(Debug)]
pub struct DiscoveredSources {
    /// Registry holding one parsed record per file.
    pub registry: SourceRegistry,
    /// Entry files in the order given, duplicates removed.
    pub entries: Vec<SourceId>,
}

/// Emission order computed by the ordering phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOrder {
    /// Files in output order; dependencies come before their dependents.
    pub order: Vec<SourceId>,
}

impl FileOrder {
    pub fn new(order: Vec<SourceId>) -> Self {
        Self { order }
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Position of `id` in the order, if present.
    pub fn position(&self, id: SourceId) -> Option<usize> {
        self.order.iter().position(|&other| other == id)
    }
}

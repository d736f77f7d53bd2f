//! Phase 1: Discovery
//!
//! This is the first phase of the combine pipeline. It finds the transitive
//! closure of the entry files by following `/*requires */` directives and
//! parses every file in it exactly once.
//!
//! ## Process
//!
//! 1.  **Seeding**: Each entry file gets a record in a fresh
//!     `SourceRegistry` and is pushed onto a work queue.
//!
//! 2.  **Worklist**: Files are taken from the front of the queue. A file
//!     whose contents are already set is skipped; otherwise it is read,
//!     decoded and scanned for directives. Each directive is resolved
//!     against the declaring file's directory, must name an existing
//!     regular file, and is recorded as a dependency. Dependencies that
//!     have not been parsed yet are appended to the queue.
//!
//! 3.  **Termination**: A file moves from unparsed to parsed once, so the
//!     queue drains. The parse-once check is also what keeps a file that
//!     requires itself, or sits on a cycle, from being processed forever;
//!     real cycles are reported by the graph phase.

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};

use super::DiscoveredSources;
use crate::config::CombineOptions;
use crate::directive;
use crate::error::{Error, Result};
use crate::source::{SourceId, SourceRegistry};

/// Execute Phase 1: discover and parse every file reachable from `entries`.
///
/// Every entry must exist; see [`filter_entries`] for the lenient variant
/// that skips missing ones.
pub fn execute(entries: &[PathBuf], options: &CombineOptions) -> Result<DiscoveredSources> {
    let mut registry = SourceRegistry::new();
    let mut todo = VecDeque::new();
    let mut entry_ids = Vec::new();

    for entry in entries {
        let id = registry.get(entry)?;
        if !entry_ids.contains(&id) {
            entry_ids.push(id);
        }
        todo.push_back(id);
    }

    while let Some(id) = todo.pop_front() {
        if registry.file(id).is_parsed() {
            continue;
        }
        process_source_file(&mut registry, id, options, &mut todo)?;
    }

    Ok(DiscoveredSources {
        registry,
        entries: entry_ids,
    })
}

/// Keep the entries that name a regular file, logging the rest.
pub fn filter_entries<P: AsRef<Path>>(entries: &[P], options: &CombineOptions) -> Vec<PathBuf> {
    let mut files = Vec::with_capacity(entries.len());
    for entry in entries {
        let path = entry.as_ref();
        if path.is_file() {
            if options.verbose {
                info!("Adding file '{}'", absolute(path).display());
            }
            files.push(path.to_path_buf());
        } else {
            warn!("Couldn't find file '{}'", path.display());
        }
    }
    files
}

/// Parse one file, register its dependencies and queue the unparsed ones.
fn process_source_file(
    registry: &mut SourceRegistry,
    id: SourceId,
    options: &CombineOptions,
    todo: &mut VecDeque<SourceId>,
) -> Result<()> {
    let file = registry.file(id);
    let path = file.path().to_path_buf();
    let directory = file.directory().to_path_buf();

    if options.verbose {
        info!("Processing file '{}'", path.display());
    }

    let bytes = fs::read(&path).map_err(|source| Error::Read {
        path: path.clone(),
        source,
    })?;
    let text = options.charset.decode(&bytes);
    let parsed = directive::parse(&path, &text)?;

    let mut dependencies = Vec::with_capacity(parsed.requires.len());
    for reference in &parsed.requires {
        if options.verbose {
            info!("... has dependency on {}", reference);
        }

        let dep_path = directive::resolve_reference(&directory, reference);
        if !dep_path.is_file() {
            return Err(Error::MissingDependency {
                path: dep_path,
                declared_in: path,
            });
        }

        let dep_id = registry.get(&dep_path)?;
        if !registry.file(dep_id).is_parsed() {
            todo.push_back(dep_id);
        }
        dependencies.push(dep_id);
    }

    if options.verbose && dependencies.is_empty() {
        info!("... no dependencies found.");
    }

    registry.complete(id, parsed.contents, dependencies);
    Ok(())
}

fn absolute(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

//! # File Combiner Library
//!
//! This library combines many text source files into one output, ordered so
//! that every file comes after the files it depends on. Dependencies are
//! declared inside the files themselves with comment directives:
//!
//! ```text
//! /*requires util.js */
//! alert(1);
//! ```
//!
//! It backs the `file-combiner` command-line tool but can be embedded in any
//! build step that needs to assemble one script or stylesheet from parts.
//!
//! ## Quick Example
//!
//! ```
//! use file_combiner::{CombineOptions, Combiner};
//!
//! let dir = tempfile::tempdir().unwrap();
//! std::fs::write(dir.path().join("main.js"), "/*requires util.js */alert(1);").unwrap();
//! std::fs::write(dir.path().join("util.js"), "function f(){}").unwrap();
//!
//! let mut out = Vec::new();
//! Combiner::new(CombineOptions::default())
//!     .combine(&mut out, &[dir.path().join("main.js")])
//!     .unwrap();
//! assert_eq!(String::from_utf8(out).unwrap(), "function f(){}alert(1);");
//! ```
//!
//! ## Core Concepts
//!
//! - **Directives (`directive`)**: `/*requires <path> */` comments are
//!   stripped from the text and recorded as dependencies. Relative paths are
//!   resolved against the directory of the file that declares them.
//! - **Sources (`source`)**: A registry holding one record per physical
//!   file, keyed by canonical path, so each file is parsed once.
//! - **Configuration (`config`, `charset`)**: Run options and the optional
//!   `.combiner.yaml` project file.
//! - **Phases (`phases`)**: Discovery, graph construction with cycle
//!   detection, deterministic ordering and output writing.
//!
//! ## Execution Flow
//!
//! 1.  **Discovery**: Breadth-first worklist over the entry files and every
//!     file they transitively require.
//! 2.  **Graph Construction**: `file -> dependency` edges; cycles are fatal.
//! 3.  **Ordering**: Dependencies first, ties broken by first-reference order.
//! 4.  **Writing**: Contents concatenated, optionally with separator markers.

pub mod charset;
pub mod config;
pub mod directive;
pub mod error;
pub mod phases;
pub mod source;
pub mod suggestions;

pub use charset::Charset;
pub use config::CombineOptions;
pub use error::{Error, Result};
pub use phases::orchestrator::{combine, CombinePlan, Combiner};

#[cfg(test)]
mod directive_proptest;

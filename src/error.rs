//! # Error Handling
//!
//! This module defines the centralized error type for `file-combiner`. It
//! uses the `thiserror` library to build one `Error` enum that covers every
//! fatal condition the combine pipeline can hit, each variant carrying
//! enough context (paths, directive text, cycle members) to diagnose the
//! problem without opening the sources.
//!
//! ## Key Components
//!
//! - **`Error`**: All failure modes of the library.
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! A missing entry file is not represented here: entry files
//! that do not exist are skipped and logged, and the run carries on.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for file-combiner operations
#[derive(Error, Debug)]
pub enum Error {
    /// A `/*requires */` directive names a file that does not exist.
    #[error("Dependency file not found: '{}' (required by '{}')", path.display(), declared_in.display())]
    MissingDependency {
        /// The resolved path of the missing dependency.
        path: PathBuf,
        /// The file containing the directive.
        declared_in: PathBuf,
    },

    /// A `/*requires` directive was never closed with `*/`.
    #[error("Invalid requires comment in '{}': unterminated directive '{directive}'", file.display())]
    MalformedDirective {
        file: PathBuf,
        /// The directive text up to the end of the file.
        directive: String,
    },

    /// The dependency graph contains a cycle.
    #[error("Cycle detected in file dependencies: {cycle}")]
    CycleDetected { cycle: String },

    /// A source file could not be read.
    #[error("Failed to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The output sink rejected a write.
    #[error("Failed to write output: {source}")]
    Write {
        #[source]
        source: std::io::Error,
    },

    /// The requested character set is not supported.
    #[error("Unsupported charset: {name}")]
    UnsupportedCharset { name: String },

    /// An error occurred while parsing the project configuration file.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A glob pattern error, wrapped from `glob::PatternError`.
    #[error("Glob pattern error: {0}")]
    Glob(#[from] glob::PatternError),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

//! # Configuration
//!
//! This module holds the options that control a combine run and the
//! optional YAML project file that can supply them.
//!
//! ## Key Components
//!
//! - **`CombineOptions`**: charset, verbose, separator and eliminate-unused
//!   switches passed to the pipeline.
//! - **`ProjectConfig`**: the parsed `.combiner.yaml` file, which lists the
//!   entry files (glob patterns allowed), an optional output path and
//!   defaults for the options.
//!
//! ## Project File Format
//!
//! ```yaml
//! inputs:
//!   - src/main.js
//!   - src/plugins/*.js
//! output: dist/all.js
//! charset: utf-8
//! separator: true
//! eliminate_unused: false
//! ```
//!
//! Relative paths are resolved against the directory holding the file.
//! Unknown keys are rejected.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::charset::Charset;
use crate::error::{Error, Result};

/// Default file name of the project file.
pub const DEFAULT_CONFIG_FILE: &str = ".combiner.yaml";

/// Options for a single combine run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CombineOptions {
    /// Charset used to decode inputs and encode the output.
    pub charset: Charset,
    /// Log informational progress lines.
    pub verbose: bool,
    /// Emit a `/*------name------*/` marker before each file.
    pub separator: bool,
    /// Drop files that neither require nor are required by another file.
    pub eliminate_unused: bool,
}

/// Parsed project file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Entry files or glob patterns, in order.
    #[serde(default)]
    pub inputs: Vec<String>,
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub charset: Option<Charset>,
    #[serde(default)]
    pub separator: Option<bool>,
    #[serde(default)]
    pub eliminate_unused: Option<bool>,
    /// Directory relative paths are resolved against.
    #[serde(skip)]
    pub base_dir: PathBuf,
}

/// Parse a project file from YAML text.
///
/// Relative paths are resolved against the current directory; use
/// [`from_file`] to resolve against the file's location.
pub fn parse(yaml: &str) -> Result<ProjectConfig> {
    if yaml.trim().is_empty() {
        return Ok(ProjectConfig::default());
    }
    serde_yaml::from_str(yaml).map_err(|e| {
        let message = e.to_string();
        let hint = if message.contains("unknown field") {
            Some(
                "Valid keys are: inputs, output, charset, separator, eliminate_unused".to_string(),
            )
        } else if message.contains("charset") {
            Some("Supported charsets: utf-8, iso-8859-1, us-ascii".to_string())
        } else {
            None
        };
        Error::ConfigParse { message, hint }
    })
}

/// Read and parse a project file.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<ProjectConfig> {
    let path = path.as_ref();
    let yaml = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mut config = parse(&yaml)?;
    config.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
    Ok(config)
}

impl ProjectConfig {
    /// Expand `inputs` into entry paths.
    ///
    /// Glob patterns expand in the order the `glob` crate yields them
    /// (sorted); a pattern matching nothing is kept literally so that the
    /// run reports it as a skipped entry.
    pub fn resolve_inputs(&self) -> Result<Vec<PathBuf>> {
        let mut resolved = Vec::new();
        for input in &self.inputs {
            let path = self.base_dir.join(input);
            if !is_glob(input) {
                resolved.push(path);
                continue;
            }

            let pattern = path.to_string_lossy();
            let mut matched = false;
            for entry in glob::glob(&pattern)? {
                let entry = entry.map_err(|e| Error::Io(e.into()))?;
                if entry.is_file() {
                    resolved.push(entry);
                    matched = true;
                }
            }
            if !matched {
                resolved.push(path);
            }
        }
        Ok(resolved)
    }

    /// Output path resolved against the file's directory.
    pub fn resolved_output(&self) -> Option<PathBuf> {
        self.output.as_ref().map(|output| self.base_dir.join(output))
    }

    /// Fill `options` from this file. Switches already enabled stay enabled.
    pub fn apply_to(&self, options: &mut CombineOptions) {
        if let Some(charset) = self.charset {
            options.charset = charset;
        }
        options.separator |= self.separator.unwrap_or(false);
        options.eliminate_unused |= self.eliminate_unused.unwrap_or(false);
    }
}

fn is_glob(input: &str) -> bool {
    input.contains(['*', '?', '['])
}

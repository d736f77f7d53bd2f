//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the
//! `file-combiner` command-line tool, one file per command.
//!
//! ## Structure
//!
//! Each command module contains:
//! - An `Args` struct that defines the command-specific arguments, derived
//!   using `clap`.
//! - An `execute` function that takes the parsed `Args` and calls into the
//!   `file_combiner` library.
//!
//! The input-related arguments shared by `combine`, `order` and `tree` live
//! in [`InputArgs`] here, together with the logic that merges them with an
//! optional project file.

pub mod combine;
pub mod completions;
pub mod order;
pub mod tree;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use log::debug;

use file_combiner::config::{self, CombineOptions, ProjectConfig, DEFAULT_CONFIG_FILE};
use file_combiner::{suggestions, Charset};

/// Input selection and options shared by several commands.
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Entry files; their /*requires */ dependencies are discovered automatically
    #[arg(value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// Path to a project file listing inputs and options
    ///
    /// Without entry files on the command line, `.combiner.yaml` in the
    /// current directory is used when present.
    #[arg(short, long, value_name = "PATH", env = "FILE_COMBINER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Charset used to read the inputs and write the output
    #[arg(long, value_name = "NAME")]
    pub charset: Option<String>,

    /// Drop files that neither require nor are required by another file
    #[arg(short, long)]
    pub eliminate_unused: bool,

    /// Show detailed progress information on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// Inputs and options after merging the command line with a project file.
#[derive(Debug)]
pub struct ResolvedInputs {
    pub files: Vec<PathBuf>,
    pub options: CombineOptions,
    /// Output path from the project file, if any.
    pub output: Option<PathBuf>,
}

impl InputArgs {
    /// Merge command-line arguments with the project file.
    ///
    /// Entry files on the command line replace the project file's inputs;
    /// an explicit `--charset` replaces its charset.
    pub fn resolve(&self) -> Result<ResolvedInputs> {
        let project = self.load_project()?;

        let mut options = CombineOptions {
            verbose: self.verbose,
            eliminate_unused: self.eliminate_unused,
            ..Default::default()
        };
        let mut output = None;
        let mut files = self.files.clone();

        if let Some(project) = &project {
            project.apply_to(&mut options);
            output = project.resolved_output();
            if files.is_empty() {
                files = project.resolve_inputs()?;
            }
        }

        if let Some(name) = &self.charset {
            options.charset = name
                .parse::<Charset>()
                .map_err(suggestions::with_hint)?;
        }

        if files.is_empty() {
            return Err(suggestions::no_inputs());
        }
        if !files.iter().any(|file| file.is_file()) {
            return Err(suggestions::no_existing_inputs(files.len()));
        }

        Ok(ResolvedInputs {
            files,
            options,
            output,
        })
    }

    fn load_project(&self) -> Result<Option<ProjectConfig>> {
        if let Some(path) = &self.config {
            if !path.exists() {
                return Err(suggestions::config_not_found(path));
            }
            return Ok(Some(config::from_file(path)?));
        }

        let default = Path::new(DEFAULT_CONFIG_FILE);
        if self.files.is_empty() && default.is_file() {
            debug!("Using project file '{}'", default.display());
            return Ok(Some(config::from_file(default)?));
        }
        Ok(None)
    }
}

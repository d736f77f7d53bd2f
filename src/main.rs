//! # File Combiner CLI
//!
//! This is the binary entry point for the `file-combiner` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Setting up logging.
//! - Executing the appropriate command and reporting errors.
//!
//! The core logic lives in the `file_combiner` library crate; the binary is
//! a thin wrapper around it.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}

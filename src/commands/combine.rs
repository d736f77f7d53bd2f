//! Combine command implementation
//!
//! The combine command runs the full pipeline:
//! 1. Discovery of entry files and everything they require
//! 2. Dependency graph construction with cycle detection
//! 3. Ordering
//! 4. Writing to the output file or stdout
//!
//! The output file is only created once ordering has succeeded, so a fatal
//! error never leaves a partial or truncated output behind.

use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use log::info;

use file_combiner::{suggestions, Combiner};

use super::InputArgs;

/// Arguments for the combine command
#[derive(Args, Debug)]
pub struct CombineArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Insert a /*------name------*/ marker before each file
    #[arg(short, long)]
    pub separator: bool,
}

/// Execute the combine command
pub fn execute(args: CombineArgs) -> Result<()> {
    let resolved = args.input.resolve()?;
    let mut options = resolved.options;
    options.separator |= args.separator;
    let output = args.output.or(resolved.output);

    let plan = Combiner::new(options)
        .plan_paths(&resolved.files)
        .map_err(suggestions::with_hint)?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create directory '{}'", parent.display())
                })?;
            }
            let file = File::create(&path)
                .with_context(|| format!("Failed to create output '{}'", path.display()))?;
            let mut writer = BufWriter::new(file);
            plan.write_to(&mut writer)?;
            info!("Wrote {} file(s) to '{}'", plan.len(), path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            plan.write_to(&mut lock)?;
        }
    }

    Ok(())
}

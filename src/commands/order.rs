//! # Order Command Implementation
//!
//! Prints the order in which `combine` would emit files, without writing
//! any output. Useful for checking what a build will contain.
//!
//! ## Output Formats
//!
//! - **Text** (default): one path per line.
//! - **JSON** (`--json`): an array of `{ "path", "dependencies" }` objects.

use std::io::{self, Write};

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use file_combiner::{suggestions, CombinePlan, Combiner};

use super::InputArgs;

/// Print the resolved combine order
#[derive(Args, Debug)]
pub struct OrderArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Print the order as JSON
    #[arg(long)]
    pub json: bool,
}

/// One emitted file in JSON output.
#[derive(Debug, Serialize)]
struct OrderEntry {
    path: String,
    dependencies: Vec<String>,
}

/// Execute the `order` command.
pub fn execute(args: OrderArgs) -> Result<()> {
    let resolved = args.input.resolve()?;
    let plan = Combiner::new(resolved.options)
        .plan_paths(&resolved.files)
        .map_err(suggestions::with_hint)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    render(&plan, args.json, &mut out)
}

fn render<W: Write>(plan: &CombinePlan, json: bool, out: &mut W) -> Result<()> {
    if json {
        let entries = order_entries(plan);
        serde_json::to_writer_pretty(&mut *out, &entries)?;
        writeln!(out)?;
    } else {
        for file in plan.files() {
            writeln!(out, "{}", file.path().display())?;
        }
    }
    Ok(())
}

fn order_entries(plan: &CombinePlan) -> Vec<OrderEntry> {
    let registry = plan.registry();
    plan.files()
        .map(|file| OrderEntry {
            path: file.path().display().to_string(),
            dependencies: file
                .dependencies()
                .iter()
                .map(|&id| registry.file(id).path().display().to_string())
                .collect(),
        })
        .collect()
}

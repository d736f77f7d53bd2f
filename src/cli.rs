//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// File Combiner - Concatenate source files in /*requires */ dependency order
#[derive(Parser, Debug)]
#[command(name = "file-combiner")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Combine entry files and their dependencies into one output
    Combine(commands::combine::CombineArgs),

    /// Print the order in which files would be combined
    Order(commands::order::OrderArgs),

    /// Display the declared dependency tree of each entry file
    Tree(commands::tree::TreeArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        let verbose = match &self.command {
            Commands::Combine(args) => args.input.verbose,
            Commands::Order(args) => args.input.verbose,
            Commands::Tree(args) => args.input.verbose,
            Commands::Completions(_) => false,
        };
        init_logging(&self.log_level, verbose);

        match self.command {
            Commands::Combine(args) => commands::combine::execute(args),
            Commands::Order(args) => commands::order::execute(args),
            Commands::Tree(args) => commands::tree::execute(args),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}

/// Route `log` output to stderr. `--verbose` raises the level to at least
/// `info`; `RUST_LOG` wins when set.
fn init_logging(level: &str, verbose: bool) {
    let level = match level.to_ascii_lowercase().as_str() {
        "debug" | "trace" => level.to_ascii_lowercase(),
        _ if verbose => "info".to_string(),
        other => other.to_string(),
    };

    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .format_target(false)
        .try_init();
}

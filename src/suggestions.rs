//! # Error Suggestions
//!
//! Helpers that turn failures into messages telling the user what went
//! wrong and how to fix it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use file_combiner::suggestions;
//!
//! let plan = combiner.plan_paths(&inputs).map_err(suggestions::with_hint)?;
//! ```

use std::path::Path;

use crate::error::Error;

/// Generate an error for when the project file is not found.
pub fn config_not_found(path: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "Configuration file not found: {path}\n\n\
         hint: Create a .combiner.yaml file listing your inputs\n\
         hint: Use -c/--config to specify a different path\n\
         hint: Set FILE_COMBINER_CONFIG environment variable",
        path = path.display()
    )
}

/// Generate an error for when no entry files were given.
pub fn no_inputs() -> anyhow::Error {
    anyhow::anyhow!(
        "No input files given\n\n\
         hint: Pass entry files as arguments, e.g. 'file-combiner combine src/main.js'\n\
         hint: Or list them under 'inputs:' in a .combiner.yaml file"
    )
}

/// Generate an error for when none of the given entry files exist.
pub fn no_existing_inputs(count: usize) -> anyhow::Error {
    anyhow::anyhow!(
        "None of the {count} input file(s) could be found\n\n\
         hint: Paths are resolved against the current directory\n\
         hint: Run with --verbose to see which files were skipped"
    )
}

/// Hint for a library error, if one applies.
pub fn hint_for(error: &Error) -> Option<&'static str> {
    match error {
        Error::MissingDependency { .. } => Some(
            "hint: Paths in /*requires */ are resolved against the directory of the file that declares them",
        ),
        Error::MalformedDirective { .. } => {
            Some("hint: Close the directive with */, e.g. /*requires util.js */")
        }
        Error::CycleDetected { .. } => {
            Some("hint: Remove one of the /*requires */ directives along the cycle")
        }
        Error::UnsupportedCharset { .. } => {
            Some("hint: Supported charsets: utf-8, iso-8859-1, us-ascii")
        }
        _ => None,
    }
}

/// Convert a library error into an `anyhow::Error` carrying its hint.
pub fn with_hint(error: Error) -> anyhow::Error {
    match hint_for(&error) {
        Some(hint) => anyhow::anyhow!("{error}\n\n{hint}"),
        None => anyhow::Error::new(error),
    }
}

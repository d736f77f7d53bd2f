//! Phase 4: Writing the Output
//!
//! Concatenates the ordered file contents into the output sink, optionally
//! preceded per file by a separator marker of the form
//! `\n/*------name------*/\n`. Contents are written unchanged apart from
//! charset encoding.
//!
//! A write failure aborts the phase; whatever already reached the sink
//! stays there.

use std::io::Write;

use log::info;

use crate::config::CombineOptions;
use crate::error::{Error, Result};
use crate::source::SourceFile;

/// Separator marker emitted before a file named `name`.
pub fn separator_line(name: &str) -> String {
    format!("\n/*------{}------*/\n", name)
}

/// Execute Phase 4: write `files` to `sink` in order.
pub fn execute<'a, W, I>(sink: &mut W, files: I, options: &CombineOptions) -> Result<()>
where
    W: Write + ?Sized,
    I: IntoIterator<Item = &'a SourceFile>,
{
    for file in files {
        let name = file.name();
        if options.verbose {
            info!("Adding '{}' to output.", name);
        }

        if options.separator {
            write_text(sink, &separator_line(&name), options)?;
        }
        write_text(sink, file.contents().unwrap_or_default(), options)?;
    }

    sink.flush().map_err(|source| Error::Write { source })
}

fn write_text<W: Write + ?Sized>(sink: &mut W, text: &str, options: &CombineOptions) -> Result<()> {
    sink.write_all(&options.charset.encode(text))
        .map_err(|source| Error::Write { source })
}

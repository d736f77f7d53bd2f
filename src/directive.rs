//! # Directive Parser
//!
//! Extracts `/*requires <path> */` directives from a file's text. Each
//! directive is removed from the text and its trimmed body is recorded as a
//! dependency reference, in the order the directives appear. Everything
//! else, ordinary `/* ... */` comments included, is kept byte for byte.
//!
//! A directive starts at a `/` that is not immediately preceded by `*`, so
//! the `/` that closes a block comment never opens one. The body runs to the
//! first `*/`; a body with no terminator is a fatal error.
//!
//! ```
//! use std::path::Path;
//! use file_combiner::directive;
//!
//! let parsed = directive::parse(Path::new("main.js"), "/*requires util.js */alert(1);").unwrap();
//! assert_eq!(parsed.contents, "alert(1);");
//! assert_eq!(parsed.requires, vec!["util.js".to_string()]);
//! ```

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Text that opens a dependency directive.
pub const MARKER: &str = "/*requires";

const TERMINATOR: &str = "*/";

/// The result of scanning one file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedSource {
    /// The file text with every directive removed.
    pub contents: String,
    /// Dependency references in declaration order, as written (trimmed).
    pub requires: Vec<String>,
}

/// Scan `text` for directives.
///
/// `file` is only used to label a [`Error::MalformedDirective`].
pub fn parse(file: &Path, text: &str) -> Result<ParsedSource> {
    let mut contents = String::with_capacity(text.len());
    let mut requires = Vec::new();
    // Start of the text not yet copied into `contents`.
    let mut copied = 0;
    let mut search = 0;

    while let Some(offset) = text[search..].find(MARKER) {
        let start = search + offset;

        // `*/*requires` is the end of a comment followed by text, not a directive.
        if text[..start].ends_with('*') {
            search = start + 1;
            continue;
        }

        let body_start = start + MARKER.len();
        let body_len = text[body_start..]
            .find(TERMINATOR)
            .ok_or_else(|| Error::MalformedDirective {
                file: file.to_path_buf(),
                directive: text[start..].lines().next().unwrap_or(MARKER).to_string(),
            })?;

        contents.push_str(&text[copied..start]);
        requires.push(text[body_start..body_start + body_len].trim().to_string());

        copied = body_start + body_len + TERMINATOR.len();
        search = copied;
    }

    contents.push_str(&text[copied..]);
    Ok(ParsedSource { contents, requires })
}

/// Resolve a dependency reference against the declaring file's directory.
///
/// References starting with a path separator are used unchanged.
pub fn resolve_reference(directory: &Path, reference: &str) -> PathBuf {
    if reference.starts_with(['/', '\\']) || Path::new(reference).is_absolute() {
        PathBuf::from(reference)
    } else {
        directory.join(reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(text: &str) -> ParsedSource {
        parse(Path::new("test.js"), text).unwrap()
    }

    #[test]
    fn test_single_directive_removed() {
        let parsed = parse_ok("/*requires util.js */alert(1);");
        assert_eq!(parsed.contents, "alert(1);");
        assert_eq!(parsed.requires, vec!["util.js"]);
    }

    #[test]
    fn test_directives_in_declaration_order() {
        let parsed = parse_ok("/*requires b.js */\n/*requires a.js*/\nbody();\n/*requires c.js */");
        assert_eq!(parsed.requires, vec!["b.js", "a.js", "c.js"]);
        assert_eq!(parsed.contents, "\n\nbody();\n");
    }

    #[test]
    fn test_body_is_trimmed() {
        let parsed = parse_ok("/*requires   \t lib/dom.js \n */x");
        assert_eq!(parsed.requires, vec!["lib/dom.js"]);
        assert_eq!(parsed.contents, "x");
    }

    #[test]
    fn test_ordinary_comments_preserved() {
        let text = "/* header */\nvar a = 1; /*require x */ /*requirements*/ // line\n";
        let parsed = parse_ok(text);
        assert!(parsed.requires.is_empty());
        assert_eq!(parsed.contents, text);
    }

    #[test]
    fn test_short_lookahead_at_end_of_text() {
        let parsed = parse_ok("a / b /*req");
        assert!(parsed.requires.is_empty());
        assert_eq!(parsed.contents, "a / b /*req");
    }

    #[test]
    fn test_slash_after_star_does_not_open_directive() {
        let text = "/* note **/*requires x.js */";
        let parsed = parse_ok(text);
        assert!(parsed.requires.is_empty());
        assert_eq!(parsed.contents, text);
    }

    #[test]
    fn test_directive_after_false_positive_is_found() {
        let parsed = parse_ok("//*requires a.js */");
        assert_eq!(parsed.requires, vec!["a.js"]);
        assert_eq!(parsed.contents, "/");
    }

    #[test]
    fn test_directive_inside_text_anywhere() {
        let parsed = parse_ok("body { }\n.x { color: red; }\n/*requires reset.css */\n");
        assert_eq!(parsed.requires, vec!["reset.css"]);
        assert_eq!(parsed.contents, "body { }\n.x { color: red; }\n\n");
    }

    #[test]
    fn test_unicode_text_preserved() {
        let parsed = parse_ok("é/*requires ü.js */ß");
        assert_eq!(parsed.requires, vec!["ü.js"]);
        assert_eq!(parsed.contents, "éß");
    }

    #[test]
    fn test_unterminated_directive_is_malformed() {
        let err = parse(Path::new("bad.js"), "x();\n/*requires util.js\nmore();").unwrap_err();
        match err {
            Error::MalformedDirective { file, directive } => {
                assert_eq!(file, PathBuf::from("bad.js"));
                assert_eq!(directive, "/*requires util.js");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_resolve_relative_reference() {
        let resolved = resolve_reference(Path::new("/project/src"), "lib/a.js");
        assert_eq!(resolved, PathBuf::from("/project/src/lib/a.js"));
    }

    #[test]
    fn test_resolve_absolute_reference() {
        let resolved = resolve_reference(Path::new("/project/src"), "/shared/a.js");
        assert_eq!(resolved, PathBuf::from("/shared/a.js"));
    }

    #[test]
    fn test_resolve_dot_relative_reference() {
        let resolved = resolve_reference(Path::new("/project/src"), "../b.js");
        assert_eq!(resolved, PathBuf::from("/project/src/../b.js"));
    }
}

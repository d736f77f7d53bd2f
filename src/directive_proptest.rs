//! Property-based tests for the directive parser.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::directive::{parse, MARKER};
    use proptest::prelude::*;
    use std::path::Path;

    // ============================================================================
    // text without directives
    // ============================================================================

    proptest! {
        /// Property: text that never contains the marker passes through unchanged
        #[test]
        fn text_without_marker_is_unchanged(input in ".*") {
            prop_assume!(!input.contains(MARKER));
            let parsed = parse(Path::new("p.js"), &input).unwrap();
            prop_assert_eq!(parsed.contents, input);
            prop_assert!(parsed.requires.is_empty());
        }

        /// Property: ordinary block comments are preserved byte for byte
        #[test]
        fn ordinary_comments_preserved(code in "[a-z ;]{0,20}", comment in "[a-z ]{0,20}") {
            let input = format!("{code}/* {comment} */{code}");
            let parsed = parse(Path::new("p.js"), &input).unwrap();
            prop_assert_eq!(parsed.contents, input);
        }

        /// Property: parsing is deterministic
        #[test]
        fn parse_is_deterministic(input in ".*") {
            let first = parse(Path::new("p.js"), &input);
            let second = parse(Path::new("p.js"), &input);
            match (first, second) {
                (Ok(a), Ok(b)) => prop_assert_eq!(a, b),
                (Err(_), Err(_)) => {}
                _ => prop_assert!(false, "parse results differ for '{}'", input),
            }
        }
    }

    // ============================================================================
    // inserted directives
    // ============================================================================

    proptest! {
        /// Property: inserting directives into plain text removes exactly
        /// those directives and yields their trimmed references in order
        #[test]
        fn inserted_directives_are_extracted(
            pieces in prop::collection::vec("[a-z;(){} \n]{0,12}", 1..6),
            refs in prop::collection::vec("[a-z]{1,8}\\.js", 0..5),
        ) {
            let mut input = String::new();
            let mut expected_contents = String::new();
            for (i, piece) in pieces.iter().enumerate() {
                input.push_str(piece);
                expected_contents.push_str(piece);
                if let Some(reference) = refs.get(i) {
                    input.push_str(&format!("/*requires  {reference} */"));
                }
            }
            let expected_refs: Vec<String> = refs.iter().take(pieces.len()).cloned().collect();

            let parsed = parse(Path::new("p.js"), &input).unwrap();
            prop_assert_eq!(parsed.contents, expected_contents);
            prop_assert_eq!(parsed.requires, expected_refs);
        }

        /// Property: a marker without terminator is always rejected
        #[test]
        fn unterminated_marker_rejected(prefix in "[a-z ]{0,10}", body in "[a-z. ]{0,10}") {
            let input = format!("{prefix}/*requires{body}");
            prop_assert!(parse(Path::new("p.js"), &input).is_err());
        }
    }
}

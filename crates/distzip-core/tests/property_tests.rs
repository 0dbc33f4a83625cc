//! Property-based tests for pattern-list parsing and pattern compilation.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use distzip_core::DistzipError;
use distzip_core::ExcludeMatcher;
use distzip_core::Pattern;
use distzip_core::PatternList;
use proptest::prelude::*;

proptest! {
    /// Parsed patterns are never blank, never comments and never padded.
    #[test]
    fn prop_parsed_lines_are_clean(
        lines in prop::collection::vec("[ \t#a-z*/.:!]{0,12}", 0..20)
    ) {
        let text = lines.join("\n");
        match PatternList::parse(&text) {
            Ok(list) => {
                prop_assert!(!list.is_empty());
                for pattern in &list {
                    prop_assert!(!pattern.is_empty());
                    prop_assert!(!pattern.starts_with('#'));
                    prop_assert_eq!(pattern.trim(), pattern.as_str());
                }
            }
            Err(err) => prop_assert!(matches!(err, DistzipError::EmptyConfig)),
        }
    }

    /// Parsing keeps every real pattern line, in order.
    #[test]
    fn prop_parse_preserves_order(
        patterns in prop::collection::vec("[a-z]{1,8}(/[a-z*]{1,8}){0,3}", 1..10)
    ) {
        let text = patterns
            .iter()
            .flat_map(|p| ["# comment".to_string(), String::new(), format!("  {p}  ")])
            .collect::<Vec<_>>()
            .join("\n");
        let list = PatternList::parse(&text).expect("non-empty list");
        prop_assert_eq!(list.as_slice(), patterns.as_slice());
    }

    /// Without wildcards the exclude filter is a plain substring test.
    #[test]
    fn prop_exclude_literal_is_substring(
        filter in "[a-z.()+\\[\\]^$]{1,6}",
        name in "[a-z.()+\\[\\]^$]{0,12}"
    ) {
        let matcher = ExcludeMatcher::new(&filter).expect("literal filter compiles");
        prop_assert_eq!(matcher.is_match(&name), name.contains(&filter));
    }

    /// `*X*` drops exactly the names containing X.
    #[test]
    fn prop_exclude_surrounding_stars(
        needle in "[a-z0-9]{1,4}",
        name in "[a-z0-9.]{0,12}"
    ) {
        let matcher = ExcludeMatcher::new(&format!("*{needle}*")).expect("filter compiles");
        prop_assert_eq!(matcher.is_match(&name), name.contains(&needle));
    }

    /// Parent-directory segments are always rejected.
    #[test]
    fn prop_parent_segments_rejected(
        prefix in "([a-z]+/){0,3}",
        suffix in "[a-z*]{1,6}"
    ) {
        let result = Pattern::parse(&format!("{prefix}../{suffix}"));
        let rejected = matches!(result, Err(DistzipError::InvalidPattern { .. }));
        prop_assert!(rejected);
    }

    /// Only the first `:!` separates include from exclude.
    #[test]
    fn prop_split_on_first_separator(
        include in "[a-z]{1,6}/\\*",
        exclude in "[a-z*]{0,6}(:![a-z]{1,4})?"
    ) {
        let pattern = Pattern::parse(&format!("{include}:!{exclude}")).expect("pattern compiles");
        prop_assert_eq!(pattern.include().as_str(), include.as_str());
        prop_assert_eq!(pattern.exclude().map(ExcludeMatcher::as_str), Some(exclude.as_str()));
    }
}

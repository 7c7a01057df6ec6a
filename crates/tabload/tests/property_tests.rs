//! Property-based tests for parsing, naming and schema compilation.
//!
//! # Running Property Tests
//!
//! ```bash
//! cargo test -p tabload --test property_tests
//!
//! # More cases
//! PROPTEST_CASES=10000 cargo test -p tabload --test property_tests
//! ```

use proptest::prelude::*;

use tabload::naming::DEFAULT_TABLE_NAME;
use tabload::results::{NO_ROWS_RETURNED, StatementOutcome, normalize_statement};
use tabload::{RawStatementResult, Value, compile, derive_name, parse_delimited, sanitize};

// =============================================================================
// Test Strategies
// =============================================================================

/// Cell text without delimiters or line breaks.
fn cell() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 _.'\"-]{0,12}"
}

/// Delimited text made of up to 20 lines of up to 8 cells each.
fn delimited_text(delimiter: &'static str) -> impl Strategy<Value = String> {
    prop::collection::vec(prop::collection::vec(cell(), 0..8), 0..20)
        .prop_map(move |lines| {
            lines
                .iter()
                .map(|cells| cells.join(delimiter))
                .collect::<Vec<_>>()
                .join("\n")
        })
}

fn delimiter() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just(","), Just("\t"), Just(";"), Just("||")]
}

// =============================================================================
// Parser Properties
// =============================================================================

proptest! {
    #[test]
    fn parser_rows_match_header_width(
        (delim, text) in delimiter().prop_flat_map(|d| (Just(d), delimited_text(d)))
    ) {
        let table = parse_delimited(Some(text.as_str()), delim, &[] as &[&str]);
        for row in &table.rows {
            prop_assert_eq!(row.len(), table.headers.len());
        }
    }

    #[test]
    fn parser_never_panics(text in "\\PC{0,200}", delim in "\\PC{0,3}") {
        let _ = parse_delimited(Some(text.as_str()), &delim, &[] as &[&str]);
    }

    #[test]
    fn parser_row_count_follows_lines(text in delimited_text(",")) {
        let table = parse_delimited(Some(text.as_str()), ",", &[] as &[&str]);
        let trimmed = text.trim();
        if trimmed.is_empty() {
            prop_assert!(table.headers.is_empty());
            prop_assert!(table.rows.is_empty());
        } else {
            prop_assert_eq!(table.rows.len(), trimmed.split('\n').count() - 1);
        }
    }

    #[test]
    fn parser_excluded_columns_never_appear(
        text in delimited_text(","),
        excluded in prop::collection::vec(cell(), 0..3)
    ) {
        let table = parse_delimited(Some(text.as_str()), ",", &excluded);
        for header in &table.headers {
            prop_assert!(!excluded.contains(header));
        }
    }
}

// =============================================================================
// Naming Properties
// =============================================================================

proptest! {
    #[test]
    fn sanitize_is_idempotent(candidate in "\\PC{0,40}") {
        let once = sanitize(&candidate);
        prop_assert_eq!(sanitize(&once), once);
    }

    #[test]
    fn sanitize_output_is_a_valid_identifier(candidate in "\\PC{0,40}") {
        let name = sanitize(&candidate);
        prop_assert!(!name.is_empty());
        prop_assert!(name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
        prop_assert!(!name.starts_with(|c: char| c.is_ascii_digit()));
    }

    #[test]
    fn custom_name_wins(url in "\\PC{0,40}", custom in "[a-zA-Z0-9 ._-]{0,20}[a-zA-Z0-9][a-zA-Z0-9 ._-]{0,20}") {
        prop_assert_eq!(derive_name(&url, Some(custom.as_str())), sanitize(custom.trim()));
    }

    #[test]
    fn blank_custom_name_falls_back_to_url(url in "https://[a-z]{1,8}/[a-z]{1,8}\\.csv", blank in " {0,4}") {
        prop_assert_eq!(derive_name(&url, Some(blank.as_str())), derive_name(&url, None));
        prop_assert_ne!(derive_name(&url, None), DEFAULT_TABLE_NAME);
    }
}

// =============================================================================
// Schema and Result Properties
// =============================================================================

proptest! {
    #[test]
    fn compile_without_overrides_is_all_text(headers in prop::collection::vec(cell(), 0..10)) {
        let compiled = compile("t", &headers, None);
        prop_assert!(compiled.warnings.is_empty());
        prop_assert_eq!(compiled.schema.columns.len(), headers.len());
        for (column, header) in compiled.schema.columns.iter().zip(&headers) {
            prop_assert_eq!(&column.name, header);
            prop_assert_eq!(column.sql_type.as_str(), "TEXT");
        }
    }

    #[test]
    fn well_formed_results_become_rows(columns in prop::collection::vec("[a-z]{1,6}", 1..5), rows in 0usize..5) {
        let width = columns.len();
        let data: Vec<Vec<Value>> = (0..rows)
            .map(|r| (0..width).map(|c| Value::Integer((r * width + c) as i64)).collect::<Vec<_>>())
            .collect();
        let outcome = normalize_statement(Some(&RawStatementResult::new(columns, data)));

        match outcome {
            StatementOutcome::Rows(objects) => prop_assert_eq!(objects.len(), rows),
            StatementOutcome::Message { message } => {
                prop_assert_eq!(rows, 0);
                prop_assert_eq!(message, NO_ROWS_RETURNED);
            }
        }
    }
}

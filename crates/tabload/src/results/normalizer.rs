//! Normalizes raw statement results into display-friendly shapes.
//!
//! A SQL engine answers a batch of statements with a mix of result sets,
//! empty sets and bare acknowledgements. The normalizer folds those into
//! row objects or a single informational message.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::raw::{RawStatementResult, Value};

/// Message for a statement that produced no result set, or an unusable one.
pub const NO_STRUCTURED_DATA: &str = "Query executed, but returned no structured data.";

/// Message for a result set with columns but zero rows.
pub const NO_ROWS_RETURNED: &str = "Query executed successfully, no rows returned.";

/// One result row keyed by column name, in column order.
pub type RowObject = IndexMap<String, Value>;

/// What one statement produced once normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatementOutcome {
    Rows(Vec<RowObject>),
    Message { message: String },
}

impl StatementOutcome {
    fn message(text: &str) -> Self {
        StatementOutcome::Message {
            message: text.to_string(),
        }
    }

    /// Whether this outcome carries row data.
    pub fn is_rows(&self) -> bool {
        matches!(self, StatementOutcome::Rows(_))
    }
}

/// Canonical display shape of a whole query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NormalizedResult {
    /// Row objects of a single statement. Empty means nothing to show.
    Rows(Vec<RowObject>),
    /// An informational message instead of data.
    Message { message: String },
    /// One entry per statement, for batches where every statement returned rows.
    Multiple(Vec<StatementOutcome>),
}

impl NormalizedResult {
    /// Returns the message text, if this result is a message.
    pub fn as_message(&self) -> Option<&str> {
        match self {
            NormalizedResult::Message { message } => Some(message.as_str()),
            _ => None,
        }
    }

    /// Returns the rows, if this result is a single row list.
    pub fn as_rows(&self) -> Option<&[RowObject]> {
        match self {
            NormalizedResult::Rows(rows) => Some(rows.as_slice()),
            _ => None,
        }
    }
}

impl From<StatementOutcome> for NormalizedResult {
    fn from(outcome: StatementOutcome) -> Self {
        match outcome {
            StatementOutcome::Rows(rows) => NormalizedResult::Rows(rows),
            StatementOutcome::Message { message } => NormalizedResult::Message { message },
        }
    }
}

/// Normalize the results of one executed query.
///
/// - no results: an empty row list
/// - one statement: its rows, or a message when it returned none
/// - several statements that all returned rows: one row list per statement
/// - several statements otherwise: the first statement's outcome only
///
/// The last rule drops information when messages and data are mixed; use
/// [`normalize_each`] to keep every statement's outcome.
pub fn normalize(results: &[Option<RawStatementResult>]) -> NormalizedResult {
    let mut outcomes = normalize_each(results);

    if outcomes.len() > 1 && outcomes.iter().all(StatementOutcome::is_rows) {
        return NormalizedResult::Multiple(outcomes);
    }

    if outcomes.is_empty() {
        return NormalizedResult::Rows(Vec::new());
    }
    outcomes.swap_remove(0).into()
}

/// Normalize every statement result independently, in order.
pub fn normalize_each(results: &[Option<RawStatementResult>]) -> Vec<StatementOutcome> {
    results.iter().map(|r| normalize_statement(r.as_ref())).collect()
}

/// Normalize a single statement result.
pub fn normalize_statement(result: Option<&RawStatementResult>) -> StatementOutcome {
    let Some(result) = result else {
        return StatementOutcome::message(NO_STRUCTURED_DATA);
    };
    if !result.is_well_formed() {
        return StatementOutcome::message(NO_STRUCTURED_DATA);
    }
    if result.rows.is_empty() {
        return StatementOutcome::message(NO_ROWS_RETURNED);
    }

    let rows = result
        .rows
        .iter()
        .map(|row| {
            result
                .columns
                .iter()
                .cloned()
                .zip(row.iter().cloned())
                .collect::<RowObject>()
        })
        .collect();
    StatementOutcome::Rows(rows)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn data(columns: &[&str], rows: Vec<Vec<Value>>) -> Option<RawStatementResult> {
        Some(RawStatementResult::new(
            columns.iter().map(|c| c.to_string()).collect(),
            rows,
        ))
    }

    fn ack() -> Option<RawStatementResult> {
        None
    }

    #[test]
    fn test_empty_input_is_empty_rows() {
        assert_eq!(normalize(&[]), NormalizedResult::Rows(vec![]));
    }

    #[test]
    fn test_single_absent_result() {
        assert_eq!(normalize(&[ack()]).as_message(), Some(NO_STRUCTURED_DATA));
    }

    #[test]
    fn test_single_empty_result_set() {
        let result = normalize(&[data(&["id"], vec![])]);
        assert_eq!(result.as_message(), Some(NO_ROWS_RETURNED));
        assert!(NO_ROWS_RETURNED.contains("executed successfully, no rows returned."));
    }

    #[test]
    fn test_single_result_set_rows() {
        let result = normalize(&[data(
            &["id", "name"],
            vec![vec![Value::Integer(1), Value::from("Alice")]],
        )]);

        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!([{ "id": 1, "name": "Alice" }])
        );
        let rows = result.as_rows().unwrap();
        assert_eq!(rows[0].keys().collect::<Vec<_>>(), vec!["id", "name"]);
    }

    #[test]
    fn test_ambiguous_result_degrades_to_message() {
        let ragged = data(&["a", "b"], vec![vec![Value::Integer(1)]]);
        assert_eq!(normalize(&[ragged]).as_message(), Some(NO_STRUCTURED_DATA));

        let headless = data(&[], vec![vec![Value::Integer(1)]]);
        assert_eq!(normalize(&[headless]).as_message(), Some(NO_STRUCTURED_DATA));
    }

    #[test]
    fn test_all_messages_returns_first() {
        let result = normalize(&[ack(), data(&["id"], vec![]), ack()]);
        assert_eq!(result.as_message(), Some(NO_STRUCTURED_DATA));

        let result = normalize(&[data(&["id"], vec![]), ack()]);
        assert_eq!(result.as_message(), Some(NO_ROWS_RETURNED));
    }

    #[test]
    fn test_mixed_returns_first_outcome() {
        let rows = data(&["n"], vec![vec![Value::Integer(7)]]);

        let result = normalize(&[ack(), rows.clone()]);
        assert_eq!(result.as_message(), Some(NO_STRUCTURED_DATA));

        let result = normalize(&[rows, ack()]);
        assert_eq!(serde_json::to_value(&result).unwrap(), json!([{ "n": 7 }]));
    }

    #[test]
    fn test_all_data_returns_list_of_lists() {
        let result = normalize(&[
            data(&["a"], vec![vec![Value::Integer(1)], vec![Value::Integer(2)]]),
            data(&["b"], vec![vec![Value::from("x")]]),
        ]);

        assert!(matches!(result, NormalizedResult::Multiple(ref sets) if sets.len() == 2));
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!([[{ "a": 1 }, { "a": 2 }], [{ "b": "x" }]])
        );
    }

    #[test]
    fn test_normalize_each_keeps_every_outcome() {
        let outcomes = normalize_each(&[
            ack(),
            data(&["id"], vec![]),
            data(&["id"], vec![vec![Value::Null]]),
        ]);

        assert_eq!(
            serde_json::to_value(&outcomes).unwrap(),
            json!([
                { "message": NO_STRUCTURED_DATA },
                { "message": NO_ROWS_RETURNED },
                [{ "id": null }]
            ])
        );
    }
}

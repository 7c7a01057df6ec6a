//! Raw statement results and their normalization for display.

mod normalizer;
mod raw;

pub use normalizer::{
    NO_ROWS_RETURNED, NO_STRUCTURED_DATA, NormalizedResult, RowObject, StatementOutcome,
    normalize, normalize_each, normalize_statement,
};
pub use raw::{RawStatementResult, Value};

//! Input parsing and data source handling.

mod parser;
mod source;

pub use parser::{Parser, ParserConfig, parse_delimited};
pub use source::{DataTable, SourceKind, SourceMetadata};

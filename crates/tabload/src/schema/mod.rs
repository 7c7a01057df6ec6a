//! Table schemas and the compiler that builds them from parsed headers.

mod compiler;
mod types;

pub use compiler::{CompiledSchema, OrphanOverride, compile};
pub use types::{ColumnDef, ColumnTypeOverride, DEFAULT_SQL_TYPE, TableSchema};

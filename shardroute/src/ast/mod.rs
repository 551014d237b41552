//! Parsed `INSERT` statement.
//!
//! Parsing happens upstream; the planner only reads these structures,
//! rewrites some of their literals into bind variables and prints them
//! back into SQL with [`generate_query`].

pub mod expr;
pub mod ident;
pub mod insert;

pub use expr::{Expr, UnaryOp};
pub use ident::{ColIdent, TableName};
pub use insert::{Insert, InsertRows, Row, UpdateExpr};

/// Print the statement as SQL.
pub fn generate_query(insert: &Insert) -> String {
    insert.to_string()
}

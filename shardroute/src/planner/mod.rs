//! `INSERT` planner.
//!
//! Planning runs per statement and keeps no state between calls. The
//! statement is rewritten in place: literals the executor routes on are
//! replaced with bind variables, and columns the routing schema needs
//! but the statement omits are added with `NULL` values.

pub mod auto_increment;
pub mod column;
pub mod error;
pub mod insert;
pub mod vindex;


pub use auto_increment::{build_auto_increment, seq_var_name};
pub use column::find_or_insert;
pub use error::{Error, ErrorKind};
pub use insert::build_insert_plan;
pub use vindex::{bind_var_name, build_vindex_value};

use crate::ast::Expr;
use crate::route::Value;

/// Convert the literal at `position` in `row` to a routing value.
fn convert(expr: &Expr, row: usize, position: usize) -> Result<Value, Error> {
    Value::try_from(expr).map_err(|source| Error::Conversion {
        value: expr.to_string(),
        row,
        position,
        source,
    })
}

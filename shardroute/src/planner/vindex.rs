//! Vindex value extraction.

use tracing::trace;

use super::{convert, Error};
use crate::ast::{Expr, Insert};
use crate::route::Value;
use crate::vschema::ColumnVindex;

/// Bind variable replacing a vindex column's literal, e.g. `_id0`.
///
/// Characters not allowed in a placeholder become `_`, so
/// `first name` binds as `_first_name0`.
pub fn bind_var_name(column_vindex: &ColumnVindex, row: usize) -> String {
    let column: String = column_vindex
        .column
        .lowered()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    format!("_{}{}", column, row)
}

/// Get the value `row` routes on for this vindex and replace the literal
/// in the statement with a bind variable.
pub fn build_vindex_value(
    insert: &mut Insert,
    column_vindex: &ColumnVindex,
    row: usize,
) -> Result<Value, Error> {
    let (tuple, position) = super::find_or_insert(insert, &column_vindex.column, row)?;
    let value = convert(&tuple[position], row, position)?;
    let name = bind_var_name(column_vindex, row);

    trace!(
        "vindex \"{}\" row {}: {} -> :{}",
        column_vindex.vindex.name,
        row,
        value,
        name
    );

    tuple[position] = Expr::BindArg(name);
    Ok(value)
}

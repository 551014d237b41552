//! Auto-increment columns backed by a sequence.

use tracing::trace;

use super::{convert, find_or_insert, Error};
use crate::ast::{Expr, Insert};
use crate::route::{Generate, Route, Value, SEQ_VAR_NAME};
use crate::vschema::AutoIncrement;

/// Bind variable holding the generated value for `row`.
pub fn seq_var_name(row: usize) -> String {
    format!("{}{}", SEQ_VAR_NAME, row)
}

/// Plan fetching the sequence value for `row`.
///
/// The value the client supplied becomes the row's default in the
/// [`Generate`] plan; the statement and, if the column is also a vindex
/// column, the row's vindex values refer to the generated value instead.
pub fn build_auto_increment(
    insert: &mut Insert,
    auto_increment: &AutoIncrement,
    route: &mut Route,
    values: &mut [Value],
    row: usize,
) -> Result<(), Error> {
    let generate = route
        .generate
        .get_or_insert_with(|| Generate::new(&auto_increment.sequence));

    if generate.values.len() != row {
        return Err(Error::Internal("sequence values out of row order"));
    }

    let name = seq_var_name(row);

    let default = match auto_increment.column_vindex {
        // Already extracted as a vindex value.
        Some(index) => {
            let value = values
                .get_mut(index)
                .ok_or(Error::Internal("auto-increment vindex out of range"))?;
            std::mem::replace(value, Value::Bind(name))
        }

        None => {
            let (tuple, position) = find_or_insert(insert, &auto_increment.column, row)?;
            let value = convert(&tuple[position], row, position)?;
            tuple[position] = Expr::BindArg(name);
            value
        }
    };

    trace!(
        "sequence \"{}\" row {}: default {}",
        auto_increment.sequence.name,
        row,
        default
    );

    generate.values.push(default);

    Ok(())
}

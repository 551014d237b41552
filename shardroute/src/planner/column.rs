//! Locate a column's value in a row.

use tracing::trace;

use super::Error;
use crate::ast::{ColIdent, Expr, Insert};

/// Find `column` in the statement and return the tuple for `row`
/// with the column's position in it.
///
/// If the statement doesn't list the column, it's appended to the
/// column list and every row gets a `NULL` for it, so all tuples stay
/// as long as the column list.
pub fn find_or_insert<'a>(
    insert: &'a mut Insert,
    column: &ColIdent,
    row: usize,
) -> Result<(&'a mut Vec<Expr>, usize), Error> {
    let position = match insert.columns.iter().position(|name| name == column) {
        Some(position) => position,
        None => {
            trace!("column \"{}\" not in statement, inserting null", column);
            insert.columns.push(column.clone());
            for tuple in insert.rows.tuples_mut() {
                tuple.push(Expr::Null);
            }
            insert.columns.len() - 1
        }
    };

    let columns = insert.columns.len();
    let tuple = insert
        .rows
        .tuple_mut(row)
        .ok_or(Error::Internal("row is not a value tuple"))?;

    if tuple.len() != columns {
        return Err(Error::Internal("row length doesn't match column list"));
    }

    Ok((tuple, position))
}

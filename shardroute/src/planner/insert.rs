//! Plan an `INSERT` statement.

use tracing::{debug, trace};

use super::{build_auto_increment, build_vindex_value, Error};
use crate::ast::{generate_query, Insert, InsertRows, Row};
use crate::route::{Opcode, Route};
use crate::vschema::SchemaLookup;

/// Build the route for an `INSERT` statement.
///
/// Statements against unsharded keyspaces are sent as is. For sharded
/// keyspaces, every row's vindex values are extracted in column vindex
/// order and their literals replaced with bind variables.
pub fn build_insert_plan<S>(insert: &mut Insert, schema: &S) -> Result<Route, Error>
where
    S: SchemaLookup + ?Sized,
{
    let query = generate_query(insert);
    let table = schema.find(insert.table.qualifier.as_deref(), &insert.table.name)?;
    let mut route = Route::new(
        Opcode::InsertUnsharded,
        table.keyspace.clone(),
        &table.name,
        query,
    );

    if !table.keyspace.sharded {
        debug!("{}", route);
        return Ok(route);
    }

    let rows = validate(insert)?;

    route.opcode = if rows == 1 {
        Opcode::InsertSharded
    } else {
        Opcode::MultiInsertSharded
    };

    let mut values = Vec::with_capacity(rows);

    for row in 0..rows {
        let mut row_values = Vec::with_capacity(table.column_vindexes.len());

        for column_vindex in &table.column_vindexes {
            row_values.push(build_vindex_value(insert, column_vindex, row)?);
        }

        if let Some(ref auto_increment) = table.auto_increment {
            build_auto_increment(insert, auto_increment, &mut route, &mut row_values, row)?;
        }

        trace!("row {} values: {:?}", row, row_values);
        values.push(row_values);
    }

    route.values = values;
    route.query = generate_query(insert);

    debug!("{}", route);

    Ok(route)
}

/// Check the statement can be routed row by row. Returns the number of rows.
fn validate(insert: &Insert) -> Result<usize, Error> {
    if insert.columns.is_empty() {
        return Err(Error::NoColumnList);
    }

    let rows = match insert.rows {
        InsertRows::Values(ref rows) => rows,
        InsertRows::Select(_) | InsertRows::Union(_) => return Err(Error::InsertSelect),
    };

    for (index, row) in rows.iter().enumerate() {
        match row {
            Row::Subquery(_) => return Err(Error::Subquery),
            Row::Tuple(values) if values.len() != insert.columns.len() => {
                return Err(Error::ColumnMismatch {
                    row: index,
                    columns: insert.columns.len(),
                    values: values.len(),
                })
            }
            Row::Tuple(_) => (),
        }
    }

    Ok(rows.len())
}

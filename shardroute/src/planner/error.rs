//! Planner errors.

use thiserror::Error;

use crate::route::ConvertError;
use crate::vschema;

/// Broad category of a planning error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Table or keyspace couldn't be resolved.
    Metadata,
    /// Statement shape isn't valid for a sharded table.
    Validation,
    /// Statement uses a construct the planner doesn't route.
    Unsupported,
    /// Literal can't be used as a routing value.
    Conversion,
    /// Bug in the planner.
    Internal,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Metadata(#[from] vschema::Error),

    #[error("no column list")]
    NoColumnList,

    #[error("column list doesn't match values: row {row} has {values} values, expected {columns}")]
    ColumnMismatch {
        row: usize,
        columns: usize,
        values: usize,
    },

    #[error("unsupported: insert into select")]
    InsertSelect,

    #[error("unsupported: subqueries in insert")]
    Subquery,

    #[error("could not convert val: {value}, row: {row}, pos: {position}: {source}")]
    Conversion {
        value: String,
        row: usize,
        position: usize,
        #[source]
        source: ConvertError,
    },

    #[error("internal planner error: {0}")]
    Internal(&'static str),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Metadata(_) => ErrorKind::Metadata,
            Self::NoColumnList | Self::ColumnMismatch { .. } => ErrorKind::Validation,
            Self::InsertSelect | Self::Subquery => ErrorKind::Unsupported,
            Self::Conversion { .. } => ErrorKind::Conversion,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }
}

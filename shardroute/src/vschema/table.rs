//! Tables, keyspaces and vindexes.

use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;
use shardroute_config::TableKind;

use crate::ast::ColIdent;

/// A logical database.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Keyspace {
    pub name: String,
    pub sharded: bool,
}

impl Keyspace {
    pub fn new(name: impl ToString, sharded: bool) -> Self {
        Self {
            name: name.to_string(),
            sharded,
        }
    }
}

/// Routing function. Opaque to the planner, the executor maps
/// values to shards with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vindex {
    pub name: String,
    pub kind: String,
    pub params: IndexMap<String, String>,
    pub owner: Option<String>,
}

/// Column routed by a vindex.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnVindex {
    pub column: ColIdent,
    pub vindex: Arc<Vindex>,
}

/// Sequence table generating auto-increment values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    pub keyspace: Keyspace,
    pub name: String,
}

/// Column populated from a sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct AutoIncrement {
    pub column: ColIdent,
    pub sequence: Sequence,
    /// Position of the column among the table's column vindexes,
    /// if it's also a routing column.
    pub column_vindex: Option<usize>,
}

/// Table metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub name: String,
    pub keyspace: Keyspace,
    pub kind: TableKind,
    /// Routing columns. The first one is the primary vindex.
    pub column_vindexes: Vec<ColumnVindex>,
    pub auto_increment: Option<AutoIncrement>,
}

impl Table {
    /// Table with no routing metadata.
    pub fn plain(name: impl ToString, keyspace: Keyspace) -> Self {
        Self {
            name: name.to_string(),
            keyspace,
            kind: TableKind::Plain,
            column_vindexes: vec![],
            auto_increment: None,
        }
    }

    pub fn is_sequence(&self) -> bool {
        self.kind == TableKind::Sequence
    }
}

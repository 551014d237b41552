//! Execution plan produced by the planner.

use std::fmt::Display;

use serde::Serialize;

use crate::util::escape_identifier;
use crate::vschema::{Keyspace, Sequence};

pub mod value;

pub use value::{ConvertError, Value};

/// Bind variable the executor fills with the generated sequence value.
/// Row `n` uses `__seq<n>`.
pub const SEQ_VAR_NAME: &str = "__seq";

/// What the executor does with the route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Opcode {
    /// Single-shard read from an unsharded keyspace.
    SelectUnsharded,
    /// Send the statement as is to the only shard.
    InsertUnsharded,
    /// One row, routed by its vindex values.
    InsertSharded,
    /// Several rows, each routed by its own vindex values.
    MultiInsertSharded,
}

impl Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::SelectUnsharded => "SelectUnsharded",
            Self::InsertUnsharded => "InsertUnsharded",
            Self::InsertSharded => "InsertSharded",
            Self::MultiInsertSharded => "MultiInsertSharded",
        })
    }
}

/// Fetch the next value from a sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Generate {
    pub opcode: Opcode,
    /// Keyspace the sequence table lives in.
    pub keyspace: Keyspace,
    pub query: String,
    /// Value supplied by the client for each row. When it isn't null,
    /// the executor uses it instead of fetching from the sequence.
    pub values: Vec<Value>,
}

impl Generate {
    pub fn new(sequence: &Sequence) -> Self {
        Self {
            opcode: Opcode::SelectUnsharded,
            keyspace: sequence.keyspace.clone(),
            query: format!(
                "select next value from `{}`",
                escape_identifier(&sequence.name)
            ),
            values: vec![],
        }
    }

    /// Default of the last row. Each row overwrites a single default,
    /// so this is the value left when all rows are planned.
    pub fn value(&self) -> Option<&Value> {
        self.values.last()
    }
}

/// Path an `INSERT` takes to the shards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    pub opcode: Opcode,
    pub keyspace: Keyspace,
    /// Table the statement writes to.
    pub table: String,
    /// Query sent to the shards.
    pub query: String,
    /// Vindex values, one list per row, in column vindex order.
    pub values: Vec<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generate: Option<Generate>,
}

impl Route {
    pub fn new(opcode: Opcode, keyspace: Keyspace, table: impl ToString, query: String) -> Self {
        Self {
            opcode,
            keyspace,
            table: table.to_string(),
            query,
            values: vec![],
            generate: None,
        }
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} keyspace={} table={} rows={}",
            self.opcode,
            self.keyspace.name,
            self.table,
            self.values.len()
        )?;
        if let Some(ref generate) = self.generate {
            write!(f, " sequence={}", generate.keyspace.name)?;
        }
        Ok(())
    }
}

//! Routing schema configuration.
//!
//! The routing schema ("vschema") describes keyspaces, the tables
//! they contain, which columns route rows to shards and which tables
//! draw their primary keys from a sequence.

pub mod error;
pub mod vschema;

pub use error::Error;
pub use vschema::{
    AutoIncrementConfig, ColumnVindexConfig, KeyspaceConfig, TableConfig, TableKind,
    VSchemaConfig, VindexConfig,
};

//! Routing schema errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Config(#[from] shardroute_config::Error),

    #[error("keyspace \"{0}\" not found in vschema")]
    KeyspaceNotFound(String),

    #[error("table \"{0}\" not found")]
    TableNotFound(String),

    #[error("table \"{table}\" not found in keyspace \"{keyspace}\"")]
    TableNotFoundInKeyspace { keyspace: String, table: String },

    #[error("ambiguous table reference: \"{0}\"")]
    AmbiguousTable(String),

    #[error("keyspace \"{0}\" is defined more than once")]
    DuplicateKeyspace(String),

    #[error("table \"{table}\" is defined more than once in keyspace \"{keyspace}\"")]
    DuplicateTable { keyspace: String, table: String },

    #[error("vindex \"{vindex}\" is defined more than once in keyspace \"{keyspace}\"")]
    DuplicateVindex { keyspace: String, vindex: String },

    #[error("vindex \"{vindex}\" not found for table \"{table}\"")]
    VindexNotFound { table: String, vindex: String },

    #[error("missing primary column vindex for table \"{0}\"")]
    MissingPrimaryVindex(String),

    #[error("sequence table \"{table}\" is in sharded keyspace \"{keyspace}\"")]
    ShardedSequence { keyspace: String, table: String },

    #[error("sequence \"{sequence}\" for table \"{table}\" not found")]
    SequenceNotFound { table: String, sequence: String },

    #[error("ambiguous sequence \"{sequence}\" for table \"{table}\"")]
    AmbiguousSequence { table: String, sequence: String },
}

//! vschema.toml data model.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs::read_to_string;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

use super::error::Error;

/// Routing schema: every keyspace known to the router.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct VSchemaConfig {
    /// Keyspaces, in declaration order.
    #[serde(default)]
    pub keyspaces: Vec<KeyspaceConfig>,
}

impl VSchemaConfig {
    /// Load the routing schema from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let source = read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = source.parse()?;

        info!(
            "loaded \"{}\" [{} keyspaces, {} tables]",
            path.display(),
            config.keyspaces.len(),
            config
                .keyspaces
                .iter()
                .map(|keyspace| keyspace.tables.len())
                .sum::<usize>()
        );

        Ok(config)
    }

    /// Find keyspace by name.
    pub fn keyspace(&self, name: &str) -> Option<&KeyspaceConfig> {
        self.keyspaces.iter().find(|keyspace| keyspace.name == name)
    }
}

impl FromStr for VSchemaConfig {
    type Err = Error;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        toml::from_str(source).map_err(|err| Error::config(source, err))
    }
}

/// A logical database, possibly split across shards.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct KeyspaceConfig {
    /// Keyspace name.
    pub name: String,
    /// Rows are spread across shards.
    #[serde(default)]
    pub sharded: bool,
    /// Routing functions available to tables in this keyspace.
    #[serde(default)]
    pub vindexes: Vec<VindexConfig>,
    /// Tables.
    #[serde(default)]
    pub tables: Vec<TableConfig>,
}

/// Routing function definition.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct VindexConfig {
    /// Name tables refer to.
    pub name: String,
    /// Routing function, e.g. `hash` or `lookup_hash_unique`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Function-specific parameters.
    #[serde(default)]
    pub params: IndexMap<String, String>,
    /// Table that owns the lookup rows, for lookup vindexes.
    #[serde(default)]
    pub owner: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    #[default]
    Plain,
    /// Backing table of a sequence. Lives in an unsharded keyspace.
    Sequence,
}

/// Table definition.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct TableConfig {
    /// Table name.
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: TableKind,
    /// Routing columns. The first one is the primary vindex.
    #[serde(default)]
    pub column_vindexes: Vec<ColumnVindexConfig>,
    /// Column populated from a sequence.
    #[serde(default)]
    pub auto_increment: Option<AutoIncrementConfig>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct ColumnVindexConfig {
    /// Column name.
    pub column: String,
    /// Vindex name, see [`VindexConfig::name`].
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct AutoIncrementConfig {
    /// Column name.
    pub column: String,
    /// Sequence table, either `name` or `keyspace.name`.
    pub sequence: String,
}

//! Routing schema.
//!
//! Resolves table names in statements to their keyspace and routing
//! metadata. Built once from [`VSchemaConfig`] and read-only afterwards,
//! so it can be shared between planning threads.

use std::path::Path;
use std::sync::Arc;

use fnv::FnvHashMap as HashMap;
use shardroute_config::{TableConfig, TableKind, VSchemaConfig};
use tracing::{debug, info};

use crate::ast::ColIdent;

pub mod error;
pub mod table;

pub use error::Error;
pub use table::{AutoIncrement, ColumnVindex, Keyspace, Sequence, Table, Vindex};

/// Resolves a table reference to its metadata.
pub trait SchemaLookup {
    /// Find the table `name`, in keyspace `qualifier` if specified.
    fn find(&self, qualifier: Option<&str>, name: &str) -> Result<Arc<Table>, Error>;
}

#[derive(Debug)]
struct KeyspaceSchema {
    keyspace: Keyspace,
    tables: HashMap<String, Arc<Table>>,
}

/// Routing schema for all keyspaces.
#[derive(Debug, Default)]
pub struct VSchema {
    keyspaces: HashMap<String, KeyspaceSchema>,
    /// Tables by unqualified name. `None` if more than one
    /// keyspace has a table with that name.
    tables: HashMap<String, Option<Arc<Table>>>,
}

impl VSchema {
    /// Build the routing schema, validating references between
    /// tables, vindexes and sequences.
    pub fn new(config: &VSchemaConfig) -> Result<Self, Error> {
        let sequences = sequences(config)?;
        let mut vschema = Self::default();

        for config in &config.keyspaces {
            if vschema.keyspaces.contains_key(&config.name) {
                return Err(Error::DuplicateKeyspace(config.name.clone()));
            }

            let keyspace = Keyspace::new(&config.name, config.sharded);

            let mut vindexes = HashMap::default();
            for vindex in &config.vindexes {
                let definition = Arc::new(Vindex {
                    name: vindex.name.clone(),
                    kind: vindex.kind.clone(),
                    params: vindex.params.clone(),
                    owner: vindex.owner.clone(),
                });
                if vindexes.insert(vindex.name.as_str(), definition).is_some() {
                    return Err(Error::DuplicateVindex {
                        keyspace: keyspace.name.clone(),
                        vindex: vindex.name.clone(),
                    });
                }
            }

            let mut tables = HashMap::default();
            for table in &config.tables {
                let table = Arc::new(build_table(&keyspace, table, &vindexes, &sequences)?);

                if tables.insert(table.name.clone(), table.clone()).is_some() {
                    return Err(Error::DuplicateTable {
                        keyspace: keyspace.name.clone(),
                        table: table.name.clone(),
                    });
                }

                vschema
                    .tables
                    .entry(table.name.clone())
                    .and_modify(|entry| *entry = None)
                    .or_insert(Some(table));
            }

            debug!(
                "keyspace \"{}\" [sharded: {}, tables: {}, vindexes: {}]",
                keyspace.name,
                keyspace.sharded,
                tables.len(),
                vindexes.len()
            );

            vschema.keyspaces.insert(
                keyspace.name.clone(),
                KeyspaceSchema { keyspace, tables },
            );
        }

        Ok(vschema)
    }

    /// Load the routing schema from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let config = VSchemaConfig::load(path)?;
        let vschema = Self::new(&config)?;
        info!(
            "vschema ready [{} keyspaces, {} tables]",
            vschema.keyspaces.len(),
            vschema.tables.len()
        );
        Ok(vschema)
    }

    /// Get keyspace by name.
    pub fn keyspace(&self, name: &str) -> Option<&Keyspace> {
        self.keyspaces.get(name).map(|schema| &schema.keyspace)
    }

    /// All tables, in no particular order.
    pub fn tables(&self) -> impl Iterator<Item = &Arc<Table>> {
        self.keyspaces
            .values()
            .flat_map(|schema| schema.tables.values())
    }
}

impl SchemaLookup for VSchema {
    fn find(&self, qualifier: Option<&str>, name: &str) -> Result<Arc<Table>, Error> {
        match qualifier.filter(|qualifier| !qualifier.is_empty()) {
            None => match self.tables.get(name) {
                Some(Some(table)) => Ok(table.clone()),
                Some(None) => Err(Error::AmbiguousTable(name.to_string())),
                None => Err(Error::TableNotFound(name.to_string())),
            },

            Some(qualifier) => {
                let schema = self
                    .keyspaces
                    .get(qualifier)
                    .ok_or_else(|| Error::KeyspaceNotFound(qualifier.to_string()))?;

                if let Some(table) = schema.tables.get(name) {
                    Ok(table.clone())
                } else if !schema.keyspace.sharded {
                    // Unsharded keyspaces don't need to list their tables.
                    Ok(Arc::new(Table::plain(name, schema.keyspace.clone())))
                } else {
                    Err(Error::TableNotFoundInKeyspace {
                        keyspace: qualifier.to_string(),
                        table: name.to_string(),
                    })
                }
            }
        }
    }
}

/// Collect sequence tables from all keyspaces.
fn sequences(config: &VSchemaConfig) -> Result<Vec<Sequence>, Error> {
    let mut sequences = vec![];

    for keyspace in &config.keyspaces {
        for table in &keyspace.tables {
            if table.kind != TableKind::Sequence {
                continue;
            }

            if keyspace.sharded {
                return Err(Error::ShardedSequence {
                    keyspace: keyspace.name.clone(),
                    table: table.name.clone(),
                });
            }

            sequences.push(Sequence {
                keyspace: Keyspace::new(&keyspace.name, keyspace.sharded),
                name: table.name.clone(),
            });
        }
    }

    Ok(sequences)
}

/// Resolve `keyspace.name` or a unique `name` to a sequence.
fn find_sequence(sequences: &[Sequence], table: &str, reference: &str) -> Result<Sequence, Error> {
    let mut candidates = sequences.iter().filter(|sequence| {
        match reference.split_once('.') {
            Some((keyspace, name)) => sequence.keyspace.name == keyspace && sequence.name == name,
            None => sequence.name == reference,
        }
    });

    match (candidates.next(), candidates.next()) {
        (Some(sequence), None) => Ok(sequence.clone()),
        (Some(_), Some(_)) => Err(Error::AmbiguousSequence {
            table: table.to_string(),
            sequence: reference.to_string(),
        }),
        (None, _) => Err(Error::SequenceNotFound {
            table: table.to_string(),
            sequence: reference.to_string(),
        }),
    }
}

fn build_table(
    keyspace: &Keyspace,
    config: &TableConfig,
    vindexes: &HashMap<&str, Arc<Vindex>>,
    sequences: &[Sequence],
) -> Result<Table, Error> {
    let mut column_vindexes = Vec::with_capacity(config.column_vindexes.len());

    for column_vindex in &config.column_vindexes {
        let vindex =
            vindexes
                .get(column_vindex.name.as_str())
                .ok_or_else(|| Error::VindexNotFound {
                    table: config.name.clone(),
                    vindex: column_vindex.name.clone(),
                })?;

        column_vindexes.push(ColumnVindex {
            column: column_vindex.column.as_str().into(),
            vindex: vindex.clone(),
        });
    }

    if keyspace.sharded && config.kind == TableKind::Plain && column_vindexes.is_empty() {
        return Err(Error::MissingPrimaryVindex(config.name.clone()));
    }

    let auto_increment = match config.auto_increment {
        Some(ref auto_increment) => {
            let sequence = find_sequence(sequences, &config.name, &auto_increment.sequence)?;
            let column: ColIdent = auto_increment.column.as_str().into();
            let column_vindex = column_vindexes
                .iter()
                .position(|column_vindex| column_vindex.column == column);

            Some(AutoIncrement {
                column,
                sequence,
                column_vindex,
            })
        }
        None => None,
    };

    Ok(Table {
        name: config.name.clone(),
        keyspace: keyspace.clone(),
        kind: config.kind,
        column_vindexes,
        auto_increment,
    })
}

#[cfg(test)]
mod test {
    use super::*;

    const SOURCE: &str = r#"
[[keyspaces]]
name = "user"
sharded = true

[[keyspaces.vindexes]]
name = "user_index"
type = "hash"

[[keyspaces.vindexes]]
name = "name_user_map"
type = "lookup_hash"
owner = "user"

[[keyspaces.tables]]
name = "user"
column_vindexes = [
    { column = "Id", name = "user_index" },
    { column = "name", name = "name_user_map" },
]
auto_increment = { column = "id", sequence = "main.user_seq" }

[[keyspaces.tables]]
name = "user_extra"
column_vindexes = [{ column = "user_id", name = "user_index" }]
auto_increment = { column = "extra_id", sequence = "extra_seq" }

[[keyspaces.tables]]
name = "shared"
column_vindexes = [{ column = "id", name = "user_index" }]

[[keyspaces]]
name = "main"

[[keyspaces.tables]]
name = "user_seq"
type = "sequence"

[[keyspaces.tables]]
name = "extra_seq"
type = "sequence"

[[keyspaces.tables]]
name = "shared"
"#;

    fn vschema() -> VSchema {
        VSchema::new(&SOURCE.parse().unwrap()).unwrap()
    }

    fn build(source: &str) -> Result<VSchema, Error> {
        VSchema::new(&source.parse().unwrap())
    }

    #[test]
    fn test_find_unqualified() {
        let vschema = vschema();
        let user = vschema.find(None, "user").unwrap();
        assert_eq!(user.keyspace, Keyspace::new("user", true));
        assert_eq!(user.column_vindexes.len(), 2);
        assert_eq!(user.column_vindexes[0].vindex.kind, "hash");
        assert_eq!(user.column_vindexes[1].vindex.owner.as_deref(), Some("user"));

        let auto_increment = user.auto_increment.as_ref().unwrap();
        assert_eq!(auto_increment.column_vindex, Some(0));
        assert_eq!(auto_increment.sequence.name, "user_seq");
        assert_eq!(auto_increment.sequence.keyspace, Keyspace::new("main", false));

        let extra = vschema.find(Some(""), "user_extra").unwrap();
        assert_eq!(extra.auto_increment.as_ref().unwrap().column_vindex, None);

        assert!(vschema.find(None, "user_seq").unwrap().is_sequence());
    }

    #[test]
    fn test_find_errors() {
        let vschema = vschema();
        assert!(matches!(
            vschema.find(None, "shared"),
            Err(Error::AmbiguousTable(_))
        ));
        assert!(matches!(
            vschema.find(None, "missing"),
            Err(Error::TableNotFound(_))
        ));
        assert!(matches!(
            vschema.find(Some("nope"), "user"),
            Err(Error::KeyspaceNotFound(_))
        ));
        assert!(matches!(
            vschema.find(Some("user"), "missing"),
            Err(Error::TableNotFoundInKeyspace { .. })
        ));
    }

    #[test]
    fn test_find_qualified() {
        let vschema = vschema();
        let shared = vschema.find(Some("user"), "shared").unwrap();
        assert!(shared.keyspace.sharded);
        let shared = vschema.find(Some("main"), "shared").unwrap();
        assert!(!shared.keyspace.sharded);

        // Not listed, but main is unsharded.
        let other = vschema.find(Some("main"), "other").unwrap();
        assert_eq!(other.name, "other");
        assert_eq!(other.keyspace.name, "main");
        assert!(other.column_vindexes.is_empty());
    }

    #[test]
    fn test_accessors() {
        let vschema = vschema();
        assert!(vschema.keyspace("user").unwrap().sharded);
        assert!(vschema.keyspace("other").is_none());
        assert_eq!(vschema.tables().count(), 6);
    }

    #[test]
    fn test_build_errors() {
        let err = build(
            r#"
[[keyspaces]]
name = "user"
sharded = true
[[keyspaces.tables]]
name = "user"
column_vindexes = [{ column = "id", name = "missing" }]
"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::VindexNotFound { .. }), "{}", err);

        let err = build(
            r#"
[[keyspaces]]
name = "user"
sharded = true
[[keyspaces.tables]]
name = "user"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::MissingPrimaryVindex(_)), "{}", err);

        let err = build(
            r#"
[[keyspaces]]
name = "user"
sharded = true
[[keyspaces.tables]]
name = "user_seq"
type = "sequence"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::ShardedSequence { .. }), "{}", err);

        let err = build(
            r#"
[[keyspaces]]
name = "main"
[[keyspaces.tables]]
name = "user"
auto_increment = { column = "id", sequence = "user_seq" }
"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::SequenceNotFound { .. }), "{}", err);

        let err = build(
            r#"
[[keyspaces]]
name = "a"
[[keyspaces.tables]]
name = "seq"
type = "sequence"
[[keyspaces]]
name = "b"
[[keyspaces.tables]]
name = "seq"
type = "sequence"
[[keyspaces.tables]]
name = "user"
auto_increment = { column = "id", sequence = "seq" }
"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::AmbiguousSequence { .. }), "{}", err);

        let err = build(
            r#"
[[keyspaces]]
name = "a"
[[keyspaces]]
name = "a"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::DuplicateKeyspace(_)), "{}", err);

        let err = build(
            r#"
[[keyspaces]]
name = "a"
[[keyspaces.tables]]
name = "t"
[[keyspaces.tables]]
name = "t"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::DuplicateTable { .. }), "{}", err);
    }
}

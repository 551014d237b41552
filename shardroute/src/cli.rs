//! Command-line interface.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde::Serialize;
use tokio::fs::read_to_string;
use tracing::{info, warn};

use crate::ast::Insert;
use crate::planner::build_insert_plan;
use crate::route::Route;
use crate::vschema::{SchemaLookup, VSchema};
use crate::Error;

/// shardroute plans INSERT statements against sharded keyspaces.
#[derive(Parser, Debug)]
#[command(name = "shardroute", version)]
pub struct Cli {
    /// Path to the routing schema. Default: "vschema.toml"
    #[arg(short, long, default_value = "vschema.toml")]
    pub vschema: PathBuf,
    /// Log in JSON format.
    #[arg(long)]
    pub log_json: bool,
    /// Subcommand.
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Check the routing schema for errors.
    Configcheck,

    /// Plan statements and print the routes as JSON.
    Plan {
        /// File containing a JSON array of INSERT statements.
        #[arg(short, long)]
        file: PathBuf,

        /// Pretty-print the output.
        #[arg(long)]
        pretty: bool,
    },
}

/// Log what the routing schema contains.
pub fn configcheck(vschema: &VSchema) {
    let mut tables = vschema.tables().collect::<Vec<_>>();
    tables.sort_by(|a, b| (&a.keyspace.name, &a.name).cmp(&(&b.keyspace.name, &b.name)));

    for table in tables {
        let vindexes = table
            .column_vindexes
            .iter()
            .map(|column_vindex| {
                format!(
                    "{} ({})",
                    column_vindex.column.as_str(),
                    column_vindex.vindex.kind
                )
            })
            .collect::<Vec<_>>();

        info!(
            "{}.{} [vindexes: {}{}]",
            table.keyspace.name,
            table.name,
            if vindexes.is_empty() {
                "none".to_string()
            } else {
                vindexes.join(", ")
            },
            table
                .auto_increment
                .as_ref()
                .map(|auto_increment| format!(
                    ", auto_increment: {} from {}.{}",
                    auto_increment.column.as_str(),
                    auto_increment.sequence.keyspace.name,
                    auto_increment.sequence.name
                ))
                .unwrap_or_default()
        );
    }
}

/// Result of planning one statement.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Route(Route),
    Error(String),
}

impl Outcome {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

/// Plan statements read from a file.
#[derive(Debug, Clone)]
pub struct PlanCli {
    statements: Vec<Insert>,
}

impl PlanCli {
    pub async fn new(file: impl AsRef<Path>) -> Result<Self, Error> {
        let path = file.as_ref();
        let source = read_to_string(path).await.map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self::from_statements(serde_json::from_str(&source)?))
    }

    pub fn from_statements(statements: Vec<Insert>) -> Self {
        Self { statements }
    }

    /// Plan every statement. Statements are independent, one failing
    /// doesn't stop the others.
    pub fn run<S: SchemaLookup + ?Sized>(&self, schema: &S) -> Vec<Outcome> {
        self.statements
            .iter()
            .map(|statement| {
                let mut statement = statement.clone();
                match build_insert_plan(&mut statement, schema) {
                    Ok(route) => Outcome::Route(route),
                    Err(err) => {
                        warn!("\"{}\": {}", statement, err);
                        Outcome::Error(err.to_string())
                    }
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod test {
    use std::io::Write;

    use super::*;

    const VSCHEMA: &str = r#"
[[keyspaces]]
name = "user"
sharded = true
[[keyspaces.vindexes]]
name = "hash"
type = "hash"
[[keyspaces.tables]]
name = "user"
column_vindexes = [{ column = "id", name = "hash" }]
"#;

    const STATEMENTS: &str = r#"[
    {
        "table": { "name": "user" },
        "columns": ["id", "name"],
        "rows": { "values": [{ "tuple": [{ "num": "1" }, { "str": "a" }] }] }
    },
    {
        "table": { "name": "user" },
        "rows": { "values": [{ "tuple": [{ "num": "1" }] }] }
    }
]"#;

    #[tokio::test]
    async fn test_plan_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(STATEMENTS.as_bytes()).unwrap();

        let vschema = VSchema::new(&VSCHEMA.parse().unwrap()).unwrap();
        let cli = PlanCli::new(file.path()).await.unwrap();
        let outcomes = cli.run(&vschema);

        assert_eq!(outcomes.len(), 2);
        assert!(!outcomes[0].is_error());
        assert!(outcomes[1].is_error());

        let json = serde_json::to_value(&outcomes).unwrap();
        assert_eq!(json[0]["route"]["opcode"], "InsertSharded");
        assert_eq!(json[0]["route"]["keyspace"]["name"], "user");
        assert_eq!(
            json[0]["route"]["query"],
            "insert into user(id, name) values (:_id0, 'a')"
        );
        assert_eq!(json[0]["route"]["values"][0][0], 1);
        assert!(json[0]["route"].get("generate").is_none());
        assert_eq!(json[1]["error"], "no column list");
    }

    #[tokio::test]
    async fn test_plan_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = PlanCli::new(dir.path().join("missing.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_cli_args() {
        let cli = Cli::parse_from(["shardroute", "plan", "--file", "inserts.json"]);
        assert_eq!(cli.vschema, PathBuf::from("vschema.toml"));
        assert!(matches!(cli.command, Commands::Plan { pretty: false, .. }));

        let cli = Cli::parse_from(["shardroute", "--vschema", "vs.toml", "configcheck"]);
        assert_eq!(cli.vschema, PathBuf::from("vs.toml"));
        assert!(matches!(cli.command, Commands::Configcheck));
    }
}

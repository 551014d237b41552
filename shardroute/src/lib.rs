//! Query planner for `INSERT` statements against sharded keyspaces.
//!
//! Given a parsed statement and the routing schema, the planner produces
//! a [`Route`]: the keyspace to send the statement to, the rewritten
//! query with routing literals replaced by bind variables, the values
//! each row routes on, and optionally a sub-plan fetching the next
//! sequence value.

pub mod ast;
pub mod cli;
pub mod error;
pub mod logger;
pub mod planner;
pub mod route;
pub mod util;
pub mod vschema;

pub use ast::Insert;
pub use error::Error;
pub use planner::build_insert_plan;
pub use route::{Generate, Opcode, Route, Value};
pub use vschema::{SchemaLookup, VSchema};

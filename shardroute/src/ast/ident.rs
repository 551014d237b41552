//! Identifiers.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::util::format_ident;

/// Column name. Compares case-insensitively, remembers the original spelling.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColIdent(String);

impl ColIdent {
    pub fn new(name: impl ToString) -> Self {
        Self(name.to_string())
    }

    /// Name as written.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical, lowercase name.
    pub fn lowered(&self) -> String {
        self.0.to_lowercase()
    }

    /// Case-insensitive comparison.
    pub fn equal(&self, name: &str) -> bool {
        self.0
            .chars()
            .flat_map(char::to_lowercase)
            .eq(name.chars().flat_map(char::to_lowercase))
    }
}

impl PartialEq for ColIdent {
    fn eq(&self, other: &Self) -> bool {
        self.equal(&other.0)
    }
}

impl Eq for ColIdent {}

impl Display for ColIdent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", format_ident(&self.0))
    }
}

impl From<&str> for ColIdent {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ColIdent {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Table name in a query.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TableName {
    /// Keyspace, if specified.
    #[serde(default)]
    pub qualifier: Option<String>,
    /// Table name.
    pub name: String,
}

impl TableName {
    pub fn new(name: impl ToString) -> Self {
        Self {
            qualifier: None,
            name: name.to_string(),
        }
    }

    pub fn qualified(qualifier: impl ToString, name: impl ToString) -> Self {
        Self {
            qualifier: Some(qualifier.to_string()),
            name: name.to_string(),
        }
    }
}

impl Display for TableName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref qualifier) = self.qualifier {
            write!(f, "{}.", format_ident(qualifier))?;
        }
        write!(f, "{}", format_ident(&self.name))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_col_ident_case_insensitive() {
        let col = ColIdent::new("UserId");
        assert_eq!(col, ColIdent::new("userid"));
        assert!(col.equal("USERID"));
        assert!(!col.equal("user_id"));
        assert_eq!(col.as_str(), "UserId");
        assert_eq!(col.lowered(), "userid");
        assert!(ColIdent::new("Straße").equal("STRAßE"));
    }

    #[test]
    fn test_table_name() {
        assert_eq!(TableName::new("user").to_string(), "user");
        assert_eq!(
            TableName::qualified("main", "order").to_string(),
            "main.`order`"
        );
    }
}

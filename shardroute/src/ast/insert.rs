//! `INSERT` statement.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::{ColIdent, Expr, TableName};

/// One row of a `VALUES` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Row {
    Tuple(Vec<Expr>),
    /// `VALUES ((select ...))`, without the parentheses.
    Subquery(String),
}

impl Display for Row {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tuple(values) => write!(
                f,
                "({})",
                values
                    .iter()
                    .map(|value| value.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            Self::Subquery(query) => write!(f, "({})", query),
        }
    }
}

/// Where the inserted rows come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsertRows {
    Values(Vec<Row>),
    /// `INSERT ... SELECT`, as SQL.
    Select(String),
    /// `INSERT ... SELECT ... UNION ...`, as SQL.
    Union(String),
}

impl InsertRows {
    /// Literal tuple for the given row.
    pub fn tuple_mut(&mut self, row: usize) -> Option<&mut Vec<Expr>> {
        match self {
            Self::Values(rows) => match rows.get_mut(row) {
                Some(Row::Tuple(values)) => Some(values),
                _ => None,
            },
            _ => None,
        }
    }

    /// All literal tuples, skipping subqueries.
    pub fn tuples_mut(&mut self) -> impl Iterator<Item = &mut Vec<Expr>> {
        let rows: &mut [Row] = match self {
            Self::Values(rows) => rows,
            _ => &mut [],
        };

        rows.iter_mut().filter_map(|row| match row {
            Row::Tuple(values) => Some(values),
            Row::Subquery(_) => None,
        })
    }
}

impl Display for InsertRows {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Values(rows) => write!(
                f,
                "values {}",
                rows.iter()
                    .map(|row| row.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            Self::Select(query) | Self::Union(query) => write!(f, "{}", query),
        }
    }
}

/// `col = expr` in `ON DUPLICATE KEY UPDATE`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateExpr {
    pub column: ColIdent,
    pub expr: Expr,
}

/// Parsed `INSERT` statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insert {
    /// Leading comments, e.g. `/* user:1 */`.
    #[serde(default)]
    pub comments: Vec<String>,
    #[serde(default)]
    pub ignore: bool,
    pub table: TableName,
    /// Column list. Empty if the statement didn't specify one.
    #[serde(default)]
    pub columns: Vec<ColIdent>,
    pub rows: InsertRows,
    #[serde(default)]
    pub on_duplicate: Vec<UpdateExpr>,
}

impl Insert {
    /// `INSERT INTO table (columns) VALUES (..), (..)`.
    pub fn values(table: TableName, columns: &[&str], rows: Vec<Vec<Expr>>) -> Self {
        Self {
            comments: vec![],
            ignore: false,
            table,
            columns: columns.iter().map(|column| ColIdent::new(column)).collect(),
            rows: InsertRows::Values(rows.into_iter().map(Row::Tuple).collect()),
            on_duplicate: vec![],
        }
    }
}

impl Display for Insert {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "insert ")?;
        for comment in &self.comments {
            write!(f, "{} ", comment)?;
        }
        if self.ignore {
            write!(f, "ignore ")?;
        }
        write!(f, "into {}", self.table)?;
        if !self.columns.is_empty() {
            write!(
                f,
                "({})",
                self.columns
                    .iter()
                    .map(|column| column.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            )?;
        }
        write!(f, " {}", self.rows)?;
        if !self.on_duplicate.is_empty() {
            write!(
                f,
                " on duplicate key update {}",
                self.on_duplicate
                    .iter()
                    .map(|update| format!("{} = {}", update.column, update.expr))
                    .collect::<Vec<_>>()
                    .join(", ")
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ast::generate_query;

    #[test]
    fn test_insert_display() {
        let insert = Insert::values(
            TableName::new("user"),
            &["id", "name"],
            vec![
                vec![Expr::num(1), Expr::str("a")],
                vec![Expr::num(2), Expr::Null],
            ],
        );
        assert_eq!(
            generate_query(&insert),
            "insert into user(id, name) values (1, 'a'), (2, null)"
        );
    }

    #[test]
    fn test_insert_display_full() {
        let mut insert = Insert::values(
            TableName::qualified("user", "music"),
            &[],
            vec![vec![Expr::num(1)]],
        );
        insert.comments = vec!["/* trace */".into()];
        insert.ignore = true;
        insert.on_duplicate = vec![UpdateExpr {
            column: "count".into(),
            expr: Expr::Binary {
                left: Box::new(Expr::Column("count".into())),
                op: "+".into(),
                right: Box::new(Expr::num(1)),
            },
        }];
        assert_eq!(
            generate_query(&insert),
            "insert /* trace */ ignore into user.music values (1) on duplicate key update count = count + 1"
        );

        insert.rows = InsertRows::Select("select id from other".into());
        insert.on_duplicate.clear();
        assert_eq!(
            generate_query(&insert),
            "insert /* trace */ ignore into user.music select id from other"
        );
    }

    #[test]
    fn test_tuples_mut() {
        let mut rows = InsertRows::Values(vec![
            Row::Tuple(vec![Expr::num(1)]),
            Row::Subquery("select 2".into()),
            Row::Tuple(vec![Expr::num(3)]),
        ]);
        assert_eq!(rows.tuples_mut().count(), 2);
        assert!(rows.tuple_mut(1).is_none());
        rows.tuple_mut(2).unwrap().push(Expr::Null);
        assert_eq!(rows.tuple_mut(2).unwrap().len(), 2);
        assert!(rows.tuple_mut(3).is_none());

        let mut rows = InsertRows::Select("select 1".into());
        assert_eq!(rows.tuples_mut().count(), 0);
    }
}

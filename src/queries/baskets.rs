//! Basket reference table queries.

use crate::connection::{Connection, Row};
use crate::error::Result;
use crate::sql_builder::SqlBuilder;

/// Query interface for the basket reference table (one row per basket).
pub struct BasketQuery<'a> {
    conn: &'a Connection,
    table: &'a str,
}

impl<'a> BasketQuery<'a> {
    /// Create a new `BasketQuery` bound to the given connection and table.
    pub fn new(conn: &'a Connection, table: &'a str) -> Self {
        Self { conn, table }
    }

    /// The SQL used by [`all()`](Self::all).
    pub fn sql(&self) -> Result<String> {
        Ok(SqlBuilder::new(self.table)?.build())
    }

    /// Fetch every basket row, active or not. Filtering happens during
    /// aggregation.
    pub fn all(&self) -> Result<Vec<Row>> {
        let sql = self.sql()?;
        let rows = self.conn.execute(&sql)?;
        tracing::debug!(table = self.table, rows = rows.len(), "fetched baskets");
        Ok(rows)
    }
}

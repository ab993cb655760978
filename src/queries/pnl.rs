//! PnL snapshot queries.
//!
//! The snapshot table gains one row per valuation run. Each row carries a
//! date column, a time column, and one column per basket holding that
//! basket's PnL at that moment.

use crate::connection::{Connection, Row};
use crate::error::Result;
use crate::sql_builder::SqlBuilder;

/// Query interface for the PnL snapshot table.
pub struct PnlQuery<'a> {
    conn: &'a Connection,
    table: &'a str,
    date_col: &'a str,
    time_col: &'a str,
}

impl<'a> PnlQuery<'a> {
    /// Create a new `PnlQuery` ordering snapshots by `date_col` then `time_col`.
    pub fn new(conn: &'a Connection, table: &'a str, date_col: &'a str, time_col: &'a str) -> Self {
        Self {
            conn,
            table,
            date_col,
            time_col,
        }
    }

    /// The SQL used by [`latest()`](Self::latest).
    pub fn latest_sql(&self) -> Result<String> {
        Ok(SqlBuilder::new(self.table)?
            .order_by_desc(&[self.date_col, self.time_col])?
            .limit(1)
            .build())
    }

    /// Fetch the most recent snapshot row.
    ///
    /// Returns at most one row; an empty table yields an empty `Vec`.
    pub fn latest(&self) -> Result<Vec<Row>> {
        let sql = self.latest_sql()?;
        self.conn.execute(&sql)
    }
}

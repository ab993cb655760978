//! Fault-tolerant data source adapter.
//!
//! [`Explorer`] never returns an error. A failed connection or query is
//! logged, recorded as a [`Notice`] for the page to display, and turned into
//! an empty table, so a broken database yields a blank dashboard instead of
//! a crashed process.

use std::cell::RefCell;

use crate::config::{Columns, DatabaseConfig};
use crate::connection::{Connection, Row};
use crate::error::Result;
use crate::models::Notice;
use crate::queries::{BasketQuery, PnlQuery};

/// One request's view of the database.
pub struct Explorer {
    conn: Option<Connection>,
    notices: RefCell<Vec<Notice>>,
}

impl Explorer {
    /// Connect to the configured database.
    ///
    /// On failure the explorer is still returned, holding no connection and
    /// one error notice. Every fetch on it then returns an empty table.
    pub fn connect(config: &DatabaseConfig) -> Self {
        match Connection::open(config) {
            Ok(conn) => Self::from_connection(conn),
            Err(e) => {
                tracing::error!(error = %e, "database connection failed");
                Self {
                    conn: None,
                    notices: RefCell::new(vec![Notice::error(format!(
                        "Database Connection Error: {e}"
                    ))]),
                }
            }
        }
    }

    /// Wrap an already open connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Some(conn),
            notices: RefCell::new(Vec::new()),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.conn.is_some()
    }

    /// Run a parameterless query and return every row.
    pub fn fetch_all(&self, sql: &str) -> Vec<Row> {
        self.guarded("Error executing query", |conn| conn.execute(sql))
    }

    /// Fetch the whole basket reference table.
    pub fn fetch_baskets(&self, table: &str) -> Vec<Row> {
        self.guarded("Error executing query", |conn| {
            BasketQuery::new(conn, table).all()
        })
    }

    /// Fetch the latest row of `table`, newest date first, then newest time.
    ///
    /// Returns at most one row.
    pub fn fetch_latest(&self, table: &str, columns: &Columns) -> Vec<Row> {
        self.guarded("Error fetching last row", |conn| {
            PnlQuery::new(conn, table, &columns.date, &columns.time).latest()
        })
    }

    /// Drain the notices raised so far.
    pub fn take_notices(&self) -> Vec<Notice> {
        self.notices.take()
    }

    fn guarded<F>(&self, context: &str, f: F) -> Vec<Row>
    where
        F: FnOnce(&Connection) -> Result<Vec<Row>>,
    {
        let Some(conn) = &self.conn else {
            return Vec::new();
        };
        match f(conn) {
            Ok(rows) => rows,
            Err(e) => {
                tracing::error!(error = %e, "{context}");
                self.notices
                    .borrow_mut()
                    .push(Notice::error(format!("{context}: {e}")));
                Vec::new()
            }
        }
    }
}

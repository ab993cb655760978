//! Shared test fixtures for the basket PnL integration tests.
//!
//! Provides a small basket reference table and a PnL snapshot table with
//! three valuation rows, loadable into an in-memory DuckDB connection or a
//! DuckDB file on disk.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use basket_pnl::{Connection, DatabaseConfig, Row, Settings};

/// Baskets:
/// - ALPHA, BRAVO: live intraday
/// - CHARLIE, FOXTROT: live daily (FOXTROT has no PnL column)
/// - DELTA: daily, paper
/// - ECHO: intraday paper, inactive
///
/// The latest snapshot is 2024-01-02 15:30:00. An earlier row on the same
/// date and one on the previous day carry different figures.
pub const SEED_SQL: &str = r#"
CREATE TABLE httsbaskets (
    BASKETNAME VARCHAR,
    CATEGORY VARCHAR,
    OWNED VARCHAR,
    STATUS VARCHAR
);
INSERT INTO httsbaskets VALUES
    ('ALPHA',   'INTRA', 'LIVE',  '1'),
    ('BRAVO',   'INTRA', 'LIVE',  '1'),
    ('CHARLIE', 'DAILY', 'LIVE',  '1'),
    ('DELTA',   'DAILY', 'PAPER', '1'),
    ('ECHO',    'INTRA', 'PAPER', '0'),
    ('FOXTROT', 'DAILY', 'LIVE',  '1');

CREATE TABLE pnlhtts (
    VDATE DATE,
    VTIME TIME,
    ALPHA DOUBLE,
    BRAVO DOUBLE,
    CHARLIE DECIMAL(12, 2),
    DELTA DOUBLE,
    ECHO DOUBLE
);
INSERT INTO pnlhtts VALUES
    ('2024-01-01', '15:30:00',  999.0,  999.0, 999.00,  999.0,   999.0),
    ('2024-01-02', '15:30:00', 1500.75, -250.5, 320.00, -75.25, 10000.0),
    ('2024-01-02', '09:00:00',  111.0,  111.0, 111.00,  111.0,   111.0);
"#;

pub const LATEST_INTRA: f64 = 1250.25;
pub const LATEST_DAILY: f64 = 244.75;
pub const LATEST_PAPER: f64 = -75.25;

/// An in-memory connection holding the seed tables.
pub fn seeded_connection() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.raw().execute_batch(SEED_SQL).unwrap();
    conn
}

/// Write the seed tables to `<dir>/pnl.duckdb` and return its path.
///
/// The writer connection is closed before returning so the file can be
/// reopened read-only.
pub fn seed_file(dir: &Path) -> PathBuf {
    seed_file_with(dir, SEED_SQL)
}

pub fn seed_file_with(dir: &Path, sql: &str) -> PathBuf {
    let path = dir.join("pnl.duckdb");
    let conn = duckdb::Connection::open(&path).unwrap();
    conn.execute_batch(sql).unwrap();
    drop(conn);
    path
}

/// Default settings pointed at a DuckDB file.
pub fn settings_for(path: &Path) -> Settings {
    Settings {
        database: DatabaseConfig::DuckDb {
            path: path.to_path_buf(),
        },
        ..Settings::default()
    }
}

/// Build a row from a JSON object literal.
pub fn row(value: serde_json::Value) -> Row {
    match value {
        serde_json::Value::Object(map) => map.into_iter().collect(),
        other => panic!("expected a JSON object, got {other}"),
    }
}

pub fn names(rows: &[basket_pnl::BasketPnl]) -> Vec<&str> {
    rows.iter().map(|b| b.name.as_str()).collect()
}

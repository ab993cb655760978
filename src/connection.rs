//! DuckDB connection wrapper and row conversion.
//!
//! The dashboard reads from a DuckDB database file, an in-memory database, or
//! a MySQL server attached through DuckDB's `mysql` extension. Query results
//! come back as rows of `serde_json::Value` keyed by column name, because the
//! PnL snapshot has one column per basket and its shape is not known ahead of
//! time.

use std::collections::HashMap;

use chrono::{DateTime, NaiveTime};
use duckdb::types::{TimeUnit, ValueRef};
use duckdb::{AccessMode, Config, Connection as DuckDbConnection};
use serde_json::Value;

use crate::config::{DatabaseConfig, MySqlConfig};
use crate::error::{PnlError, Result};

/// A single result row keyed by column name.
pub type Row = HashMap<String, Value>;

/// Catalog alias used when a MySQL database is attached.
const MYSQL_ALIAS: &str = "pnl_source";

/// Wraps a DuckDB connection opened against one of the supported backends.
pub struct Connection {
    conn: DuckDbConnection,
}

impl Connection {
    /// Open a connection for the given database target.
    ///
    /// DuckDB files are opened read-only, so a missing file is an error rather
    /// than silently creating an empty database.
    pub fn open(config: &DatabaseConfig) -> Result<Self> {
        match config {
            DatabaseConfig::Memory => Self::open_in_memory(),
            DatabaseConfig::DuckDb { path } => {
                let flags = Config::default().access_mode(AccessMode::ReadOnly)?;
                let conn = DuckDbConnection::open_with_flags(path, flags)?;
                tracing::debug!(path = %path.display(), "opened duckdb file");
                Ok(Self { conn })
            }
            DatabaseConfig::MySql(mysql) => {
                let conn = DuckDbConnection::open_in_memory()?;
                attach_mysql(&conn, mysql)?;
                tracing::debug!(host = %mysql.host, database = %mysql.database, "attached mysql");
                Ok(Self { conn })
            }
        }
    }

    /// Open a fresh in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        let conn = DuckDbConnection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Execute SQL and return results as a `Vec` of rows.
    ///
    /// DuckDB types are converted to `serde_json::Value`; see
    /// [`convert_value_ref`] for the mapping.
    pub fn execute(&self, sql: &str) -> Result<Vec<Row>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows_result = stmt.query([])?;

        // Column metadata is only available after the query has run
        let stmt_ref = rows_result
            .as_ref()
            .ok_or_else(|| PnlError::InvalidArgument("query produced no statement".into()))?;
        let column_names: Vec<String> = stmt_ref
            .column_names()
            .into_iter()
            .map(|s| s.to_string())
            .collect();

        let mut out: Vec<Row> = Vec::new();

        while let Some(row) = rows_result.next()? {
            let mut map = HashMap::with_capacity(column_names.len());
            for (i, col_name) in column_names.iter().enumerate() {
                map.insert(col_name.clone(), convert_value_ref(row.get_ref(i)?));
            }
            out.push(map);
        }

        Ok(out)
    }

    /// Access the underlying DuckDB connection for advanced usage.
    pub fn raw(&self) -> &DuckDbConnection {
        &self.conn
    }
}

/// Attach a MySQL database read-only and make it the default catalog, so
/// unqualified table names resolve against it.
///
/// `TINYINT(1)` columns stay integers instead of becoming BOOLEAN, so a
/// numeric `STATUS` flag compares against the configured active label.
fn attach_mysql(conn: &DuckDbConnection, mysql: &MySqlConfig) -> Result<()> {
    let dsn = mysql_dsn(mysql).replace('\'', "''");
    conn.execute_batch(&format!(
        "INSTALL mysql; LOAD mysql; \
         SET mysql_tinyint1_as_boolean = false; \
         ATTACH '{dsn}' AS {MYSQL_ALIAS} (TYPE mysql, READ_ONLY); \
         USE {MYSQL_ALIAS};"
    ))?;
    Ok(())
}

/// Build the `key=value` connection string for the mysql extension.
///
/// Text values are double-quoted with `\` and `"` backslash-escaped, so
/// spaces and `=` inside a password survive.
fn mysql_dsn(mysql: &MySqlConfig) -> String {
    let mut dsn = format!(
        "host={} port={} user={} database={}",
        dsn_quote(&mysql.host),
        mysql.port,
        dsn_quote(&mysql.user),
        dsn_quote(&mysql.database)
    );
    if let Some(password) = &mysql.password {
        dsn.push_str(" password=");
        dsn.push_str(&dsn_quote(password));
    }
    dsn
}

fn dsn_quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        if c == '\\' || c == '"' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

/// Convert a DuckDB `ValueRef` to a `serde_json::Value`.
///
/// Decimals become JSON numbers. DATE, TIME and TIMESTAMP values become
/// `%Y-%m-%d`, `%H:%M:%S` and `%Y-%m-%d %H:%M:%S` strings.
pub(crate) fn convert_value_ref(val: ValueRef<'_>) -> Value {
    match val {
        ValueRef::Null => Value::Null,
        ValueRef::Boolean(b) => Value::Bool(b),
        ValueRef::TinyInt(n) => Value::Number(n.into()),
        ValueRef::SmallInt(n) => Value::Number(n.into()),
        ValueRef::Int(n) => Value::Number(n.into()),
        ValueRef::BigInt(n) => Value::Number(n.into()),
        ValueRef::UTinyInt(n) => Value::Number(n.into()),
        ValueRef::USmallInt(n) => Value::Number(n.into()),
        ValueRef::UInt(n) => Value::Number(n.into()),
        ValueRef::UBigInt(n) => Value::Number(n.into()),
        ValueRef::HugeInt(n) => {
            // HugeInt may not fit in i64; try i64, fallback to string
            if let Ok(i) = i64::try_from(n) {
                Value::Number(i.into())
            } else {
                Value::String(n.to_string())
            }
        }
        ValueRef::Float(f) => float_value(f as f64),
        ValueRef::Double(f) => float_value(f),
        ValueRef::Decimal(d) => {
            let text = d.to_string();
            match text.parse::<f64>() {
                Ok(f) => float_value(f),
                Err(_) => Value::String(text),
            }
        }
        ValueRef::Text(bytes) => Value::String(String::from_utf8_lossy(bytes).to_string()),
        ValueRef::Date32(days) => DateTime::from_timestamp(i64::from(days) * 86_400, 0)
            .map(|dt| Value::String(dt.date_naive().format("%Y-%m-%d").to_string()))
            .unwrap_or(Value::Null),
        ValueRef::Time64(unit, value) => time_of_day(unit, value)
            .map(|t| Value::String(t.format("%H:%M:%S").to_string()))
            .unwrap_or(Value::Null),
        ValueRef::Timestamp(unit, value) => DateTime::from_timestamp_micros(unit.to_micros(value))
            .map(|dt| Value::String(dt.naive_utc().format("%Y-%m-%d %H:%M:%S").to_string()))
            .unwrap_or(Value::Null),
        ValueRef::Blob(bytes) => Value::String(format!(
            "blob:{}",
            bytes.iter().map(|b| format!("{b:02x}")).collect::<String>()
        )),
        // Intervals and nested types never appear in the basket or PnL tables
        _ => Value::Null,
    }
}

fn float_value(f: f64) -> Value {
    serde_json::Number::from_f64(f)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

fn time_of_day(unit: TimeUnit, value: i64) -> Option<NaiveTime> {
    let micros = unit.to_micros(value);
    let secs = u32::try_from(micros.div_euclid(1_000_000)).ok()?;
    let nanos = u32::try_from(micros.rem_euclid(1_000_000) * 1_000).ok()?;
    NaiveTime::from_num_seconds_from_midnight_opt(secs, nanos)
}

//! Dashboard settings: database target, table and column names, category
//! labels, and HTTP server options.
//!
//! Settings are read from a TOML file. Every field has a default matching the
//! production HTTS schema, so an empty file (or no file at all) is valid.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub const CONFIG_ENV: &str = "BASKET_PNL_CONFIG";
pub const PASSWORD_ENV: &str = "BASKET_PNL_DB_PASSWORD";

pub const DEFAULT_BASKET_TABLE: &str = "httsbaskets";
pub const DEFAULT_PNL_TABLE: &str = "pnlhtts";
pub const DEFAULT_DUCKDB_PATH: &str = "basket_pnl.duckdb";
pub const DEFAULT_BIND: &str = "0.0.0.0:8501";
pub const DEFAULT_TITLE: &str = "HTTS Live PnL";

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Complete dashboard configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub database: DatabaseConfig,
    pub tables: Tables,
    pub columns: Columns,
    pub labels: Labels,
    pub server: ServerConfig,
}

impl Settings {
    /// Load settings from the first available source.
    ///
    /// Lookup order: the explicit `path`, then `$BASKET_PNL_CONFIG`, then
    /// `<config_dir>/basket-pnl/config.toml` if it exists, then built-in
    /// defaults. An explicitly named file that cannot be read is an error.
    /// `$BASKET_PNL_DB_PASSWORD` overrides any configured MySQL password.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let explicit = path
            .map(Path::to_path_buf)
            .or_else(|| env::var_os(CONFIG_ENV).map(PathBuf::from));

        let mut settings = match explicit {
            Some(p) => Self::from_file(&p)?,
            None => match default_config_path().filter(|p| p.exists()) {
                Some(p) => Self::from_file(&p)?,
                None => Self::default(),
            },
        };

        if let Ok(password) = env::var(PASSWORD_ENV) {
            settings.database.set_password(password);
        }
        Ok(settings)
    }

    /// Parse a TOML settings file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let settings = Self::from_toml(&text)?;
        tracing::debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Parse settings from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

// ---------------------------------------------------------------------------
// DatabaseConfig
// ---------------------------------------------------------------------------

/// Where the basket and PnL tables live.
///
/// Every backend is opened through DuckDB; MySQL is attached read-only via
/// DuckDB's `mysql` extension.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DatabaseConfig {
    /// A fresh in-memory database. Only useful for tests and demos.
    Memory,
    /// A DuckDB database file, opened read-only.
    DuckDb { path: PathBuf },
    /// A MySQL server attached read-only.
    MySql(MySqlConfig),
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        DatabaseConfig::DuckDb {
            path: PathBuf::from(DEFAULT_DUCKDB_PATH),
        }
    }
}

impl DatabaseConfig {
    fn set_password(&mut self, password: String) {
        if let DatabaseConfig::MySql(mysql) = self {
            mysql.password = Some(password);
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MySqlConfig {
    pub host: String,
    #[serde(default = "default_mysql_port")]
    pub port: u16,
    pub user: String,
    #[serde(default, skip_serializing)]
    pub password: Option<String>,
    pub database: String,
}

fn default_mysql_port() -> u16 {
    3306
}

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

/// Names of the two source tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tables {
    pub baskets: String,
    pub pnl: String,
}

impl Default for Tables {
    fn default() -> Self {
        Self {
            baskets: DEFAULT_BASKET_TABLE.to_string(),
            pnl: DEFAULT_PNL_TABLE.to_string(),
        }
    }
}

/// Column names in the basket reference table and the PnL snapshot table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Columns {
    pub name: String,
    pub category: String,
    pub owned: String,
    pub status: String,
    pub date: String,
    pub time: String,
}

impl Default for Columns {
    fn default() -> Self {
        Self {
            name: "BASKETNAME".to_string(),
            category: "CATEGORY".to_string(),
            owned: "OWNED".to_string(),
            status: "STATUS".to_string(),
            date: "VDATE".to_string(),
            time: "VTIME".to_string(),
        }
    }
}

/// Cell values that select baskets into groups. Matching is exact.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    pub intraday: String,
    pub daily: String,
    pub paper: String,
    pub active: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            intraday: "INTRA".to_string(),
            daily: "DAILY".to_string(),
            paper: "PAPER".to_string(),
            active: "1".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// ServerConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub title: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("basket-pnl").join("config.toml"))
}

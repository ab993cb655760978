//! Live basket PnL dashboard.
//!
//! Reads the basket reference table and the latest row of the PnL snapshot
//! table, then totals PnL for intraday, daily and paper baskets. The tables
//! are queried through DuckDB, either from a local DuckDB file or from a
//! MySQL server attached read-only.
//!
//! # Quick start
//!
//! ```no_run
//! use basket_pnl::{Outcome, PnlDashboard};
//!
//! let dashboard = PnlDashboard::builder().build().unwrap();
//! let report = dashboard.report();
//!
//! match &report.outcome {
//!     Outcome::Ready { summary } => println!("total live PnL: {}", summary.total_live),
//!     Outcome::NoData { reason } => println!("{reason}"),
//! }
//! for notice in &report.notices {
//!     eprintln!("{:?}: {}", notice.level, notice.message);
//! }
//! ```

pub mod aggregate;
#[cfg(feature = "async")]
pub mod async_client;
pub mod config;
pub mod connection;
pub mod error;
pub mod models;
pub mod queries;
#[cfg(feature = "server")]
pub mod server;
pub mod source;
pub mod sql_builder;

#[cfg(feature = "async")]
pub use async_client::AsyncPnlDashboard;
pub use config::{Columns, DatabaseConfig, Labels, Settings, Tables};
pub use connection::{Connection, Row};
pub use error::{PnlError, Result};
pub use models::{BasketPnl, NoData, Notice, NoticeLevel, Outcome, PnlSummary, Report};
pub use source::Explorer;
pub use sql_builder::SqlBuilder;

use std::fmt;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// PnlDashboardBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`PnlDashboard`].
///
/// Use [`PnlDashboard::builder()`] to obtain a builder. Without a config file
/// or explicit settings, [`Settings::load`] decides where settings come from.
#[derive(Default)]
pub struct PnlDashboardBuilder {
    config_path: Option<PathBuf>,
    settings: Option<Settings>,
    database: Option<DatabaseConfig>,
}

impl PnlDashboardBuilder {
    /// Read settings from this TOML file.
    pub fn config_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Use these settings as-is, skipping file lookup.
    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Override the database target from the settings.
    pub fn database(mut self, database: DatabaseConfig) -> Self {
        self.database = Some(database);
        self
    }

    /// Resolve settings and build the dashboard.
    ///
    /// Does not connect; a connection is opened per [`report()`](PnlDashboard::report).
    pub fn build(self) -> Result<PnlDashboard> {
        let mut settings = match self.settings {
            Some(settings) => settings,
            None => Settings::load(self.config_path.as_deref())?,
        };
        if let Some(database) = self.database {
            settings.database = database;
        }
        Ok(PnlDashboard { settings })
    }
}

// ---------------------------------------------------------------------------
// PnlDashboard
// ---------------------------------------------------------------------------

/// Runs the fetch → filter → sum pipeline.
///
/// Holds only settings. Each [`report()`](Self::report) opens its own
/// connection, so no state carries over between runs.
#[derive(Debug, Clone)]
pub struct PnlDashboard {
    settings: Settings,
}

impl PnlDashboard {
    /// Create a new builder for configuring the dashboard.
    pub fn builder() -> PnlDashboardBuilder {
        PnlDashboardBuilder::default()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Open a fresh explorer against the configured database.
    pub fn explorer(&self) -> Explorer {
        Explorer::connect(&self.settings.database)
    }

    /// Run the whole pipeline once.
    ///
    /// Never fails: connection and query problems appear as notices and the
    /// outcome falls back to [`Outcome::NoData`].
    pub fn report(&self) -> Report {
        let explorer = self.explorer();
        self.report_with(&explorer)
    }

    /// Run the pipeline against an existing explorer.
    pub fn report_with(&self, explorer: &Explorer) -> Report {
        let settings = &self.settings;

        let baskets = explorer.fetch_baskets(&settings.tables.baskets);
        // The snapshot is only worth fetching when there are baskets to price
        let snapshot = if baskets.is_empty() {
            Vec::new()
        } else {
            explorer.fetch_latest(&settings.tables.pnl, &settings.columns)
        };

        let mut report =
            aggregate::summarize(&baskets, &snapshot, &settings.columns, &settings.labels);

        let mut notices = explorer.take_notices();
        notices.append(&mut report.notices);
        report.notices = notices;
        report
    }

    /// Execute a raw, parameterless SQL query.
    ///
    /// Escape hatch for inspecting the source tables. Failures are returned
    /// as notices alongside an empty row set.
    pub fn sql(&self, query: &str) -> (Vec<Row>, Vec<Notice>) {
        let explorer = self.explorer();
        let rows = explorer.fetch_all(query);
        (rows, explorer.take_notices())
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for PnlDashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let target = match &self.settings.database {
            DatabaseConfig::Memory => "memory".to_string(),
            DatabaseConfig::DuckDb { path } => format!("duckdb:{}", path.display()),
            DatabaseConfig::MySql(m) => format!("mysql://{}@{}:{}/{}", m.user, m.host, m.port, m.database),
        };
        write!(
            f,
            "PnlDashboard(database={}, baskets={}, pnl={})",
            target, self.settings.tables.baskets, self.settings.tables.pnl
        )
    }
}

//! Async wrapper around [`PnlDashboard`] for use in async runtimes (Tokio, etc.).
//!
//! Every pipeline run is blocking (DuckDB calls and, for MySQL, network round
//! trips), so runs are dispatched to tokio's blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free.
//!
//! # Example
//!
//! ```no_run
//! use basket_pnl::{AsyncPnlDashboard, PnlDashboard};
//!
//! #[tokio::main]
//! async fn main() {
//!     let dashboard = AsyncPnlDashboard::new(PnlDashboard::builder().build().unwrap());
//!     let report = dashboard.report().await.unwrap();
//!     println!("{} notices", report.notices.len());
//! }
//! ```

use std::sync::Arc;

use crate::error::Result;
use crate::models::Report;
use crate::{PnlDashboard, Settings};

/// Async wrapper around [`PnlDashboard`].
///
/// Cheap to clone; clones share the same settings.
#[derive(Clone)]
pub struct AsyncPnlDashboard {
    inner: Arc<PnlDashboard>,
}

impl AsyncPnlDashboard {
    pub fn new(dashboard: PnlDashboard) -> Self {
        Self {
            inner: Arc::new(dashboard),
        }
    }

    pub fn settings(&self) -> &Settings {
        self.inner.settings()
    }

    /// Run a sync dashboard operation on the blocking thread pool.
    ///
    /// Only fails if the blocking task panics or is cancelled.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&PnlDashboard) -> T + Send + 'static,
        T: Send + 'static,
    {
        let dashboard = self.inner.clone();
        Ok(tokio::task::spawn_blocking(move || f(&dashboard)).await?)
    }

    /// Run the whole pipeline once.
    pub async fn report(&self) -> Result<Report> {
        self.run(|d| d.report()).await
    }
}

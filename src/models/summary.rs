use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::basket::BasketPnl;
use super::notice::Notice;

const SNAPSHOT_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M"];

// ---------------------------------------------------------------------------
// SnapshotTime: When the latest PnL row was computed
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotTime {
    /// The date and time cells joined by a space, as stored.
    pub raw: String,
    /// The parsed timestamp, when the cells are in a recognized format.
    pub at: Option<NaiveDateTime>,
}

impl SnapshotTime {
    pub fn from_parts(date: &str, time: &str) -> Self {
        let raw = format!("{date} {time}");
        // DATETIME-typed date columns carry a midnight time part of their own
        let day = date.split_whitespace().next().unwrap_or(date);
        let candidate = format!("{day} {}", time.trim());
        let at = SNAPSHOT_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(&candidate, fmt).ok());
        Self { raw, at }
    }
}

impl fmt::Display for SnapshotTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.at {
            Some(at) => write!(f, "{}", at.format("%d-%m-%Y, %H:%M")),
            None => f.write_str(&self.raw),
        }
    }
}

// ---------------------------------------------------------------------------
// PnlSummary: Group totals and per-basket breakdowns
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PnlSummary {
    pub live_intra: f64,
    pub live_daily: f64,
    /// `live_intra + live_daily`.
    pub total_live: f64,
    pub paper: f64,
    pub last_update: SnapshotTime,
    /// Sorted by PnL, highest first.
    pub intra_baskets: Vec<BasketPnl>,
    /// Sorted by PnL, highest first.
    pub daily_baskets: Vec<BasketPnl>,
    /// Sorted by PnL, highest first.
    pub paper_baskets: Vec<BasketPnl>,
}

// ---------------------------------------------------------------------------
// Outcome / Report
// ---------------------------------------------------------------------------

/// Which input was empty when no summary could be produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoData {
    Baskets,
    Pnl,
}

impl fmt::Display for NoData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoData::Baskets => f.write_str("No basket data found."),
            NoData::Pnl => f.write_str("No PnL data found."),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    #[serde(rename = "ok")]
    Ready { summary: PnlSummary },
    NoData { reason: NoData },
}

impl Outcome {
    pub fn summary(&self) -> Option<&PnlSummary> {
        match self {
            Outcome::Ready { summary } => Some(summary),
            Outcome::NoData { .. } => None,
        }
    }
}

/// The result of one pipeline run: the outcome plus every notice raised on
/// the way.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    #[serde(flatten)]
    pub outcome: Outcome,
    pub notices: Vec<Notice>,
}

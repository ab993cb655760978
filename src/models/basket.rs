use serde::{Deserialize, Serialize};

use super::cell::cell_text;
use crate::config::{Columns, Labels};
use crate::connection::Row;

// ---------------------------------------------------------------------------
// Basket: One row of the basket reference table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Basket {
    pub name: String,
    pub category: Option<String>,
    pub owned: Option<String>,
    pub status: Option<String>,
}

impl Basket {
    /// Read a basket from a reference-table row.
    ///
    /// Returns `None` when the row has no usable name.
    pub fn from_row(row: &Row, columns: &Columns) -> Option<Self> {
        let text = |col: &str| row.get(col).and_then(cell_text);
        let name = text(&columns.name).filter(|n| !n.is_empty())?;
        Some(Self {
            name,
            category: text(&columns.category),
            owned: text(&columns.owned),
            status: text(&columns.status),
        })
    }

    pub fn is_active(&self, labels: &Labels) -> bool {
        self.status.as_deref() == Some(labels.active.as_str())
    }

    pub fn is_intraday(&self, labels: &Labels) -> bool {
        self.category.as_deref() == Some(labels.intraday.as_str())
    }

    pub fn is_daily(&self, labels: &Labels) -> bool {
        self.category.as_deref() == Some(labels.daily.as_str())
    }

    pub fn is_paper(&self, labels: &Labels) -> bool {
        self.owned.as_deref() == Some(labels.paper.as_str())
    }
}

// ---------------------------------------------------------------------------
// BasketPnl: A basket's figure from the latest snapshot
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasketPnl {
    pub name: String,
    pub category: Option<String>,
    pub pnl: f64,
}

//! PnL aggregation over the basket reference table and the latest snapshot.
//!
//! Active baskets are split into three groups that may overlap: intraday,
//! daily (by category) and paper (by ownership). Each basket's figure is the
//! snapshot cell in the column named after it, or zero when the snapshot has
//! no such column.

use std::cmp::Ordering;

use crate::config::{Columns, Labels};
use crate::connection::Row;
use crate::models::cell::{cell_number, cell_text};
use crate::models::{Basket, BasketPnl, NoData, Notice, Outcome, PnlSummary, Report, SnapshotTime};

/// Aggregate one snapshot.
///
/// `snapshot` is expected to hold the single latest PnL row; only its first
/// row is read. An empty basket table or an empty snapshot produces
/// [`Outcome::NoData`] rather than an error.
pub fn summarize(baskets: &[Row], snapshot: &[Row], columns: &Columns, labels: &Labels) -> Report {
    if baskets.is_empty() {
        tracing::warn!("basket table is empty");
        return no_data(NoData::Baskets);
    }
    let Some(latest) = snapshot.first() else {
        tracing::warn!("PnL snapshot is empty");
        return no_data(NoData::Pnl);
    };

    let mut notices = Vec::new();

    let text = |col: &str| latest.get(col).and_then(cell_text).unwrap_or_default();
    let last_update = SnapshotTime::from_parts(&text(&columns.date), &text(&columns.time));

    let active: Vec<Basket> = baskets
        .iter()
        .filter_map(|row| Basket::from_row(row, columns))
        .filter(|basket| basket.is_active(labels))
        .collect();

    let mut intra_baskets = Vec::new();
    let mut daily_baskets = Vec::new();
    let mut paper_baskets = Vec::new();

    for basket in &active {
        let entry = BasketPnl {
            name: basket.name.clone(),
            category: basket.category.clone(),
            pnl: basket_pnl(latest, &basket.name, &mut notices),
        };
        if basket.is_intraday(labels) {
            intra_baskets.push(entry.clone());
        }
        if basket.is_daily(labels) {
            daily_baskets.push(entry.clone());
        }
        if basket.is_paper(labels) {
            paper_baskets.push(entry);
        }
    }

    let live_intra = group_total(&intra_baskets);
    let live_daily = group_total(&daily_baskets);
    let paper = group_total(&paper_baskets);

    sort_by_pnl_desc(&mut intra_baskets);
    sort_by_pnl_desc(&mut daily_baskets);
    sort_by_pnl_desc(&mut paper_baskets);

    tracing::info!(
        baskets = baskets.len(),
        active = active.len(),
        live_intra,
        live_daily,
        paper,
        last_update = %last_update.raw,
        "summarized PnL snapshot"
    );

    Report {
        outcome: Outcome::Ready {
            summary: PnlSummary {
                live_intra,
                live_daily,
                total_live: live_intra + live_daily,
                paper,
                last_update,
                intra_baskets,
                daily_baskets,
                paper_baskets,
            },
        },
        notices,
    }
}

fn no_data(reason: NoData) -> Report {
    Report {
        outcome: Outcome::NoData { reason },
        notices: Vec::new(),
    }
}

/// Look up a basket's column in the snapshot row. A missing column is zero;
/// a non-numeric cell is zero plus a warning.
fn basket_pnl(latest: &Row, name: &str, notices: &mut Vec<Notice>) -> f64 {
    let Some(cell) = latest.get(name) else {
        return 0.0;
    };
    match cell_number(cell) {
        Some(pnl) => pnl,
        None => {
            tracing::warn!(basket = name, value = %cell, "non-numeric PnL cell");
            notices.push(Notice::warning(format!(
                "PnL for basket {name} is not numeric ({cell}); counted as 0."
            )));
            0.0
        }
    }
}

/// Folds from `+0.0`; `Iterator::sum` on an empty `f64` iterator yields `-0.0`.
fn group_total(group: &[BasketPnl]) -> f64 {
    group.iter().fold(0.0, |acc, b| acc + b.pnl)
}

/// Highest PnL first. Stable, so ties keep reference-table order.
fn sort_by_pnl_desc(group: &mut [BasketPnl]) {
    group.sort_by(|a, b| b.pnl.partial_cmp(&a.pnl).unwrap_or(Ordering::Equal));
}

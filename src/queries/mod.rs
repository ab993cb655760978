//! Read-only queries against the basket and PnL tables.
//!
//! Each query struct borrows a [`Connection`](crate::connection::Connection)
//! and returns rows as `HashMap<String, serde_json::Value>`.

pub mod baskets;
pub mod pnl;

pub use baskets::BasketQuery;
pub use pnl::PnlQuery;

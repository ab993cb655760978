//! Minimal SELECT builder for the dashboard's read-only queries.
//!
//! Table and column names come from configuration, so every identifier is
//! validated before it is placed in SQL text. Builder methods return
//! `&mut Self` for chaining.
//!
//! # Example
//!
//! ```rust
//! use basket_pnl::SqlBuilder;
//! let sql = SqlBuilder::new("pnlhtts")
//!     .unwrap()
//!     .order_by_desc(&["VDATE", "VTIME"])
//!     .unwrap()
//!     .limit(1)
//!     .build();
//! assert_eq!(sql, "SELECT *\nFROM pnlhtts\nORDER BY VDATE DESC, VTIME DESC\nLIMIT 1");
//! ```

use crate::error::{PnlError, Result};

/// Check that `name` is a plain SQL identifier, optionally schema-qualified.
///
/// Accepts ASCII letters, digits and `_`, not starting with a digit, with at
/// most one `.` separating schema and table.
pub fn validate_identifier(name: &str) -> Result<&str> {
    let parts: Vec<&str> = name.split('.').collect();
    let valid = parts.len() <= 2
        && parts.iter().all(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
                }
                _ => false,
            }
        });

    if valid {
        Ok(name)
    } else {
        Err(PnlError::InvalidArgument(format!(
            "not a valid SQL identifier: {name:?}"
        )))
    }
}

/// Builds `SELECT *` statements from validated identifiers.
pub struct SqlBuilder {
    from_table: String,
    order_by_cols: Vec<String>,
    limit_val: Option<usize>,
}

impl SqlBuilder {
    /// Create a builder targeting the given table.
    pub fn new(table: &str) -> Result<Self> {
        Ok(Self {
            from_table: validate_identifier(table)?.to_string(),
            order_by_cols: Vec::new(),
            limit_val: None,
        })
    }

    /// Order by each column descending, in the given priority.
    pub fn order_by_desc(&mut self, cols: &[&str]) -> Result<&mut Self> {
        for col in cols {
            let col = validate_identifier(col)?;
            self.order_by_cols.push(format!("{col} DESC"));
        }
        Ok(self)
    }

    /// Set the maximum number of rows to return.
    pub fn limit(&mut self, n: usize) -> &mut Self {
        self.limit_val = Some(n);
        self
    }

    /// Build the final SQL string.
    pub fn build(&self) -> String {
        let mut parts = vec![
            "SELECT *".to_string(),
            format!("FROM {}", self.from_table),
        ];

        if !self.order_by_cols.is_empty() {
            parts.push(format!("ORDER BY {}", self.order_by_cols.join(", ")));
        }

        if let Some(n) = self.limit_val {
            parts.push(format!("LIMIT {n}"));
        }

        parts.join("\n")
    }
}

//! Database models
//!
//! Row shapes of the `statements` table and the column changes an update
//! applies to it.

use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::helpers::deposit_date_format;

// =============================================================================
// STATEMENT DOMAIN
// =============================================================================

#[derive(Debug, Clone, PartialEq, FromRow, Deserialize, Serialize)]
pub struct Statement {
    pub dp_id: String,
    pub amount: BigDecimal,
    #[serde(with = "deposit_date_format")]
    pub deposit_date: Option<NaiveDateTime>,
    pub owner_name: Option<String>,
    pub depositor_name: Option<String>,
    pub bank_name: Option<String>,
    pub reconciliation: Option<String>,
    pub ref_number: Option<String>,
    pub deposit_number: Option<String>,
    pub account_type: Option<String>,
    pub comment: Option<String>,
}

/// Columns written by an update. `None` keeps the stored value;
/// `deposit_date` is never part of an update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatementChanges {
    pub dp_id: Option<String>,
    pub amount: Option<BigDecimal>,
    pub owner_name: Option<String>,
    pub depositor_name: Option<String>,
    pub bank_name: Option<String>,
    pub reconciliation: Option<String>,
    pub ref_number: Option<String>,
    pub deposit_number: Option<String>,
    pub account_type: Option<String>,
    pub comment: Option<String>,
}

impl StatementChanges {
    /// Applies the changes onto a row, the way the update statement does.
    pub fn apply(&self, row: &mut Statement) {
        fn set(target: &mut Option<String>, value: &Option<String>) {
            if value.is_some() {
                target.clone_from(value);
            }
        }

        if let Some(dp_id) = &self.dp_id {
            row.dp_id.clone_from(dp_id);
        }
        if let Some(amount) = &self.amount {
            row.amount.clone_from(amount);
        }
        set(&mut row.owner_name, &self.owner_name);
        set(&mut row.depositor_name, &self.depositor_name);
        set(&mut row.bank_name, &self.bank_name);
        set(&mut row.reconciliation, &self.reconciliation);
        set(&mut row.ref_number, &self.ref_number);
        set(&mut row.deposit_number, &self.deposit_number);
        set(&mut row.account_type, &self.account_type);
        set(&mut row.comment, &self.comment);
    }
}

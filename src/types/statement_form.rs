use std::str::FromStr;

use bigdecimal::BigDecimal;
use serde::Deserialize;

use crate::{
    error::Error,
    helpers::{
        non_blank, parse_deposit_date, Intent, AMOUNT_MAX_INTEGER_DIGITS,
        AMOUNT_MAX_SCALE, DP_ID_LENGTH,
    },
    model::{Statement, StatementChanges},
};

/// Fields of a submitted statement form. Everything is optional on the
/// wire; what is required depends on the intent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatementForm {
    pub intent: Option<String>,
    pub dp_id: Option<String>,
    pub old_dp_id: Option<String>,
    pub amount: Option<String>,
    pub deposit_date: Option<String>,
    pub owner_name: Option<String>,
    pub depositor_name: Option<String>,
    pub bank_name: Option<String>,
    pub reconciliation: Option<String>,
    pub ref_number: Option<String>,
    pub deposit_number: Option<String>,
    pub account_type: Option<String>,
    pub comment: Option<String>,
}

impl StatementForm {
    pub fn intent(&self) -> Result<Intent, Error> {
        Intent::from_str(self.intent.as_deref().unwrap_or("").trim())
    }

    /// The pre-edit key targeted by update and delete.
    pub fn original_id(&self) -> Result<String, Error> {
        non_blank(&self.old_dp_id).ok_or_else(|| {
            Error::MissingParams(String::from("Missing original DP ID"))
        })
    }

    /// Validates a create request. Checks run in a fixed order and the
    /// first failing one is reported.
    pub fn to_new_statement(&self) -> Result<Statement, Error> {
        let dp_id = parse_dp_id(self.dp_id.as_deref().unwrap_or(""))?;
        let amount = parse_amount(self.amount.as_deref().unwrap_or(""))?;

        let deposit_date = non_blank(&self.deposit_date).ok_or_else(|| {
            Error::Validation(String::from("Deposit date is required"))
        })?;

        let descriptive = [
            &self.owner_name,
            &self.depositor_name,
            &self.bank_name,
            &self.reconciliation,
            &self.ref_number,
            &self.deposit_number,
            &self.account_type,
            &self.comment,
        ];
        if descriptive.iter().any(|field| non_blank(field).is_none()) {
            return Err(Error::Validation(String::from(
                "All fields are required",
            )));
        }

        let deposit_date = parse_deposit_date(&deposit_date).ok_or_else(|| {
            Error::Validation(String::from("Invalid deposit date"))
        })?;

        Ok(Statement {
            dp_id,
            amount,
            deposit_date: Some(deposit_date),
            owner_name: non_blank(&self.owner_name),
            depositor_name: non_blank(&self.depositor_name),
            bank_name: non_blank(&self.bank_name),
            reconciliation: non_blank(&self.reconciliation),
            ref_number: non_blank(&self.ref_number),
            deposit_number: non_blank(&self.deposit_number),
            account_type: non_blank(&self.account_type),
            comment: non_blank(&self.comment),
        })
    }

    /// Builds the changes of an update request together with the key it
    /// targets. Fields left out of the form keep their stored value.
    pub fn to_changes(&self) -> Result<(String, StatementChanges), Error> {
        let original_id = self.original_id()?;

        let dp_id = self.dp_id.as_deref().map(parse_dp_id).transpose()?;
        let amount = self.amount.as_deref().map(parse_amount).transpose()?;

        let changes = StatementChanges {
            dp_id,
            amount,
            owner_name: trimmed(&self.owner_name),
            depositor_name: trimmed(&self.depositor_name),
            bank_name: trimmed(&self.bank_name),
            reconciliation: trimmed(&self.reconciliation),
            ref_number: trimmed(&self.ref_number),
            deposit_number: trimmed(&self.deposit_number),
            account_type: trimmed(&self.account_type),
            comment: trimmed(&self.comment),
        };

        Ok((original_id, changes))
    }
}

fn parse_dp_id(value: &str) -> Result<String, Error> {
    let value = value.trim();
    if value.chars().count() != DP_ID_LENGTH {
        return Err(Error::Validation(format!(
            "DP ID must be {} characters",
            DP_ID_LENGTH
        )));
    }
    Ok(value.to_owned())
}

fn parse_amount(value: &str) -> Result<BigDecimal, Error> {
    let invalid =
        || Error::Validation(String::from("Amount must be a valid number"));

    let amount = BigDecimal::from_str(value.trim()).map_err(|_| invalid())?;

    // A negative scale is a positive power of ten, e.g. `1e5`.
    let (_, scale) = amount.as_bigint_and_exponent();
    let digits = i64::try_from(amount.digits()).map_err(|_| invalid())?;
    let integer_digits = digits.saturating_sub(scale);

    if scale > AMOUNT_MAX_SCALE || integer_digits > AMOUNT_MAX_INTEGER_DIGITS {
        return Err(invalid());
    }

    Ok(amount)
}

fn trimmed(value: &Option<String>) -> Option<String> {
    value.as_deref().map(|v| v.trim().to_owned())
}

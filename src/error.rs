use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{Action, FundId};

pub type Result<T> = std::result::Result<T, LedgerError>;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Malformed record in {source_name} at line {line}: {message}")]
    Format {
        source_name: String,
        line: usize,
        message: String,
    },

    #[error(
        "Erroneous transaction at statement line {line} '{row}': for fund {fund_id} on {date} units {units} x price {price} does not match amount {amount}"
    )]
    TransactionConsistency {
        line: usize,
        row: String,
        date: NaiveDate,
        fund_id: FundId,
        units: Decimal,
        price: Decimal,
        amount: Decimal,
    },

    #[error("For fund {fund_id} expected total units {stated}, calculated total units {counted}")]
    BlockTotalMismatch {
        fund_id: FundId,
        stated: Decimal,
        counted: Decimal,
    },

    #[error("Fund {fund_id} has SELL of {units} units ({amount}) on {date} without an open position")]
    SellWithoutPriorPosition {
        date: NaiveDate,
        fund_id: FundId,
        units: Decimal,
        amount: Decimal,
    },

    #[error("Cannot net {existing} {existing_units}/{existing_amount} with {new} {new_units}/{new_amount} for fund {fund_id} on {date}")]
    Netting {
        date: NaiveDate,
        fund_id: FundId,
        existing: Action,
        existing_units: Decimal,
        existing_amount: Decimal,
        new: Action,
        new_units: Decimal,
        new_amount: Decimal,
    },

    #[error("Fatal configuration error: {0}")]
    FatalConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl LedgerError {
    pub fn format(source_name: &str, line: usize, message: impl Into<String>) -> Self {
        LedgerError::Format {
            source_name: source_name.to_string(),
            line,
            message: message.into(),
        }
    }
}

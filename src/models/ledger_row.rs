use chrono::NaiveDate;
use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use serde::Serialize;

use super::{Action, FundId};

pub const LEDGER_HEADER: [&str; 9] = [
    "Date",
    "Fund ID",
    "Action",
    "Units",
    "Price",
    "Amount",
    "Total Units",
    "Total Cost",
    "Total Value",
];

/// One replayed day for one fund. Transaction columns are empty on days
/// without activity, and `total_value` is empty when no price is known.
#[derive(Clone, Debug, Getters, PartialEq, Serialize, new)]
pub struct LedgerRow {
    #[serde(rename = "Date")]
    date: NaiveDate,
    #[serde(rename = "Fund ID")]
    fund_id: FundId,
    #[serde(rename = "Action")]
    action: Option<Action>,
    #[serde(rename = "Units")]
    units: Option<Decimal>,
    #[serde(rename = "Price")]
    price: Option<Decimal>,
    #[serde(rename = "Amount")]
    amount: Option<Decimal>,
    #[serde(rename = "Total Units")]
    total_units: Decimal,
    #[serde(rename = "Total Cost")]
    total_cost: Decimal,
    #[serde(rename = "Total Value")]
    total_value: Option<Decimal>,
}

use chrono::NaiveDate;
use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use serde::Serialize;
use strum_macros::Display;

use crate::config::INGESTION_TOLERANCE;

use super::FundId;

/// A single fund purchase or redemption. Rows read from a statement carry
/// magnitudes with the direction in `action`; a same-day net can leave
/// negative units when fees skew amounts against units.
#[derive(Clone, Debug, Getters, PartialEq, new)]
pub struct Transaction {
    date: NaiveDate,
    fund_id: FundId,
    action: Action,
    units: Decimal,
    price: Decimal,
    amount: Decimal,
}

impl Transaction {
    /// Whether units x price lies within the ingestion tolerance of the
    /// stated amount.
    pub fn is_consistent(&self) -> bool {
        (self.units * self.price - self.amount).abs() < INGESTION_TOLERANCE
    }

    pub fn signed_units(&self) -> Decimal {
        match self.action {
            Action::Buy => self.units,
            Action::Sell => -self.units,
        }
    }
}

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq, Serialize)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    Buy,
    Sell,
}

impl Action {
    pub fn from_units_sign(negative: bool) -> Self {
        if negative { Action::Sell } else { Action::Buy }
    }
}

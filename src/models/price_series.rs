use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::FundId;

/// Daily prices (NAV) for a single fund.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PriceSeries {
    fund_id: FundId,
    prices: BTreeMap<NaiveDate, Decimal>,
}

impl PriceSeries {
    pub fn new(fund_id: FundId) -> Self {
        Self {
            fund_id,
            prices: BTreeMap::new(),
        }
    }

    pub fn fund_id(&self) -> FundId {
        self.fund_id
    }

    pub fn insert(&mut self, date: NaiveDate, price: Decimal) {
        self.prices.insert(date, price);
    }

    pub fn price_on(&self, date: NaiveDate) -> Option<Decimal> {
        self.prices.get(&date).copied()
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

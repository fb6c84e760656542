use std::collections::{BTreeMap, btree_map::Entry};

use chrono::NaiveDate;
use tracing::debug;

use crate::{
    app::netting::{self, NetOutcome},
    error::Result,
};

use super::{FundId, Transaction};

/// Transactions keyed by date and fund, holding at most one entry per key.
///
/// Entries only enter through [`TransactionLedger::net_in`], which folds a new
/// transaction into whatever is already stored for its key.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransactionLedger {
    days: BTreeMap<NaiveDate, BTreeMap<FundId, Transaction>>,
}

impl TransactionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn net_in(&mut self, transaction: Transaction) -> Result<NetOutcome> {
        let date = *transaction.date();
        let fund_id = *transaction.fund_id();
        let day = self.days.entry(date).or_default();

        let outcome = match day.entry(fund_id) {
            Entry::Vacant(slot) => {
                slot.insert(transaction);
                NetOutcome::Inserted
            }
            Entry::Occupied(mut slot) => {
                let netted = netting::combine(slot.get(), &transaction)?;
                let outcome = netted.outcome();
                match netted.into_transaction() {
                    Some(combined) => {
                        debug!(%date, fund_id, %outcome, combined = ?combined, "Combined transactions");
                        slot.insert(combined);
                    }
                    None => {
                        debug!(%date, fund_id, "Deleted both transactions of a pair");
                        slot.remove();
                    }
                }
                outcome
            }
        };

        if day.is_empty() {
            self.days.remove(&date);
        }

        Ok(outcome)
    }

    pub fn get(&self, date: NaiveDate, fund_id: FundId) -> Option<&Transaction> {
        self.days.get(&date)?.get(&fund_id)
    }

    pub fn day(&self, date: NaiveDate) -> Option<&BTreeMap<FundId, Transaction>> {
        self.days.get(&date)
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.days.keys().next().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.days.keys().next_back().copied()
    }

    pub fn len(&self) -> usize {
        self.days.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

//! Same-day netting of two transactions for one fund.
//!
//! | existing | new  | result                                              |
//! |----------|------|-----------------------------------------------------|
//! | BUY      | BUY  | merged: units and amount summed, price re-derived   |
//! | SELL     | SELL | merged: units and amount summed, price re-derived   |
//! | BUY      | SELL | larger amount keeps its action, minus the smaller   |
//! | SELL     | BUY  | larger amount keeps its action, minus the smaller   |
//!
//! Opposite actions with equal amounts cancel out completely. The netted units
//! may be negative; a net of exactly zero units with unequal amounts is an error.

use std::cmp::Ordering;

use rust_decimal::Decimal;
use strum_macros::Display;

use crate::{
    app::calc,
    error::{LedgerError, Result},
    models::{Action, Transaction},
};

#[derive(Clone, Debug, PartialEq)]
pub enum Netted {
    Merged(Transaction),
    Reduced(Transaction),
    Flipped(Transaction),
    Cancelled,
}

impl Netted {
    pub fn outcome(&self) -> NetOutcome {
        match self {
            Netted::Merged(_) => NetOutcome::Merged,
            Netted::Reduced(_) => NetOutcome::Reduced,
            Netted::Flipped(_) => NetOutcome::Flipped,
            Netted::Cancelled => NetOutcome::Cancelled,
        }
    }

    pub fn into_transaction(self) -> Option<Transaction> {
        match self {
            Netted::Merged(t) | Netted::Reduced(t) | Netted::Flipped(t) => Some(t),
            Netted::Cancelled => None,
        }
    }
}

/// What happened to a ledger key when a transaction was netted into it.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum NetOutcome {
    Inserted,
    Merged,
    Reduced,
    Flipped,
    Cancelled,
}

/// Combines two transactions sharing a (date, fund) key into at most one.
pub fn combine(existing: &Transaction, new: &Transaction) -> Result<Netted> {
    debug_assert_eq!(existing.date(), new.date());
    debug_assert_eq!(existing.fund_id(), new.fund_id());

    match (*existing.action(), *new.action()) {
        (Action::Buy, Action::Buy) | (Action::Sell, Action::Sell) => {
            let units = existing.units() + new.units();
            let amount = existing.amount() + new.amount();
            rebuild(existing, new, *existing.action(), units, amount).map(Netted::Merged)
        }
        (Action::Buy, Action::Sell) | (Action::Sell, Action::Buy) => {
            match existing.amount().cmp(new.amount()) {
                Ordering::Greater => rebuild(
                    existing,
                    new,
                    *existing.action(),
                    existing.units() - new.units(),
                    existing.amount() - new.amount(),
                )
                .map(Netted::Reduced),
                Ordering::Less => rebuild(
                    existing,
                    new,
                    *new.action(),
                    new.units() - existing.units(),
                    new.amount() - existing.amount(),
                )
                .map(Netted::Flipped),
                Ordering::Equal => Ok(Netted::Cancelled),
            }
        }
    }
}

fn rebuild(
    existing: &Transaction,
    new: &Transaction,
    action: Action,
    units: Decimal,
    amount: Decimal,
) -> Result<Transaction> {
    // Units can come out negative when fees skew amounts against units;
    // only a zero leaves no price to derive.
    let price = calc::unit_price(amount, units).ok_or_else(|| LedgerError::Netting {
        date: *existing.date(),
        fund_id: *existing.fund_id(),
        existing: *existing.action(),
        existing_units: *existing.units(),
        existing_amount: *existing.amount(),
        new: *new.action(),
        new_units: *new.units(),
        new_amount: *new.amount(),
    })?;

    Ok(Transaction::new(
        *existing.date(),
        *existing.fund_id(),
        action,
        units,
        price,
        amount,
    ))
}

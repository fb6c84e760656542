use std::collections::{BTreeMap, HashMap, hash_map::Entry};

use chrono::NaiveDate;
use derive_getters::Getters;
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::{
    app::calc,
    config::LIQUIDATION_THRESHOLD,
    error::{LedgerError, Result},
    models::{Action, FundId, LedgerRow, Position, PriceSeries, Transaction, TransactionLedger},
    store::PriceSeriesProvider,
};

/// Destination for replayed rows, written as soon as each one is produced.
pub trait LedgerSink {
    fn write_row(&mut self, row: &LedgerRow) -> Result<()>;
}

impl LedgerSink for Vec<LedgerRow> {
    fn write_row(&mut self, row: &LedgerRow) -> Result<()> {
        self.push(row.clone());
        Ok(())
    }
}

#[derive(Clone, Debug, Default, Getters, PartialEq)]
pub struct ReplaySummary {
    first_date: Option<NaiveDate>,
    days: usize,
    rows: usize,
    /// Holdings still open after the last replayed day.
    open_positions: BTreeMap<FundId, Position>,
}

/// Replays a transaction ledger one calendar day at a time.
pub struct LedgerReplayer<'a, P: PriceSeriesProvider> {
    prices: &'a P,
    series: HashMap<FundId, PriceSeries>,
}

impl<'a, P: PriceSeriesProvider> LedgerReplayer<'a, P> {
    pub fn new(prices: &'a P) -> Self {
        Self {
            prices,
            series: HashMap::new(),
        }
    }

    /// Emits one row per open fund for every day from the first transaction
    /// through `until`, inclusive.
    pub fn replay<S: LedgerSink>(
        &mut self,
        ledger: &TransactionLedger,
        until: NaiveDate,
        sink: &mut S,
    ) -> Result<ReplaySummary> {
        let Some(first_date) = ledger.first_date() else {
            warn!("No transactions to replay");
            return Ok(ReplaySummary::default());
        };

        if until < first_date {
            warn!(%first_date, %until, "Replay end precedes the first transaction");
        } else if let Some(last_date) = ledger.last_date().filter(|last| until < *last) {
            warn!(%last_date, %until, "Replay end precedes the last transaction, later ones are left out");
        }

        let mut positions: BTreeMap<FundId, Position> = BTreeMap::new();
        let mut days = 0usize;
        let mut rows = 0usize;
        let mut date = first_date;

        while date <= until {
            let today = ledger.day(date);

            if let Some(transactions) = today {
                for transaction in transactions.values() {
                    apply(&mut positions, transaction)?;
                }
            }

            let mut closed = Vec::new();
            for (fund_id, position) in &positions {
                let value = self
                    .price_on(*fund_id, date)?
                    .map(|price| calc::market_value(*position.units(), price));
                let transaction = today.and_then(|day| day.get(fund_id));

                let row = LedgerRow::new(
                    date,
                    *fund_id,
                    transaction.map(|t| *t.action()),
                    transaction.map(|t| *t.units()),
                    transaction.map(|t| *t.price()),
                    transaction.map(|t| *t.amount()),
                    calc::round(*position.units()),
                    calc::round(*position.cost_basis()),
                    value,
                );
                sink.write_row(&row)?;
                rows += 1;

                if position.units().abs() < LIQUIDATION_THRESHOLD {
                    closed.push(*fund_id);
                }
            }

            for fund_id in closed {
                positions.remove(&fund_id);
                info!(%date, fund_id, "Position fully redeemed");
            }

            days += 1;
            date = match date.succ_opt() {
                Some(next) => next,
                None => break,
            };
        }

        info!(%first_date, %until, days, rows, open = positions.len(), "Replayed transactions");

        Ok(ReplaySummary {
            first_date: Some(first_date),
            days,
            rows,
            open_positions: positions,
        })
    }

    fn price_on(&mut self, fund_id: FundId, date: NaiveDate) -> Result<Option<Decimal>> {
        let series = match self.series.entry(fund_id) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(self.prices.price_series(fund_id)?),
        };
        Ok(series.price_on(date))
    }
}

fn apply(positions: &mut BTreeMap<FundId, Position>, transaction: &Transaction) -> Result<()> {
    let fund_id = *transaction.fund_id();
    let units = *transaction.units();

    match transaction.action() {
        Action::Buy => {
            positions
                .entry(fund_id)
                .or_default()
                .buy(units, *transaction.amount());
        }
        Action::Sell => {
            let position = positions
                .get_mut(&fund_id)
                .ok_or_else(|| LedgerError::SellWithoutPriorPosition {
                    date: *transaction.date(),
                    fund_id,
                    units,
                    amount: *transaction.amount(),
                })?;

            if units - *position.units() > LIQUIDATION_THRESHOLD {
                warn!(
                    date = %transaction.date(),
                    fund_id,
                    held = %position.units(),
                    sold = %units,
                    "Sell exceeds held units"
                );
            }
            position.sell(units);
        }
    }

    Ok(())
}

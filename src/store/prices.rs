use std::{
    collections::HashMap,
    fs::File,
    io::{ErrorKind, Read},
    path::PathBuf,
};

use chrono::NaiveDate;
use csv::ReaderBuilder;
use tracing::{debug, warn};

use crate::{
    app::utils::parse_decimal,
    error::{LedgerError, Result},
    models::{FundId, PriceSeries},
};

/// Source of historical prices, one series per fund.
pub trait PriceSeriesProvider {
    fn price_series(&self, fund_id: FundId) -> Result<PriceSeries>;
}

impl PriceSeriesProvider for HashMap<FundId, PriceSeries> {
    fn price_series(&self, fund_id: FundId) -> Result<PriceSeries> {
        Ok(self
            .get(&fund_id)
            .cloned()
            .unwrap_or_else(|| PriceSeries::new(fund_id)))
    }
}

/// Reads `{dir}/{fund_id}.csv` files of `date,price[,...]` records.
#[derive(Clone, Debug)]
pub struct CsvPriceDirectory {
    dir: PathBuf,
}

impl CsvPriceDirectory {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, fund_id: FundId) -> PathBuf {
        self.dir.join(format!("{}.csv", fund_id))
    }
}

impl PriceSeriesProvider for CsvPriceDirectory {
    fn price_series(&self, fund_id: FundId) -> Result<PriceSeries> {
        let path = self.path_for(fund_id);
        debug!(path = %path.display(), "Reading prices");

        let file = match File::open(&path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                warn!(fund_id, path = %path.display(), "No price file, values will be unknown");
                return Ok(PriceSeries::new(fund_id));
            }
            Err(err) => return Err(err.into()),
        };

        read_price_series(file, fund_id, &path.display().to_string())
    }
}

/// Parses a price table. Extra columns after the price are ignored and a
/// blank price means no quote for that day.
pub fn read_price_series<R: Read>(reader: R, fund_id: FundId, source_name: &str) -> Result<PriceSeries> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut series = PriceSeries::new(fund_id);

    for record in reader.records() {
        let record = record?;
        let line = record.position().map(|p| p.line() as usize).unwrap_or_default();

        if record.len() < 2 {
            return Err(LedgerError::format(
                source_name,
                line,
                format!("expected date and price, found '{}'", record.iter().collect::<Vec<_>>().join(",")),
            ));
        }

        let date = NaiveDate::parse_from_str(record[0].trim(), "%Y-%m-%d").map_err(|_| {
            LedgerError::format(source_name, line, format!("invalid date '{}'", &record[0]))
        })?;

        let raw_price = record[1].trim();
        if raw_price.is_empty() {
            continue;
        }

        let price = parse_decimal(raw_price)
            .ok_or_else(|| LedgerError::format(source_name, line, format!("invalid price '{}'", raw_price)))?;

        series.insert(date, price);
    }

    Ok(series)
}

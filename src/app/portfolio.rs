use std::fs;

use chrono::NaiveDate;
use tracing::info;

use crate::{
    app::{
        matcher::NameMatcher,
        parser::StatementParser,
        replay::{LedgerReplayer, LedgerSink, ReplaySummary},
    },
    config::Config,
    error::Result,
    models::TransactionLedger,
    store::{CsvPriceDirectory, FundCatalog, LedgerWriter, PriceSeriesProvider},
};

/// One reconciliation run: catalog, statement, prices and output.
#[derive(Debug)]
pub struct Portfolio {
    matcher: NameMatcher,
}

impl Portfolio {
    pub fn new(catalog: FundCatalog, match_warn_distance: usize) -> Result<Self> {
        let matcher = NameMatcher::new(&catalog, match_warn_distance)?;
        Ok(Self { matcher })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let catalog = FundCatalog::from_path(config.catalog_path())?;
        Self::new(catalog, *config.match_warn_distance())
    }

    pub fn matcher(&self) -> &NameMatcher {
        &self.matcher
    }

    pub fn parse_statement(&self, text: &str) -> Result<TransactionLedger> {
        StatementParser::new(&self.matcher).parse(text)
    }

    pub fn replay<P, S>(
        &self,
        ledger: &TransactionLedger,
        prices: &P,
        until: NaiveDate,
        sink: &mut S,
    ) -> Result<ReplaySummary>
    where
        P: PriceSeriesProvider,
        S: LedgerSink,
    {
        LedgerReplayer::new(prices).replay(ledger, until, sink)
    }

    /// Parses the configured statement and writes the replayed ledger CSV.
    /// On error the output file may be left partially written.
    pub fn reconcile(&self, config: &Config, until: NaiveDate) -> Result<ReplaySummary> {
        let text = fs::read_to_string(config.statement_path())?;
        info!(path = %config.statement_path().display(), "Read statement");

        let ledger = self.parse_statement(&text)?;

        let prices = CsvPriceDirectory::new(config.price_dir());
        let mut writer = LedgerWriter::create(config.output_path())?;
        let summary = self.replay(&ledger, &prices, until, &mut writer)?;
        writer.flush()?;

        info!(path = %config.output_path().display(), rows = summary.rows(), "Wrote all transactions");
        Ok(summary)
    }
}

//! Run configuration and the numeric tolerances used during reconciliation.
//!
//! Environment variables (a `.env` file is honoured by the binary):
//! - FUND_LEDGER_CATALOG (default: static/csv/mf_code_names.csv)
//! - FUND_LEDGER_STATEMENT (default: Consolidated.txt)
//! - FUND_LEDGER_PRICE_DIR (default: static/csv)
//! - FUND_LEDGER_OUTPUT (default: static/csv/transactions.csv)
//! - FUND_LEDGER_MATCH_WARN_DISTANCE (default: 3)

use std::path::PathBuf;

use derive_getters::Getters;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::{LedgerError, Result};

/// Largest allowed gap between units x price and the stated amount of a row.
pub const INGESTION_TOLERANCE: Decimal = dec!(2);

/// Largest allowed gap between a block's counted units and its closing balance.
pub const BLOCK_TOLERANCE: Decimal = dec!(0.00001);

/// Holdings below this many units are treated as fully redeemed.
pub const LIQUIDATION_THRESHOLD: Decimal = dec!(0.001);

/// Decimal places kept for derived prices, totals and market values.
pub const ROUNDING_DP: u32 = 4;

const DEFAULT_CATALOG: &str = "static/csv/mf_code_names.csv";
const DEFAULT_STATEMENT: &str = "Consolidated.txt";
const DEFAULT_PRICE_DIR: &str = "static/csv";
const DEFAULT_OUTPUT: &str = "static/csv/transactions.csv";
const DEFAULT_MATCH_WARN_DISTANCE: usize = 3;

#[derive(Clone, Debug, Getters, PartialEq)]
pub struct Config {
    catalog_path: PathBuf,
    statement_path: PathBuf,
    price_dir: PathBuf,
    output_path: PathBuf,
    /// Name matches further than this symmetric difference are logged as suspicious.
    match_warn_distance: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = |key: &str, default: &str| -> PathBuf {
            let raw = lookup(key).unwrap_or_else(|| default.to_string());
            expand_path(&raw)
        };

        let match_warn_distance = match lookup("FUND_LEDGER_MATCH_WARN_DISTANCE") {
            Some(raw) => raw.trim().parse::<usize>().map_err(|_| {
                LedgerError::FatalConfig(format!(
                    "FUND_LEDGER_MATCH_WARN_DISTANCE must be a non-negative integer, got '{}'",
                    raw
                ))
            })?,
            None => DEFAULT_MATCH_WARN_DISTANCE,
        };

        Ok(Self {
            catalog_path: path("FUND_LEDGER_CATALOG", DEFAULT_CATALOG),
            statement_path: path("FUND_LEDGER_STATEMENT", DEFAULT_STATEMENT),
            price_dir: path("FUND_LEDGER_PRICE_DIR", DEFAULT_PRICE_DIR),
            output_path: path("FUND_LEDGER_OUTPUT", DEFAULT_OUTPUT),
            match_warn_distance,
        })
    }

    pub fn with_catalog_path(mut self, path: &str) -> Self {
        self.catalog_path = expand_path(path);
        self
    }

    pub fn with_statement_path(mut self, path: &str) -> Self {
        self.statement_path = expand_path(path);
        self
    }

    pub fn with_price_dir(mut self, path: &str) -> Self {
        self.price_dir = expand_path(path);
        self
    }

    pub fn with_output_path(mut self, path: &str) -> Self {
        self.output_path = expand_path(path);
        self
    }

    pub fn with_match_warn_distance(mut self, distance: usize) -> Self {
        self.match_warn_distance = distance;
        self
    }
}

fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw.trim()).into_owned())
}

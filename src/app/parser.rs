//! Consolidated account statement parser (text).
//!
//! Expected text after PDF-to-text conversion with layout preserved:
//!   Folio No : 91026529743 PAN: ABCDE1234F KYC : OK PAN : OK
//!   128CFGPG-Axis Liquid Fund - Growth (Advisor:ARN-84967) Registrar : KARVY
//!   Opening Unit Balance 0.000
//!   10-OCT-2016 Purchase 5,000.00 2.868 1,743.3603 2.868
//!   01-AUG-2018 Redemption (74,633.61) (37.937) 1,967.3039 0.000
//!   Closing Unit Balance: 0.000 NAV on 31-AUG-2018 : INR 1,978.7344

use std::sync::LazyLock;

use regex::{Captures, Regex};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::{
    app::{
        matcher::NameMatcher,
        utils::{parse_decimal, parse_statement_date},
    },
    config::BLOCK_TOLERANCE,
    error::{LedgerError, Result},
    models::{Action, FundId, Transaction, TransactionLedger},
};

const SOURCE_NAME: &str = "statement";

static FOLIO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*Folio\b").expect("folio pattern compiles"));

static REGISTRAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]+Registrar\b.*$").expect("registrar pattern compiles"));

// 128TSGPG-Axis Long Term Equity Fund - Growth (Advisor:ARN-84967)
// A scheme code either holds a digit or is glued to its hyphen.
static FUND_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^\s*(?:[A-Za-z0-9]*\d[A-Za-z0-9]*\s*-\s*|[A-Za-z0-9]+-\s*)?",
        r"(?P<name>.*?)\s*",
        r"(?:\(Advisor.*)?$"
    ))
    .expect("fund name pattern compiles")
});

static CLOSING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Closing\s+Unit\s+Balance.*?(?P<units>[\d,.]*\d)")
        .expect("closing balance pattern compiles")
});

static ROW_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^[ \t]*(?P<day>\d{2})-(?P<month>[A-Za-z]{3})-(?P<year>\d{4})[ \t]+",
        r"(?P<label>\w.*?)[ \t]+",
        r"(?P<amount_sign>[(-])?(?P<amount>[\d,.]+)\)?[ \t]+",
        r"(?P<units_sign>[(-])?(?P<units>[\d,.]+)\)?[ \t]+",
        r"(?P<price>[\d,.]+)[ \t]+",
        r"(?P<balance>[\d,.]+)[ \t]*$"
    ))
    .expect("transaction row pattern compiles")
});

/// Extracts the fund name from a block header line.
pub fn header_fund_name(line: &str) -> &str {
    let line = match REGISTRAR_RE.find(line) {
        Some(m) => &line[..m.start()],
        None => line,
    };

    FUND_NAME_RE
        .captures(line)
        .and_then(|caps| caps.name("name"))
        .map(|m| m.as_str())
        .unwrap_or_else(|| line.trim())
}

#[derive(Debug)]
struct OpenBlock {
    fund_id: FundId,
    header_line: usize,
    counted_units: Decimal,
    rows: usize,
}

/// Turns statement text into a netted transaction ledger.
pub struct StatementParser<'a> {
    matcher: &'a NameMatcher,
}

impl<'a> StatementParser<'a> {
    pub fn new(matcher: &'a NameMatcher) -> Self {
        Self { matcher }
    }

    pub fn parse(&self, text: &str) -> Result<TransactionLedger> {
        let mut ledger = TransactionLedger::new();
        let mut awaiting_header = false;
        let mut current: Option<OpenBlock> = None;
        let mut blocks = 0usize;

        for (idx, line) in text.lines().enumerate() {
            let line_no = idx + 1;

            if FOLIO_RE.is_match(line) {
                if let Some(block) = &current {
                    return Err(unclosed(block));
                }
                awaiting_header = true;
                continue;
            }

            if awaiting_header {
                if line.trim().is_empty() {
                    continue;
                }
                awaiting_header = false;

                let name = header_fund_name(line);
                let fund_id = self.matcher.resolve(name)?;
                debug!(line = line_no, name, fund_id, "Opened fund block");

                current = Some(OpenBlock {
                    fund_id,
                    header_line: line_no,
                    counted_units: Decimal::ZERO,
                    rows: 0,
                });
                continue;
            }

            let Some(block) = current.as_mut() else {
                if ROW_RE.is_match(line) {
                    debug!(line = line_no, "Skipping transaction row outside a fund block");
                }
                continue;
            };

            if let Some(caps) = CLOSING_RE.captures(line) {
                let stated = parse_field(&caps, "units", line_no)?;
                verify_block(block, stated)?;
                blocks += 1;
                current = None;
                continue;
            }

            if let Some(caps) = ROW_RE.captures(line) {
                let transaction = parse_row(&caps, block.fund_id, line_no)?;
                debug!(line = line_no, transaction = ?transaction, "New transaction");

                block.counted_units += transaction.signed_units();
                block.rows += 1;
                ledger.net_in(transaction)?;
            }
        }

        if let Some(block) = &current {
            return Err(unclosed(block));
        }
        if awaiting_header {
            warn!("Statement ends with a folio line but no fund header");
        }

        info!(blocks, transactions = ledger.len(), "Parsed statement");
        Ok(ledger)
    }
}

fn parse_row(caps: &Captures, fund_id: FundId, line_no: usize) -> Result<Transaction> {
    let date = parse_statement_date(&caps["day"], &caps["month"], &caps["year"]).ok_or_else(|| {
        LedgerError::format(
            SOURCE_NAME,
            line_no,
            format!("invalid date '{}-{}-{}'", &caps["day"], &caps["month"], &caps["year"]),
        )
    })?;

    let amount = parse_field(caps, "amount", line_no)?;
    let units = parse_field(caps, "units", line_no)?;
    let price = parse_field(caps, "price", line_no)?;

    let amount_negative = caps.name("amount_sign").is_some();
    let units_negative = caps.name("units_sign").is_some();
    if amount_negative != units_negative {
        warn!(
            line = line_no,
            label = caps["label"].trim(),
            "Amount and unit signs disagree, using the unit sign"
        );
    }

    let transaction = Transaction::new(
        date,
        fund_id,
        Action::from_units_sign(units_negative),
        units,
        price,
        amount,
    );
    if !transaction.is_consistent() {
        return Err(LedgerError::TransactionConsistency {
            line: line_no,
            row: caps[0].trim().to_string(),
            date,
            fund_id,
            units,
            price,
            amount,
        });
    }

    Ok(transaction)
}

fn parse_field(caps: &Captures, field: &str, line_no: usize) -> Result<Decimal> {
    let raw = &caps[field];
    parse_decimal(raw)
        .ok_or_else(|| LedgerError::format(SOURCE_NAME, line_no, format!("invalid {} '{}'", field, raw)))
}

fn verify_block(block: &OpenBlock, stated: Decimal) -> Result<()> {
    if (stated - block.counted_units).abs() > BLOCK_TOLERANCE {
        return Err(LedgerError::BlockTotalMismatch {
            fund_id: block.fund_id,
            stated,
            counted: block.counted_units,
        });
    }

    debug!(
        fund_id = block.fund_id,
        rows = block.rows,
        units = %stated,
        "Block total matches closing balance"
    );
    Ok(())
}

fn unclosed(block: &OpenBlock) -> LedgerError {
    LedgerError::format(
        SOURCE_NAME,
        block.header_line,
        format!("block for fund {} has no closing unit balance", block.fund_id),
    )
}

pub mod catalog_entry;
pub mod ledger;
pub mod ledger_row;
pub mod position;
pub mod price_series;
pub mod transaction;

pub use catalog_entry::CatalogEntry;
pub use ledger::TransactionLedger;
pub use ledger_row::{LEDGER_HEADER, LedgerRow};
pub use position::Position;
pub use price_series::PriceSeries;
pub use transaction::{Action, Transaction};

pub type FundId = u32;

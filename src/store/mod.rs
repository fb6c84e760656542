pub mod catalog;
pub mod prices;
pub mod write;

pub use catalog::FundCatalog;
pub use prices::{CsvPriceDirectory, PriceSeriesProvider};
pub use write::LedgerWriter;

pub mod calc;
pub mod matcher;
pub mod netting;
pub mod parser;
pub mod portfolio;
pub mod replay;
pub mod utils;

pub use matcher::NameMatcher;
pub use parser::StatementParser;
pub use portfolio::Portfolio;
pub use replay::{LedgerReplayer, LedgerSink, ReplaySummary};

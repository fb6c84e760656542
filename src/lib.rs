pub mod app;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod store;

#[cfg(test)]
mod test;

pub use error::{LedgerError, Result};

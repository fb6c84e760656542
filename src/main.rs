use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use fund_ledger::{app::Portfolio, config::Config, logging};
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(name = "fund-ledger", about = "Reconcile a fund statement into a daily holdings ledger")]
struct Cli {
    /// Fund catalog CSV (id,name)
    #[arg(long)]
    catalog: Option<String>,

    /// Statement text converted from the consolidated PDF
    #[arg(long)]
    statement: Option<String>,

    /// Directory with one {fund_id}.csv price file per fund
    #[arg(long)]
    prices: Option<String>,

    /// Output ledger CSV
    #[arg(long)]
    output: Option<String>,

    /// Log name matches whose token distance exceeds this
    #[arg(long)]
    match_warn_distance: Option<usize>,

    /// Last day to replay (YYYY-MM-DD), defaults to today
    #[arg(long)]
    until: Option<NaiveDate>,
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();
    let config = build_config(&cli)?;
    let until = cli.until.unwrap_or_else(|| Local::now().date_naive());

    let portfolio = Portfolio::from_config(&config)
        .with_context(|| format!("Failed to load catalog {}", config.catalog_path().display()))?;

    let summary = match portfolio.reconcile(&config, until) {
        Ok(summary) => summary,
        Err(err) => {
            error!(
                output = %config.output_path().display(),
                "Reconciliation aborted, output is incomplete and must not be used"
            );
            return Err(err).with_context(|| {
                format!("Failed to reconcile {}", config.statement_path().display())
            });
        }
    };

    for (fund_id, position) in summary.open_positions() {
        info!(
            fund_id,
            units = %position.units().round_dp(4),
            cost = %position.cost_basis().round_dp(4),
            "Open position"
        );
    }

    Ok(())
}

fn build_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::from_env().context("Invalid configuration")?;

    if let Some(path) = &cli.catalog {
        config = config.with_catalog_path(path);
    }
    if let Some(path) = &cli.statement {
        config = config.with_statement_path(path);
    }
    if let Some(path) = &cli.prices {
        config = config.with_price_dir(path);
    }
    if let Some(path) = &cli.output {
        config = config.with_output_path(path);
    }
    if let Some(distance) = cli.match_warn_distance {
        config = config.with_match_warn_distance(distance);
    }

    Ok(config)
}

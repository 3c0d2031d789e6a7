use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use chart_data_fetcher::{
    ChartDataFetcher, RunOutcome,
    cli::{
        commands::Cli,
        params::{build_fetch_config, home_dir},
    },
    models::currency_pair::format_pairs_table,
    settings::Settings,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.pairs {
        println!("{}", format_pairs_table(3));
        return Ok(());
    }

    let settings = Settings::load(cli.config.as_deref())?;
    let home = match &cli.dest {
        // the home directory only matters for the default destination
        Some(_) => Default::default(),
        None => home_dir().context("cannot derive a default --dest")?,
    };
    let config = build_fetch_config(&cli, &home, Utc::now())?;

    let fetcher = ChartDataFetcher::from_settings(&settings)?;
    if let RunOutcome::Saved(path) = fetcher.run(&config, true).await? {
        // stdout carries only the path so callers can capture it
        println!("{}", path.display());
    }

    Ok(())
}

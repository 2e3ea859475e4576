mod commands;
mod output;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use stocktrader_lib::cache::MemoryCache;
use stocktrader_lib::{CachedClient, Journal};

use crate::output::OutputFormat;

const DEFAULT_BASE_URL: &str = "http://localhost:8080";

#[derive(Parser)]
#[command(name = "stocktrader")]
#[command(about = "Trade and query tokenized stocks on a stock server")]
struct Cli {
    /// Output format: table, json, csv, or raw
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// Base URL of the stock server (defaults to STOCKSERVER_URL, then localhost:8080)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Path to a local SQLite order journal; buys and sells are recorded there
    #[arg(long, global = true)]
    journal: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up the current price of a symbol
    Price(commands::price::PriceArgs),
    /// Submit a buy order
    Buy(commands::buy::BuyArgs),
    /// Submit a sell order
    Sell(commands::sell::SellArgs),
    /// Show a user's holdings
    Holdings(commands::holdings::HoldingsArgs),
    /// Show a user's server-computed total asset value
    Value(commands::value::ValueArgs),
    /// Initialize the ledger with the seed stock and demo accounts
    Init,
    /// List recent orders from the local journal
    History(commands::history::HistoryArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("stocktrader=info".parse().unwrap()),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let format = match cli.output.as_str() {
        "json" => OutputFormat::Json,
        "csv" => OutputFormat::Csv,
        "raw" => OutputFormat::Raw,
        _ => OutputFormat::Table,
    };

    let base_url = cli
        .base_url
        .or_else(|| std::env::var("STOCKSERVER_URL").ok())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let cache = MemoryCache::new(Duration::from_secs(300));
    let client = CachedClient::with_base_url(&base_url, cache)?;

    let journal = cli.journal.as_deref().map(Journal::open).transpose()?;

    match &cli.command {
        Commands::Price(args) => commands::price::run(args, &client, &format).await?,
        Commands::Buy(args) => {
            commands::buy::run(args, &client, journal.as_ref(), &format).await?
        }
        Commands::Sell(args) => {
            commands::sell::run(args, &client, journal.as_ref(), &format).await?
        }
        Commands::Holdings(args) => commands::holdings::run(args, &client, &format).await?,
        Commands::Value(args) => commands::value::run(args, &client, &format).await?,
        Commands::Init => commands::init::run(&client, &format).await?,
        Commands::History(args) => commands::history::run(args, journal.as_ref(), &format)?,
    }

    Ok(())
}

//! The `price` subcommand: looks up the current quote for one symbol.

use anyhow::Result;
use clap::Args;
use stocktrader_lib::{validation, CachedClient};

use crate::output::{print_json, print_price_csv, print_price_table, OutputFormat};

#[derive(Args)]
pub struct PriceArgs {
    /// Stock symbol to look up (e.g. TSLA)
    pub symbol: String,
}

pub async fn run(args: &PriceArgs, client: &CachedClient, format: &OutputFormat) -> Result<()> {
    let symbol = validation::validate_symbol(&args.symbol)?;

    if let OutputFormat::Raw = format {
        let body = client.raw().get_text(&format!("/price/{}", symbol)).await?;
        println!("{}", body);
        return Ok(());
    }

    let quote = client.price(&symbol).await?;
    match format {
        OutputFormat::Json => print_json(&quote),
        OutputFormat::Csv => print_price_csv(&symbol, quote.price)?,
        _ => print_price_table(&symbol, quote.price),
    }
    Ok(())
}

//! The `sell` subcommand: validates and submits a sell order.

use anyhow::Result;
use clap::Args;
use stocktrader_lib::types::{SellOrder, SellReceipt};
use stocktrader_lib::{validation, CachedClient, Journal};

use crate::output::{format_money, print_json, OutputFormat};

#[derive(Args)]
pub struct SellArgs {
    /// Account the shares are sold from
    #[arg(long)]
    pub username: String,

    /// Stock symbol to sell
    #[arg(long)]
    pub symbol: String,

    /// Number of shares
    #[arg(long)]
    pub amount: i64,
}

pub async fn run(
    args: &SellArgs,
    client: &CachedClient,
    journal: Option<&Journal>,
    format: &OutputFormat,
) -> Result<()> {
    let username = validation::validate_username(&args.username)?;
    let symbol = validation::validate_symbol(&args.symbol)?;
    let amount = validation::validate_amount(args.amount)?;
    let order = SellOrder::new(&username, &symbol, amount);

    if let OutputFormat::Raw = format {
        let body = client.raw().post_text("/sell", Some(&order)).await?;
        if let Some(journal) = journal {
            let revenue = serde_json::from_str::<SellReceipt>(&body)
                .ok()
                .map(|r| r.revenue);
            journal.record_sell(&order, revenue, &body)?;
        }
        println!("{}", body);
        return Ok(());
    }

    let receipt = client.sell(&order).await?;
    if let Some(journal) = journal {
        let reply = serde_json::to_string(&receipt)?;
        journal.record_sell(&order, Some(receipt.revenue), &reply)?;
    }

    match format {
        OutputFormat::Json => print_json(&receipt),
        OutputFormat::Csv => {
            eprintln!("Note: --output csv is not supported for sell; showing the revenue.");
            println!("{}", format_money(receipt.revenue));
        }
        _ => println!("Revenue: {}", format_money(receipt.revenue)),
    }
    Ok(())
}

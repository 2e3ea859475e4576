//! The `buy` subcommand: validates and submits a buy order.

use anyhow::Result;
use clap::Args;
use stocktrader_lib::types::BuyOrder;
use stocktrader_lib::{validation, CachedClient, Journal};

use crate::output::{print_json, OutputFormat};

#[derive(Args)]
pub struct BuyArgs {
    /// Account the shares are bought into
    #[arg(long)]
    pub username: String,

    /// Stock symbol to buy
    #[arg(long)]
    pub symbol: String,

    /// Number of shares
    #[arg(long)]
    pub amount: i64,

    /// Total balance offered for the purchase
    #[arg(long)]
    pub payment: f64,
}

pub async fn run(
    args: &BuyArgs,
    client: &CachedClient,
    journal: Option<&Journal>,
    format: &OutputFormat,
) -> Result<()> {
    let username = validation::validate_username(&args.username)?;
    let symbol = validation::validate_symbol(&args.symbol)?;
    let amount = validation::validate_amount(args.amount)?;
    let payment = validation::validate_payment(args.payment)?;
    let order = BuyOrder::new(&username, &symbol, amount, payment);

    if let OutputFormat::Raw = format {
        let body = client.raw().post_text("/buy", Some(&order)).await?;
        if let Some(journal) = journal {
            journal.record_buy(&order, &body)?;
        }
        println!("{}", body);
        return Ok(());
    }

    let ack = client.buy(&order).await?;
    if let Some(journal) = journal {
        journal.record_buy(&order, &ack.message)?;
    }

    match format {
        OutputFormat::Json => print_json(&ack),
        OutputFormat::Csv => {
            eprintln!("Note: --output csv is not supported for buy; showing the reply.");
            println!("{}", ack.message);
        }
        _ => println!("{}", ack.message),
    }
    Ok(())
}

//! The `holdings` subcommand: shows a user's positions, optionally priced.

use std::collections::HashMap;

use anyhow::Result;
use clap::Args;
use stocktrader_lib::{appraise, validation, CachedClient};

use crate::output::{
    format_money, print_appraisal_csv, print_appraisal_table, print_holdings_csv,
    print_holdings_table, print_json, OutputFormat,
};

#[derive(Args)]
pub struct HoldingsArgs {
    /// Account to inspect
    pub username: String,

    /// Quote each held symbol and show per-position values
    #[arg(long)]
    pub appraise: bool,
}

pub async fn run(args: &HoldingsArgs, client: &CachedClient, format: &OutputFormat) -> Result<()> {
    let username = validation::validate_username(&args.username)?;

    if let OutputFormat::Raw = format {
        if args.appraise {
            eprintln!("Note: --appraise is ignored with --output raw.");
        }
        let body = client
            .raw()
            .get_text(&format!("/user/{}/stocks", username))
            .await?;
        println!("{}", body);
        return Ok(());
    }

    let holdings = client.user_holdings(&username).await?;
    eprintln!("{} position(s) for {}", holdings.stocks.len(), username);

    if args.appraise {
        let mut prices = HashMap::new();
        for symbol in holdings.stocks.keys() {
            match client.price(symbol).await {
                Ok(quote) => {
                    prices.insert(symbol.clone(), quote.price);
                }
                Err(e) => eprintln!("Note: no quote for {} ({})", symbol, e),
            }
        }
        let appraisal = appraise(&holdings, &prices);

        match format {
            OutputFormat::Json => print_json(&appraisal),
            OutputFormat::Csv => print_appraisal_csv(&appraisal)?,
            _ => {
                print_appraisal_table(&appraisal);
                eprintln!("Appraised total: {}", format_money(appraisal.total));
                if !appraisal.unpriced.is_empty() {
                    eprintln!("Unpriced symbols: {}", appraisal.unpriced.join(", "));
                }
            }
        }
        return Ok(());
    }

    match format {
        OutputFormat::Json => print_json(&holdings),
        OutputFormat::Csv => print_holdings_csv(&holdings)?,
        _ => print_holdings_table(&holdings),
    }
    Ok(())
}

//! The `value` subcommand: shows a user's server-computed total asset value.

use anyhow::Result;
use clap::Args;
use stocktrader_lib::{validation, CachedClient};

use crate::output::{format_money, print_json, OutputFormat};

#[derive(Args)]
pub struct ValueArgs {
    /// Account to appraise
    pub username: String,
}

pub async fn run(args: &ValueArgs, client: &CachedClient, format: &OutputFormat) -> Result<()> {
    let username = validation::validate_username(&args.username)?;

    if let OutputFormat::Raw = format {
        let body = client
            .raw()
            .get_text(&format!("/user/{}/value", username))
            .await?;
        println!("{}", body);
        return Ok(());
    }

    let value = client.user_total_value(&username).await?;
    match format {
        OutputFormat::Json => print_json(&value),
        OutputFormat::Csv => {
            eprintln!("Note: --output csv is not supported for value; showing the total.");
            println!("{}", format_money(value.total_value));
        }
        _ => println!(
            "Total value for {}: {}",
            username,
            format_money(value.total_value)
        ),
    }
    Ok(())
}

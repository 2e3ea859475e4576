//! The `init` subcommand: seeds the ledger with the initial stock issue and
//! demo accounts.

use anyhow::Result;
use stocktrader_lib::CachedClient;

use crate::output::{print_json, OutputFormat};

pub async fn run(client: &CachedClient, format: &OutputFormat) -> Result<()> {
    if let OutputFormat::Raw = format {
        let body = client.raw().post_text::<()>("/init", None).await?;
        println!("{}", body);
        return Ok(());
    }

    let ack = client.init_ledger().await?;
    match format {
        OutputFormat::Json => print_json(&ack),
        _ => println!("{}", ack.message),
    }
    Ok(())
}

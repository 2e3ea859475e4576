//! The `history` subcommand: lists recent orders from the local journal.

use anyhow::{bail, Result};
use clap::Args;
use stocktrader_lib::Journal;

use crate::output::{print_history_csv, print_history_table, print_json, OutputFormat};

#[derive(Args)]
pub struct HistoryArgs {
    /// Maximum number of orders to show
    #[arg(long, default_value = "20")]
    pub limit: i64,
}

pub fn run(args: &HistoryArgs, journal: Option<&Journal>, format: &OutputFormat) -> Result<()> {
    let Some(journal) = journal else {
        bail!("history requires --journal <path>");
    };

    let entries = journal.recent(args.limit)?;
    eprintln!("{} of {} journaled order(s)", entries.len(), journal.count()?);

    match format {
        OutputFormat::Json => print_json(&entries),
        OutputFormat::Csv => print_history_csv(&entries)?,
        OutputFormat::Raw => {
            eprintln!("Note: --output raw is not supported for history; showing the table.");
            print_history_table(&entries);
        }
        _ => print_history_table(&entries),
    }
    Ok(())
}

use anyhow::Result;
use chrono::DateTime;
use serde::Serialize;
use stocktrader_lib::types::UserHoldings;
use stocktrader_lib::{Appraisal, JournalEntry};
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    /// Print the response body exactly as the server sent it.
    Raw,
}

#[derive(Tabled, Serialize)]
struct PriceRow {
    #[tabled(rename = "Symbol")]
    #[serde(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Price")]
    #[serde(rename = "Price")]
    price: f64,
}

#[derive(Tabled, Serialize)]
struct HoldingRow {
    #[tabled(rename = "Symbol")]
    #[serde(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Shares")]
    #[serde(rename = "Shares")]
    shares: i64,
}

#[derive(Tabled, Serialize)]
struct AppraisalRow {
    #[tabled(rename = "Symbol")]
    #[serde(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Shares")]
    #[serde(rename = "Shares")]
    shares: i64,
    #[tabled(rename = "Price")]
    #[serde(rename = "Price")]
    price: String,
    #[tabled(rename = "Value")]
    #[serde(rename = "Value")]
    value: String,
}

#[derive(Tabled, Serialize)]
struct HistoryRow {
    #[tabled(rename = "Time")]
    #[serde(rename = "Time")]
    time: String,
    #[tabled(rename = "Side")]
    #[serde(rename = "Side")]
    side: String,
    #[tabled(rename = "User")]
    #[serde(rename = "User")]
    user: String,
    #[tabled(rename = "Symbol")]
    #[serde(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Shares")]
    #[serde(rename = "Shares")]
    shares: i64,
    #[tabled(rename = "Paid")]
    #[serde(rename = "Paid")]
    paid: String,
    #[tabled(rename = "Revenue")]
    #[serde(rename = "Revenue")]
    revenue: String,
}

// -- Row builders --

fn build_holding_rows(holdings: &UserHoldings) -> Vec<HoldingRow> {
    holdings
        .stocks
        .iter()
        .map(|(symbol, shares)| HoldingRow {
            symbol: symbol.clone(),
            shares: *shares,
        })
        .collect()
}

fn build_appraisal_rows(appraisal: &Appraisal) -> Vec<AppraisalRow> {
    appraisal
        .positions
        .iter()
        .map(|p| AppraisalRow {
            symbol: p.symbol.clone(),
            shares: p.quantity,
            price: p.price.map(format_money).unwrap_or_else(|| "-".to_string()),
            value: p.value.map(format_money).unwrap_or_else(|| "-".to_string()),
        })
        .collect()
}

fn build_history_rows(entries: &[JournalEntry]) -> Vec<HistoryRow> {
    entries
        .iter()
        .map(|e| HistoryRow {
            time: format_timestamp(&e.submitted_at),
            side: e.side.to_string(),
            user: e.username.clone(),
            symbol: e.stock_id.clone(),
            shares: e.amount,
            paid: e.payment.map(format_money).unwrap_or_default(),
            revenue: e.revenue.map(format_money).unwrap_or_default(),
        })
        .collect()
}

// -- Printers --

pub fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize output: {}", e),
    }
}

pub fn print_price_table(symbol: &str, price: f64) {
    let rows = vec![PriceRow {
        symbol: symbol.to_string(),
        price,
    }];
    println!("{}", Table::new(rows).with(Style::sharp()));
}

pub fn print_price_csv(symbol: &str, price: f64) -> Result<()> {
    let rows = vec![PriceRow {
        symbol: symbol.to_string(),
        price,
    }];
    print_csv(&rows)
}

pub fn print_holdings_table(holdings: &UserHoldings) {
    println!(
        "{}",
        Table::new(build_holding_rows(holdings)).with(Style::sharp())
    );
}

pub fn print_holdings_csv(holdings: &UserHoldings) -> Result<()> {
    print_csv(&build_holding_rows(holdings))
}

pub fn print_appraisal_table(appraisal: &Appraisal) {
    println!(
        "{}",
        Table::new(build_appraisal_rows(appraisal)).with(Style::sharp())
    );
}

pub fn print_appraisal_csv(appraisal: &Appraisal) -> Result<()> {
    print_csv(&build_appraisal_rows(appraisal))
}

pub fn print_history_table(entries: &[JournalEntry]) {
    println!(
        "{}",
        Table::new(build_history_rows(entries)).with(Style::sharp())
    );
}

pub fn print_history_csv(entries: &[JournalEntry]) -> Result<()> {
    print_csv(&build_history_rows(entries))
}

fn print_csv<T: Serialize>(rows: &[T]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(std::io::stdout());
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

// -- Formatting helpers --

pub fn format_money(value: f64) -> String {
    format!("${:.2}", value)
}

/// Shorten an RFC 3339 timestamp to minute precision for table display.
/// Falls back to the stored string when it does not parse.
fn format_timestamp(value: &str) -> String {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use stocktrader_lib::appraise;

    fn sample_holdings() -> UserHoldings {
        serde_json::from_str(r#"{"stocks": {"TSLA": 10, "AAPL": 3}}"#).unwrap()
    }

    #[test]
    fn format_money_two_decimals() {
        assert_eq!(format_money(180.5), "$180.50");
        assert_eq!(format_money(2000.0), "$2000.00");
        assert_eq!(format_money(0.125), "$0.12");
    }

    #[test]
    fn format_timestamp_shortens_rfc3339() {
        assert_eq!(
            format_timestamp("2025-03-14T09:26:53.589+00:00"),
            "2025-03-14 09:26"
        );
    }

    #[test]
    fn format_timestamp_passes_through_garbage() {
        assert_eq!(format_timestamp("not a date"), "not a date");
    }

    #[test]
    fn holding_rows_follow_symbol_order() {
        let rows = build_holding_rows(&sample_holdings());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].symbol, "AAPL");
        assert_eq!(rows[0].shares, 3);
        assert_eq!(rows[1].symbol, "TSLA");
    }

    #[test]
    fn appraisal_rows_mark_unpriced_positions() {
        let prices = HashMap::from([("TSLA".to_string(), 180.5)]);
        let appraisal = appraise(&sample_holdings(), &prices);
        let rows = build_appraisal_rows(&appraisal);

        let aapl = &rows[0];
        assert_eq!(aapl.symbol, "AAPL");
        assert_eq!(aapl.price, "-");
        assert_eq!(aapl.value, "-");

        let tsla = &rows[1];
        assert_eq!(tsla.price, "$180.50");
        assert_eq!(tsla.value, "$1805.00");
    }

    #[test]
    fn history_rows_leave_missing_sides_blank() {
        let journal = stocktrader_lib::Journal::open_in_memory().unwrap();
        let buy = stocktrader_lib::types::BuyOrder::new("Alice", "TSLA", 10, 2000.0);
        journal.record_buy(&buy, "ok").unwrap();

        let rows = build_history_rows(&journal.recent(10).unwrap());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].side, "buy");
        assert_eq!(rows[0].paid, "$2000.00");
        assert_eq!(rows[0].revenue, "");
    }
}

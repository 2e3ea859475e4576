//! SQLite journal of submitted orders.
//!
//! Every buy and sell the CLI submits is recorded locally with the server's
//! reply, so `history` works without the server and survives restarts.

use std::path::Path;

use chrono::Utc;
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use stockserver_api::types::{BuyOrder, SellOrder};

#[derive(thiserror::Error, Debug)]
pub enum JournalError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("unknown order side: {0}")]
    UnknownSide(String),
}

/// Which side of the book an order was on.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    fn as_str(&self) -> &'static str {
        match self {
            OrderSide::Buy => "buy",
            OrderSide::Sell => "sell",
        }
    }

    fn parse(s: &str) -> Result<Self, JournalError> {
        match s {
            "buy" => Ok(OrderSide::Buy),
            "sell" => Ok(OrderSide::Sell),
            other => Err(JournalError::UnknownSide(other.to_string())),
        }
    }
}

impl std::fmt::Display for OrderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One journaled order, as stored.
#[derive(Serialize, Debug, Clone)]
pub struct JournalEntry {
    pub id: i64,
    pub submitted_at: String,
    pub side: OrderSide,
    pub username: String,
    pub stock_id: String,
    pub amount: i64,
    /// Payment offered, buy orders only.
    pub payment: Option<f64>,
    /// Revenue realized, sell orders only.
    pub revenue: Option<f64>,
    /// The server's reply message or receipt, verbatim.
    pub reply: String,
}

pub struct Journal {
    conn: Connection,
}

impl Journal {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, JournalError> {
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )?;
        let journal = Self { conn };
        journal.init()?;
        Ok(journal)
    }

    /// Open an in-memory journal (for testing).
    pub fn open_in_memory() -> Result<Self, JournalError> {
        let conn = Connection::open_in_memory()?;
        let journal = Self { conn };
        journal.init()?;
        Ok(journal)
    }

    fn init(&self) -> Result<(), JournalError> {
        let version: i32 = self
            .conn
            .pragma_query_value(None, "user_version", |row| row.get(0))?;

        if version < 1 {
            self.conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS orders (
                     id INTEGER PRIMARY KEY AUTOINCREMENT,
                     submitted_at TEXT NOT NULL,
                     side TEXT NOT NULL CHECK (side IN ('buy', 'sell')),
                     username TEXT NOT NULL,
                     stock_id TEXT NOT NULL,
                     amount INTEGER NOT NULL,
                     payment REAL,
                     revenue REAL,
                     reply TEXT NOT NULL
                 );
                 CREATE INDEX IF NOT EXISTS idx_orders_submitted_at
                     ON orders(submitted_at);",
            )?;
            self.conn.pragma_update(None, "user_version", 1)?;
        }

        Ok(())
    }

    /// Records a submitted buy order with the server's acknowledgement.
    pub fn record_buy(&self, order: &BuyOrder, reply: &str) -> Result<i64, JournalError> {
        self.conn.execute(
            "INSERT INTO orders (submitted_at, side, username, stock_id, amount, payment, reply)
             VALUES (?1, 'buy', ?2, ?3, ?4, ?5, ?6)",
            params![
                Utc::now().to_rfc3339(),
                order.username,
                order.stock_id,
                order.amount,
                order.payment,
                reply,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Records a submitted sell order with the realized revenue, when the
    /// reply carried one.
    pub fn record_sell(
        &self,
        order: &SellOrder,
        revenue: Option<f64>,
        reply: &str,
    ) -> Result<i64, JournalError> {
        self.conn.execute(
            "INSERT INTO orders (submitted_at, side, username, stock_id, amount, revenue, reply)
             VALUES (?1, 'sell', ?2, ?3, ?4, ?5, ?6)",
            params![
                Utc::now().to_rfc3339(),
                order.username,
                order.stock_id,
                order.amount,
                revenue,
                reply,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Returns the most recent orders, newest first.
    pub fn recent(&self, limit: i64) -> Result<Vec<JournalEntry>, JournalError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, submitted_at, side, username, stock_id, amount, payment, revenue, reply
             FROM orders ORDER BY id DESC LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, i64>(5)?,
                row.get::<_, Option<f64>>(6)?,
                row.get::<_, Option<f64>>(7)?,
                row.get::<_, String>(8)?,
            ))
        })?;

        let mut entries = Vec::new();
        for row in rows {
            let (id, submitted_at, side, username, stock_id, amount, payment, revenue, reply) =
                row?;
            entries.push(JournalEntry {
                id,
                submitted_at,
                side: OrderSide::parse(&side)?,
                username,
                stock_id,
                amount,
                payment,
                revenue,
                reply,
            });
        }
        Ok(entries)
    }

    /// Total number of journaled orders.
    pub fn count(&self) -> Result<i64, JournalError> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM orders", [], |row| row.get(0))?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_and_read_back_a_buy() {
        let journal = Journal::open_in_memory().unwrap();
        let order = BuyOrder::new("Alice", "TSLA", 10, 2000.0);
        let id = journal
            .record_buy(&order, "Buy transaction submitted successfully")
            .unwrap();
        assert_eq!(id, 1);

        let entries = journal.recent(10).unwrap();
        assert_eq!(entries.len(), 1);
        let entry = &entries[0];
        assert_eq!(entry.side, OrderSide::Buy);
        assert_eq!(entry.username, "Alice");
        assert_eq!(entry.stock_id, "TSLA");
        assert_eq!(entry.amount, 10);
        assert_eq!(entry.payment, Some(2000.0));
        assert_eq!(entry.revenue, None);
        assert_eq!(entry.reply, "Buy transaction submitted successfully");
    }

    #[test]
    fn recent_returns_newest_first_and_honors_limit() {
        let journal = Journal::open_in_memory().unwrap();
        journal
            .record_buy(&BuyOrder::new("Alice", "TSLA", 1, 200.0), "ok")
            .unwrap();
        journal
            .record_sell(&SellOrder::new("Alice", "TSLA", 1), Some(180.5), r#"{"revenue":180.5}"#)
            .unwrap();
        journal
            .record_buy(&BuyOrder::new("Bob", "TSLA", 2, 400.0), "ok")
            .unwrap();

        let entries = journal.recent(2).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].username, "Bob");
        assert_eq!(entries[1].side, OrderSide::Sell);
        assert_eq!(entries[1].revenue, Some(180.5));

        assert_eq!(journal.count().unwrap(), 3);
    }

    #[test]
    fn init_is_idempotent() {
        let journal = Journal::open_in_memory().unwrap();
        journal.init().unwrap();
        journal
            .record_buy(&BuyOrder::new("Alice", "TSLA", 1, 200.0), "ok")
            .unwrap();
        journal.init().unwrap();
        assert_eq!(journal.count().unwrap(), 1);
    }

    #[test]
    fn side_round_trips_through_storage() {
        assert_eq!(OrderSide::parse("buy").unwrap(), OrderSide::Buy);
        assert_eq!(OrderSide::parse("sell").unwrap(), OrderSide::Sell);
        assert!(OrderSide::parse("short").is_err());
        assert_eq!(OrderSide::Buy.to_string(), "buy");
    }
}

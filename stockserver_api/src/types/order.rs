use serde::{Deserialize, Serialize};

/// A buy order as submitted to `POST /buy`.
///
/// `payment` is the total amount of balance offered for the purchase, not a
/// per-share limit price. The server rejects the order when it does not
/// cover `amount` shares at the current price.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BuyOrder {
    pub username: String,
    pub stock_id: String,
    pub amount: i64,
    pub payment: f64,
}

impl BuyOrder {
    pub fn new(username: &str, stock_id: &str, amount: i64, payment: f64) -> Self {
        Self {
            username: username.to_string(),
            stock_id: stock_id.to_string(),
            amount,
            payment,
        }
    }
}

/// A sell order as submitted to `POST /sell`. Proceeds are credited at the
/// current price; the server reports them back as [`SellReceipt`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SellOrder {
    pub username: String,
    pub stock_id: String,
    pub amount: i64,
}

impl SellOrder {
    pub fn new(username: &str, stock_id: &str, amount: i64) -> Self {
        Self {
            username: username.to_string(),
            stock_id: stock_id.to_string(),
            amount,
        }
    }
}

/// Acknowledgement body returned by `/init` and `/buy`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Ack {
    pub message: String,
}

/// Revenue realized by a sell order.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SellReceipt {
    pub revenue: f64,
}

use serde::{Deserialize, Serialize};

/// Current quote for a single symbol, as returned by `GET /price/{symbol}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StockPrice {
    pub price: f64,
}

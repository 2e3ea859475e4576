//! Client-side portfolio appraisal.
//!
//! Pure logic: combines a holdings map with per-symbol quotes into position
//! values and a total, for cross-checking the server's `totalValue`.

use std::collections::HashMap;

use serde::Serialize;
use stockserver_api::types::UserHoldings;

/// One held symbol with its quoted price and value, when a quote exists.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PositionValue {
    pub symbol: String,
    pub quantity: i64,
    pub price: Option<f64>,
    pub value: Option<f64>,
}

/// The appraised portfolio. `total` covers priced positions only; symbols
/// without a quote are listed in `unpriced` rather than silently dropped.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Appraisal {
    pub positions: Vec<PositionValue>,
    pub total: f64,
    pub unpriced: Vec<String>,
}

/// Values `holdings` at `prices`. Positions come out in symbol order.
pub fn appraise(holdings: &UserHoldings, prices: &HashMap<String, f64>) -> Appraisal {
    let mut positions = Vec::with_capacity(holdings.stocks.len());
    let mut unpriced = Vec::new();
    let mut total = 0.0;

    for (symbol, &quantity) in &holdings.stocks {
        let price = prices.get(symbol).copied();
        let value = price.map(|p| p * quantity as f64);
        if let Some(v) = value {
            total += v;
        } else {
            unpriced.push(symbol.clone());
        }
        positions.push(PositionValue {
            symbol: symbol.clone(),
            quantity,
            price,
            value,
        });
    }

    Appraisal {
        positions,
        total,
        unpriced,
    }
}

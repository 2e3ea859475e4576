use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Per-symbol share counts held by a user, from `GET /user/{username}/stocks`.
///
/// A `BTreeMap` keeps symbols in a stable order for display and tests.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct UserHoldings {
    pub stocks: BTreeMap<String, i64>,
}

impl UserHoldings {
    /// Total number of shares across all symbols.
    pub fn total_shares(&self) -> i64 {
        self.stocks.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.stocks.is_empty()
    }
}

/// Server-computed total asset value, from `GET /user/{username}/value`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserTotalValue {
    pub total_value: f64,
}

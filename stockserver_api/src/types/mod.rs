mod account;
pub use self::account::{UserHoldings, UserTotalValue};

mod order;
pub use self::order::{Ack, BuyOrder, SellOrder, SellReceipt};

mod price;
pub use self::price::StockPrice;

use serde::{Deserialize, Serialize};

/// Error envelope returned by the server alongside 4xx/5xx statuses.
#[derive(Serialize, Deserialize, Debug)]
pub struct ApiErrorBody {
    pub error: String,
}

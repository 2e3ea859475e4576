//! HTTP client for the stock server REST API.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::{
    types::{Ack, ApiErrorBody, BuyOrder, SellOrder, SellReceipt, StockPrice, UserHoldings,
        UserTotalValue},
    Error,
};

/// Request timeout applied to every call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the stock server REST API.
///
/// Thin wrapper over `reqwest` that owns request construction, status
/// classification, and body decoding. Every typed operation is a raw text
/// fetch followed by a JSON decode, so callers that need the unmodified
/// response body can use [`Client::get_text`] / [`Client::post_text`]
/// directly.
pub struct Client {
    http: reqwest::Client,
    /// Base URL for the API. Defaults to `http://localhost:8080`.
    base_api_url: String,
}

impl Client {
    /// Creates a client pointing at the default local server address.
    pub fn new() -> Result<Self, Error> {
        Self::with_base_url("http://localhost:8080")
    }

    /// Creates a client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_api_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Builds a request URL from path segments, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = Url::parse(&self.base_api_url).map_err(|e| {
            tracing::error!("invalid base URL {:?}: {}", self.base_api_url, e);
            Error::Url(e.to_string())
        })?;
        url.path_segments_mut()
            .map_err(|_| Error::Url(format!("{} cannot be a base URL", self.base_api_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Executes a GET against `path` (relative to the base URL) and returns
    /// the response body text unmodified.
    pub async fn get_text(&self, path: &str) -> Result<String, Error> {
        let url = Url::parse(&format!("{}{}", self.base_api_url, path))
            .map_err(|e| Error::Url(e.to_string()))?;
        let resp = self
            .http
            .get(url)
            .header("accept", "application/json")
            .send()
            .await?;
        read_body(resp).await
    }

    /// Executes a POST against `path`, serializing `body` as JSON when
    /// present, and returns the response body text unmodified.
    pub async fn post_text<B>(&self, path: &str, body: Option<&B>) -> Result<String, Error>
    where
        B: Serialize + ?Sized,
    {
        let url = Url::parse(&format!("{}{}", self.base_api_url, path))
            .map_err(|e| Error::Url(e.to_string()))?;
        let mut req = self.http.post(url).header("accept", "application/json");
        if let Some(body) = body {
            req = req.json(body);
        }
        let resp = req.send().await?;
        read_body(resp).await
    }

    async fn get_json<T>(&self, segments: &[&str]) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments)?;
        let resp = self
            .http
            .get(url)
            .header("accept", "application/json")
            .send()
            .await?;
        let body = read_body(resp).await?;
        decode(&body)
    }

    async fn post_json<T, B>(&self, segments: &[&str], body: Option<&B>) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let url = self.endpoint(segments)?;
        let mut req = self.http.post(url).header("accept", "application/json");
        if let Some(body) = body {
            req = req.json(body);
        }
        let resp = req.send().await?;
        let body = read_body(resp).await?;
        decode(&body)
    }

    /// Seeds the ledger with the initial stock issue and demo accounts.
    pub async fn init_ledger(&self) -> Result<Ack, Error> {
        self.post_json::<Ack, ()>(&["init"], None).await
    }

    /// Fetches the current price for a stock symbol.
    pub async fn price(&self, symbol: &str) -> Result<StockPrice, Error> {
        self.get_json(&["price", symbol]).await
    }

    /// Submits a buy order.
    pub async fn buy(&self, order: &BuyOrder) -> Result<Ack, Error> {
        self.post_json(&["buy"], Some(order)).await
    }

    /// Submits a sell order and returns the realized revenue.
    pub async fn sell(&self, order: &SellOrder) -> Result<SellReceipt, Error> {
        self.post_json(&["sell"], Some(order)).await
    }

    /// Fetches the per-symbol share counts held by a user.
    pub async fn user_holdings(&self, username: &str) -> Result<UserHoldings, Error> {
        self.get_json(&["user", username, "stocks"]).await
    }

    /// Fetches the server-computed total asset value for a user.
    pub async fn user_total_value(&self, username: &str) -> Result<UserTotalValue, Error> {
        self.get_json(&["user", username, "value"]).await
    }
}

/// Reads the response body and classifies non-success statuses.
///
/// On a non-2xx status the server's `{"error": ...}` message is extracted
/// when present; otherwise a truncated body snippet stands in.
async fn read_body(resp: reqwest::Response) -> Result<String, Error> {
    let status = resp.status();
    let body = resp.text().await?;

    if !status.is_success() {
        let message = match serde_json::from_str::<ApiErrorBody>(&body) {
            Ok(envelope) => envelope.error,
            Err(_) => truncate_body(&body),
        };
        tracing::error!("request failed with status {}: {}", status, message);
        return Err(Error::Status {
            status: status.as_u16(),
            message,
        });
    }

    Ok(body)
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, Error> {
    serde_json::from_str::<T>(body).map_err(|e| {
        let snippet = truncate_body(body);
        tracing::error!("failed to decode response: {} | body: {}", e, snippet);
        Error::Decode(e.to_string())
    })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        format!("{}...[truncated]", &body[..MAX])
    }
}

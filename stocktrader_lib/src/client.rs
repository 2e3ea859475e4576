//! Caching and retrying wrapper around the API client.

use std::time::Duration;

use rand::Rng;
use serde::de::DeserializeOwned;
use serde::Serialize;
use stockserver_api::types::{Ack, BuyOrder, SellOrder, SellReceipt, StockPrice, UserHoldings,
    UserTotalValue};
use stockserver_api::Client;

use crate::cache::MemoryCache;
use crate::error::StockTraderError;

struct RetryConfig {
    max_retries: usize,
    base_delay_ms: u64,
    max_delay_ms: u64,
}

impl RetryConfig {
    fn from_env() -> Self {
        Self {
            max_retries: env_usize("STOCKTRADER_RETRY_MAX", 3),
            base_delay_ms: env_u64("STOCKTRADER_RETRY_BASE_MS", 500),
            max_delay_ms: env_u64("STOCKTRADER_RETRY_MAX_MS", 10_000),
        }
    }

    fn delay_for_attempt(&self, attempt: usize) -> Duration {
        let shift = (attempt.saturating_sub(1)).min(30) as u32;
        let exp = 1u64 << shift;
        let base = self
            .base_delay_ms
            .saturating_mul(exp)
            .min(self.max_delay_ms);
        let jitter = rand::thread_rng().gen_range(0.8..1.2);
        Duration::from_millis((base as f64 * jitter) as u64)
    }
}

fn env_usize(key: &str, default: usize) -> usize {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn is_retryable(err: &StockTraderError) -> bool {
    match err {
        StockTraderError::Api(e) => e.is_retryable(),
        _ => false,
    }
}

/// API client wrapper that adds an in-memory cache and retry.
///
/// Read endpoints (price, holdings, total value) are cached for the cache's
/// TTL and retried on transport errors and 5xx responses. Write endpoints
/// (init, buy, sell) submit ledger transactions that are not idempotent, so
/// they are never retried; a successful write invalidates the cache entries
/// it makes stale.
pub struct CachedClient {
    inner: Client,
    cache: MemoryCache,
}

impl CachedClient {
    /// Creates a cached client against the default local server address.
    pub fn new(cache: MemoryCache) -> Result<Self, StockTraderError> {
        Ok(Self {
            inner: Client::new()?,
            cache,
        })
    }

    /// Creates a cached client with a custom base URL. Used for testing.
    pub fn with_base_url(base_url: &str, cache: MemoryCache) -> Result<Self, StockTraderError> {
        Ok(Self {
            inner: Client::with_base_url(base_url)?,
            cache,
        })
    }

    async fn with_retry<T, F, Fut>(&self, label: &str, mut f: F) -> Result<T, StockTraderError>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<T, StockTraderError>>,
    {
        let cfg = RetryConfig::from_env();
        let mut attempt = 0usize;
        loop {
            match f().await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    attempt += 1;
                    if attempt > cfg.max_retries || !is_retryable(&err) {
                        return Err(err);
                    }
                    let delay = cfg.delay_for_attempt(attempt);
                    tracing::warn!(
                        "{} request failed (attempt {}/{}), retrying in {:.1}s",
                        label,
                        attempt,
                        cfg.max_retries,
                        delay.as_secs_f64()
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    async fn cached_read<T, Fut>(
        &self,
        label: &str,
        cache_key: String,
        fetch: impl Fn() -> Fut,
    ) -> Result<T, StockTraderError>
    where
        T: DeserializeOwned + Serialize,
        Fut: std::future::Future<Output = Result<T, stockserver_api::Error>>,
    {
        if let Some(cached) = self.cache.get(&cache_key) {
            let value: T = serde_json::from_str(&cached)
                .map_err(|e| StockTraderError::Cache(e.to_string()))?;
            return Ok(value);
        }

        let value = self
            .with_retry(label, || async { Ok(fetch().await?) })
            .await?;
        if let Ok(json) = serde_json::to_string(&value) {
            self.cache.set(cache_key, json);
        }
        Ok(value)
    }

    /// Fetches a quote, returning a cached one when available.
    pub async fn price(&self, symbol: &str) -> Result<StockPrice, StockTraderError> {
        self.cached_read("price", format!("price:{}", symbol), || {
            self.inner.price(symbol)
        })
        .await
    }

    /// Fetches a user's holdings, returning cached ones when available.
    pub async fn user_holdings(&self, username: &str) -> Result<UserHoldings, StockTraderError> {
        self.cached_read("holdings", format!("holdings:{}", username), || {
            self.inner.user_holdings(username)
        })
        .await
    }

    /// Fetches a user's server-computed total value, cached.
    pub async fn user_total_value(
        &self,
        username: &str,
    ) -> Result<UserTotalValue, StockTraderError> {
        self.cached_read("value", format!("value:{}", username), || {
            self.inner.user_total_value(username)
        })
        .await
    }

    /// Seeds the ledger. Clears the whole cache: a reseed rewrites prices
    /// and account state wholesale.
    pub async fn init_ledger(&self) -> Result<Ack, StockTraderError> {
        let ack = self.inner.init_ledger().await?;
        self.cache.clear();
        Ok(ack)
    }

    /// Submits a buy order and invalidates the user's cached reads.
    pub async fn buy(&self, order: &BuyOrder) -> Result<Ack, StockTraderError> {
        let ack = self.inner.buy(order).await?;
        self.invalidate_user(&order.username);
        Ok(ack)
    }

    /// Submits a sell order and invalidates the user's cached reads.
    pub async fn sell(&self, order: &SellOrder) -> Result<SellReceipt, StockTraderError> {
        let receipt = self.inner.sell(order).await?;
        self.invalidate_user(&order.username);
        Ok(receipt)
    }

    fn invalidate_user(&self, username: &str) {
        self.cache.remove(&format!("holdings:{}", username));
        self.cache.remove(&format!("value:{}", username));
    }

    /// Direct access to the underlying client, for raw body passthrough.
    pub fn raw(&self) -> &Client {
        &self.inner
    }
}

use std::time::Duration;

use stocktrader_lib::cache::MemoryCache;
use stocktrader_lib::stockserver_api;
use stocktrader_lib::types::{BuyOrder, SellOrder};
use stocktrader_lib::{CachedClient, StockTraderError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn price_body(price: f64) -> serde_json::Value {
    serde_json::json!({ "price": price })
}

#[tokio::test]
async fn second_price_read_is_served_from_cache() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/price/TSLA"))
        .respond_with(ResponseTemplate::new(200).set_body_json(price_body(180.5)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let cache = MemoryCache::new(Duration::from_secs(300));
    let client = CachedClient::with_base_url(&mock_server.uri(), cache).unwrap();

    let first = client.price("TSLA").await.unwrap();
    let second = client.price("TSLA").await.unwrap();
    assert_eq!(first.price, 180.5);
    assert_eq!(second.price, 180.5);
}

#[tokio::test]
async fn buy_invalidates_the_users_cached_holdings() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/Alice/stocks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "stocks": { "TSLA": 10 }
        })))
        .expect(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/buy"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "message": "Buy transaction submitted successfully"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let cache = MemoryCache::new(Duration::from_secs(300));
    let client = CachedClient::with_base_url(&mock_server.uri(), cache).unwrap();

    client.user_holdings("Alice").await.unwrap();
    // Cache hit: no second request yet.
    client.user_holdings("Alice").await.unwrap();

    client
        .buy(&BuyOrder::new("Alice", "TSLA", 5, 1000.0))
        .await
        .unwrap();

    // Invalidated by the buy: hits the server again.
    client.user_holdings("Alice").await.unwrap();
}

#[tokio::test]
async fn transient_server_error_on_read_is_retried() {
    std::env::set_var("STOCKTRADER_RETRY_BASE_MS", "1");
    std::env::set_var("STOCKTRADER_RETRY_MAX_MS", "2");

    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/price/TSLA"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "error": "ledger unavailable"
        })))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/price/TSLA"))
        .respond_with(ResponseTemplate::new(200).set_body_json(price_body(180.5)))
        .mount(&mock_server)
        .await;

    let cache = MemoryCache::new(Duration::from_secs(300));
    let client = CachedClient::with_base_url(&mock_server.uri(), cache).unwrap();

    let quote = client.price("TSLA").await.unwrap();
    assert_eq!(quote.price, 180.5);
}

#[tokio::test]
async fn client_errors_are_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/Nobody/value"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": "unknown user"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let cache = MemoryCache::new(Duration::from_secs(300));
    let client = CachedClient::with_base_url(&mock_server.uri(), cache).unwrap();

    let err = client.user_total_value("Nobody").await.unwrap_err();
    match err {
        StockTraderError::Api(stockserver_api::Error::Status { status, message }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "unknown user");
        }
        other => panic!("expected API status error, got {}", other),
    }
}

#[tokio::test]
async fn writes_are_never_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/sell"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "error": "transaction failed"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let cache = MemoryCache::new(Duration::from_secs(300));
    let client = CachedClient::with_base_url(&mock_server.uri(), cache).unwrap();

    let result = client.sell(&SellOrder::new("Alice", "TSLA", 1)).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn init_clears_all_cached_reads() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/price/TSLA"))
        .respond_with(ResponseTemplate::new(200).set_body_json(price_body(180.5)))
        .expect(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/init"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "message": "Ledger initialized"
        })))
        .mount(&mock_server)
        .await;

    let cache = MemoryCache::new(Duration::from_secs(300));
    let client = CachedClient::with_base_url(&mock_server.uri(), cache).unwrap();

    client.price("TSLA").await.unwrap();
    client.init_ledger().await.unwrap();
    // Reseeded ledger: the quote must be fetched fresh.
    client.price("TSLA").await.unwrap();
}

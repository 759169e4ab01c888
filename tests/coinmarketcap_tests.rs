mod support;

use std::time::Duration;

use exchange_feed::adapter::outbound::coinmarketcap::{CoinMarketCapClient, CoinMarketCapConfig};
use exchange_feed::domain::ExchangeId;
use exchange_feed::error::Error;
use exchange_feed::port::outbound::RemoteSource;
use rust_decimal_macros::dec;
use support::fake_api::{error_body, info_body, map_body, CannedResponse, FakeApi, OK_STATUS};
use tokio::net::TcpListener;
use tokio_test::{assert_err, assert_ok};

const API_KEY: &str = "test-api-key";

fn client(api: &FakeApi) -> CoinMarketCapClient {
    CoinMarketCapClient::new(&api.base_url(), API_KEY).expect("client")
}

// ---------------------------------------------------------------------------
// Request shape
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_sends_key_and_paging_parameters() {
    let api = FakeApi::start(|_| CannedResponse::ok(map_body(&[(270, "Binance"), (24, "Kraken")]))).await;

    let stubs = assert_ok!(client(&api).list_exchanges(21, 20).await);

    assert_eq!(stubs.len(), 2);
    assert_eq!(stubs[0].id, 270);
    assert_eq!(stubs[0].name, "Binance");
    assert_eq!(stubs[1].slug, "kraken");

    let requests = api.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.method, "GET");
    assert_eq!(request.path(), "/v1/exchange/map");
    assert_eq!(request.query("start").as_deref(), Some("21"));
    assert_eq!(request.query("limit").as_deref(), Some("20"));
    assert_eq!(request.query("sort").as_deref(), Some("id"));
    assert_eq!(request.header("X-CMC_PRO_API_KEY"), Some(API_KEY));
    assert_eq!(request.header("accept"), Some("application/json"));
}

#[tokio::test]
async fn empty_listing_is_not_an_error() {
    let api = FakeApi::start(|_| CannedResponse::ok(format!(r#"{{"data":[],"status":{OK_STATUS}}}"#))).await;

    let stubs = assert_ok!(client(&api).list_exchanges(1, 20).await);
    assert!(stubs.is_empty());
}

// ---------------------------------------------------------------------------
// Detail and assets
// ---------------------------------------------------------------------------

#[tokio::test]
async fn detail_is_parsed_from_keyed_map() {
    let api = FakeApi::start(|request| {
        assert_eq!(request.query("id").as_deref(), Some("270"));
        CannedResponse::ok(info_body(270, "Binance"))
    })
    .await;

    let detail = assert_ok!(client(&api).exchange_detail(270).await);

    assert_eq!(detail.id, ExchangeId::from("270"));
    assert_eq!(detail.logo_url.as_deref(), Some("https://img.example/270.png"));
    assert_eq!(detail.website_url.as_deref(), Some("https://binance.example"));
    assert_eq!(detail.spot_volume_usd, Some(dec!(1000000.5)));
    assert_eq!(detail.maker_fee, Some(dec!(0.02)));
    assert_eq!(
        detail.date_launched,
        chrono::NaiveDate::from_ymd_opt(2017, 7, 14)
    );
    assert_eq!(api.requests_to("/v1/exchange/info").len(), 1);
}

#[tokio::test]
async fn detail_without_requested_id_is_not_found() {
    // The API answers for a different id.
    let api = FakeApi::start(|_| CannedResponse::ok(info_body(1, "Other"))).await;

    let err = assert_err!(client(&api).exchange_detail(42).await);

    assert!(matches!(err, Error::NotFound { ref id } if id.as_str() == "42"));
}

#[tokio::test]
async fn assets_skip_unpriced_currencies() {
    let body = format!(
        r#"{{"data":[
            {{"wallet_address":"0x1","balance":10,"platform":{{"crypto_id":1027,"symbol":"ETH","name":"Ethereum"}},
              "currency":{{"crypto_id":825,"price_usd":1.0001,"symbol":"USDT","name":"Tether USDt"}}}},
            {{"wallet_address":"0x2","balance":1,
              "currency":{{"crypto_id":1,"price_usd":67000.5,"symbol":"BTC","name":"Bitcoin"}}}},
            {{"wallet_address":"0x3","balance":3,
              "currency":{{"crypto_id":9,"symbol":"NOP","name":"Unpriced"}}}}
        ],"status":{OK_STATUS}}}"#
    );
    let api = FakeApi::start(move |_| CannedResponse::ok(body.clone())).await;

    let quotes = assert_ok!(client(&api).exchange_assets(270).await);

    let symbols: Vec<_> = quotes.iter().map(|q| q.symbol.as_str()).collect();
    assert_eq!(symbols, vec!["USDT", "BTC"]);
    assert_eq!(quotes[1].price_usd, dec!(67000.5));
    assert_eq!(api.requests()[0].path(), "/v1/exchange/assets");
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn http_error_carries_status_and_api_message() {
    let api = FakeApi::start(|_| {
        CannedResponse::json(429, error_body(429, "Too many requests this minute"))
    })
    .await;

    let err = assert_err!(client(&api).list_exchanges(1, 20).await);

    assert_eq!(err.status(), Some(429));
    assert!(err.to_string().contains("Too many requests this minute"));
}

#[tokio::test]
async fn http_error_without_body_uses_status_only() {
    let api = FakeApi::start(|_| CannedResponse::json(401, "")).await;

    let err = assert_err!(client(&api).exchange_detail(1).await);

    assert_eq!(err.status(), Some(401));
}

#[tokio::test]
async fn in_body_error_code_on_success_status_is_a_failure() {
    let api = FakeApi::start(|_| {
        CannedResponse::ok(error_body(1008, "You've exceeded your API Key's HTTP request rate limit."))
    })
    .await;

    let err = assert_err!(client(&api).list_exchanges(1, 20).await);

    assert_eq!(err.status(), Some(1008));
}

#[tokio::test]
async fn malformed_body_is_a_json_error() {
    let api = FakeApi::start(|_| CannedResponse::ok("{not json")).await;

    let err = assert_err!(client(&api).list_exchanges(1, 20).await);

    assert!(matches!(err, Error::Json(_)));
}

#[tokio::test]
async fn slow_response_times_out() {
    let api = FakeApi::start(|_| {
        CannedResponse::ok(map_body(&[(1, "Slow")])).delayed(Duration::from_millis(500))
    })
    .await;
    let config = CoinMarketCapConfig {
        base_url: api.base_url(),
        timeout_ms: 50,
        connect_timeout_ms: 50,
    };
    let client = CoinMarketCapClient::from_config(&config, API_KEY).expect("client");

    let err = assert_err!(client.list_exchanges(1, 20).await);

    assert!(matches!(err, Error::Timeout), "expected timeout, got {err:?}");
}

#[tokio::test]
async fn unreachable_server_has_no_status() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = CoinMarketCapClient::new(&format!("http://{addr}/v1"), API_KEY).unwrap();
    let err = assert_err!(client.list_exchanges(1, 20).await);

    assert_eq!(err.status(), None);
}

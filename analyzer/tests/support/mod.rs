//! Mock exchange server for integration tests.
//!
//! Serves Binance-shaped JSON for the three market-data endpoints,
//! stamps every response with an `x-mbx-used-weight` header, and
//! records per-endpoint call counts so tests can assert on fetch
//! behavior. Ticker values and the failure switch are mutable between
//! requests to drive delta-cycle scenarios.

// Each integration test binary uses a different subset of the helpers.
#![allow(dead_code)]

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
pub struct TickerFixture {
    pub volume: String,
    pub count: u64,
    pub bid_price: String,
    pub ask_price: String,
}

type BookSide = Vec<(String, String)>;

#[derive(Clone)]
pub struct MockExchange {
    /// (symbol, base asset, quote asset)
    symbols: Vec<(String, String, String)>,
    tickers: Arc<Mutex<HashMap<String, TickerFixture>>>,
    books: Arc<Mutex<HashMap<String, (BookSide, BookSide)>>>,
    /// Value stamped into the used-weight header
    pub used_weight: Arc<AtomicU32>,
    /// When set, every endpoint returns HTTP 500
    pub failing: Arc<AtomicBool>,
    pub bulk_ticker_calls: Arc<AtomicUsize>,
    pub single_ticker_calls: Arc<AtomicUsize>,
    /// (symbol, limit) per depth request, in order
    pub depth_calls: Arc<Mutex<Vec<(String, usize)>>>,
}

impl MockExchange {
    /// Two BTC-quoted pairs (volumes 10 and 20) and one USDT-quoted
    /// pair, each with a two-level book `[(100,1),(99,2)]` /
    /// `[(101,3),(102,4)]`.
    pub fn standard() -> Self {
        let symbols = vec![
            ("AAABTC".to_string(), "AAA".to_string(), "BTC".to_string()),
            ("BBBBTC".to_string(), "BBB".to_string(), "BTC".to_string()),
            ("CCCUSDT".to_string(), "CCC".to_string(), "USDT".to_string()),
        ];

        let mut tickers = HashMap::new();
        tickers.insert(
            "AAABTC".to_string(),
            TickerFixture {
                volume: "10".to_string(),
                count: 100,
                bid_price: "1.0".to_string(),
                ask_price: "1.5".to_string(),
            },
        );
        tickers.insert(
            "BBBBTC".to_string(),
            TickerFixture {
                volume: "20".to_string(),
                count: 50,
                bid_price: "2.0".to_string(),
                ask_price: "2.2".to_string(),
            },
        );
        tickers.insert(
            "CCCUSDT".to_string(),
            TickerFixture {
                volume: "30".to_string(),
                count: 200,
                bid_price: "3".to_string(),
                ask_price: "4".to_string(),
            },
        );

        let bids = vec![
            ("100".to_string(), "1".to_string()),
            ("99".to_string(), "2".to_string()),
        ];
        let asks = vec![
            ("101".to_string(), "3".to_string()),
            ("102".to_string(), "4".to_string()),
        ];
        let books = symbols
            .iter()
            .map(|(symbol, _, _)| (symbol.clone(), (bids.clone(), asks.clone())))
            .collect();

        MockExchange {
            symbols,
            tickers: Arc::new(Mutex::new(tickers)),
            books: Arc::new(Mutex::new(books)),
            used_weight: Arc::new(AtomicU32::new(10)),
            failing: Arc::new(AtomicBool::new(false)),
            bulk_ticker_calls: Arc::new(AtomicUsize::new(0)),
            single_ticker_calls: Arc::new(AtomicUsize::new(0)),
            depth_calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Bind to an ephemeral port and serve until the test ends.
    pub async fn serve(self) -> String {
        let app = axum::Router::new()
            .route("/api/v3/exchangeInfo", get(exchange_info))
            .route("/api/v3/ticker/24hr", get(ticker_24hr))
            .route("/api/v3/depth", get(depth))
            .with_state(self);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock exchange");
        let addr = listener.local_addr().expect("local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve mock exchange");
        });

        format!("http://{}", addr)
    }

    pub fn set_volume(&self, symbol: &str, volume: &str) {
        let mut tickers = self.tickers.lock().unwrap();
        let fixture = tickers.get_mut(symbol).expect("unknown mock symbol");
        fixture.volume = volume.to_string();
    }

    pub fn depth_call_count(&self) -> usize {
        self.depth_calls.lock().unwrap().len()
    }

    pub fn last_depth_limit(&self) -> Option<usize> {
        self.depth_calls.lock().unwrap().last().map(|(_, limit)| *limit)
    }

    fn respond(&self, body: Value) -> Response {
        if self.failing.load(Ordering::Relaxed) {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"code": -1000, "msg": "mock failure"})),
            )
                .into_response();
        }

        let weight = self.used_weight.load(Ordering::Relaxed).to_string();
        ([("x-mbx-used-weight", weight)], Json(body)).into_response()
    }

    fn ticker_json(&self, symbol: &str, fixture: &TickerFixture) -> Value {
        json!({
            "symbol": symbol,
            "volume": fixture.volume,
            "count": fixture.count,
            "bidPrice": fixture.bid_price,
            "askPrice": fixture.ask_price,
        })
    }
}

async fn exchange_info(State(mock): State<MockExchange>) -> Response {
    let symbols: Vec<Value> = mock
        .symbols
        .iter()
        .map(|(symbol, base, quote)| {
            json!({
                "symbol": symbol,
                "baseAsset": base,
                "quoteAsset": quote,
                "status": "TRADING",
            })
        })
        .collect();

    mock.respond(json!({"timezone": "UTC", "serverTime": 1700000000000i64, "symbols": symbols}))
}

async fn ticker_24hr(
    State(mock): State<MockExchange>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let tickers = mock.tickers.lock().unwrap().clone();

    match params.get("symbol") {
        Some(symbol) => {
            mock.single_ticker_calls.fetch_add(1, Ordering::Relaxed);
            match tickers.get(symbol) {
                Some(fixture) => {
                    let body = mock.ticker_json(symbol, fixture);
                    mock.respond(body)
                }
                None => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"code": -1121, "msg": "Invalid symbol."})),
                )
                    .into_response(),
            }
        }
        None => {
            mock.bulk_ticker_calls.fetch_add(1, Ordering::Relaxed);
            let all: Vec<Value> = tickers
                .iter()
                .map(|(symbol, fixture)| mock.ticker_json(symbol, fixture))
                .collect();
            mock.respond(Value::Array(all))
        }
    }
}

async fn depth(
    State(mock): State<MockExchange>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let symbol = params.get("symbol").cloned().unwrap_or_default();
    let limit = params
        .get("limit")
        .and_then(|l| l.parse::<usize>().ok())
        .unwrap_or(100);

    mock.depth_calls.lock().unwrap().push((symbol.clone(), limit));

    let books = mock.books.lock().unwrap();
    let Some((bids, asks)) = books.get(&symbol) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"code": -1121, "msg": "Invalid symbol."})),
        )
            .into_response();
    };

    let side = |levels: &BookSide| -> Vec<Value> {
        levels
            .iter()
            .take(limit)
            .map(|(price, qty)| json!([price, qty]))
            .collect()
    };

    let body = json!({
        "lastUpdateId": 1,
        "bids": side(bids),
        "asks": side(asks),
    });
    drop(books);

    mock.respond(body)
}

use serde::{Deserialize, Serialize};

/// Binance-style 24-hour rolling ticker, as served by `/api/v3/ticker/24hr`.
///
/// Decimal-valued fields arrive as strings on the wire. `count` is the
/// number of trades in the window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticker24hEvent {
    pub symbol: String,
    pub volume: String,
    pub count: u64,
    #[serde(rename = "bidPrice")]
    pub bid_price: String,
    #[serde(rename = "askPrice")]
    pub ask_price: String,
}

impl Ticker24hEvent {
    pub fn new(
        symbol: impl Into<String>,
        volume: impl Into<String>,
        count: u64,
        bid_price: impl Into<String>,
        ask_price: impl Into<String>,
    ) -> Self {
        Ticker24hEvent {
            symbol: symbol.into(),
            volume: volume.into(),
            count,
            bid_price: bid_price.into(),
            ask_price: ask_price.into(),
        }
    }
}

use serde::{Deserialize, Serialize};

/// Exchange metadata listing, as served by `/api/v3/exchangeInfo`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeInfoEvent {
    #[serde(rename = "serverTime", default, skip_serializing_if = "Option::is_none")]
    pub server_time: Option<i64>,
    pub symbols: Vec<SymbolInfoEvent>,
}

/// One tradeable pair from the exchange metadata listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolInfoEvent {
    pub symbol: String,
    #[serde(rename = "baseAsset")]
    pub base_asset: String,
    #[serde(rename = "quoteAsset")]
    pub quote_asset: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl SymbolInfoEvent {
    pub fn new(
        symbol: impl Into<String>,
        base_asset: impl Into<String>,
        quote_asset: impl Into<String>,
    ) -> Self {
        SymbolInfoEvent {
            symbol: symbol.into(),
            base_asset: base_asset.into(),
            quote_asset: quote_asset.into(),
            status: None,
        }
    }
}

use crate::entities::PriceLevel;
use serde::{Deserialize, Serialize};

/// Binance-style order book depth snapshot, as served by `/api/v3/depth`.
///
/// Prices and quantities arrive as strings; parse with
/// [`PriceLevel::parse`] before doing arithmetic on them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepthSnapshotEvent {
    #[serde(rename = "lastUpdateId")]
    pub last_update_id: u64,
    pub bids: Vec<[String; 2]>, // [price, quantity]
    pub asks: Vec<[String; 2]>,
}

impl DepthSnapshotEvent {
    pub fn new(last_update_id: u64, bids: Vec<PriceLevel>, asks: Vec<PriceLevel>) -> Self {
        DepthSnapshotEvent {
            last_update_id,
            bids: bids
                .iter()
                .map(|l| [l.price.to_string(), l.quantity.to_string()])
                .collect(),
            asks: asks
                .iter()
                .map(|l| [l.price.to_string(), l.quantity.to_string()])
                .collect(),
        }
    }
}

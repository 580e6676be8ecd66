use parking_lot::RwLock;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;

use market_core::{DepthSnapshotEvent, PriceLevel, Symbol};

use crate::client::{RestClient, RestError};
use crate::error::AnalyticsError;

/// Depth tiers the exchange serves, ascending. Requests round up to the
/// next tier; anything beyond the last tier is an input error.
pub const DEPTH_TIERS: [usize; 8] = [5, 10, 20, 50, 100, 500, 1000, 5000];

/// Parsed order book snapshot, tagged with the depth tier it was
/// fetched at. Immutable; shallower views are produced by truncation,
/// never by mutating the stored book.
#[derive(Debug, Clone)]
pub struct OrderBookSnapshot {
    bids: Vec<PriceLevel>,
    asks: Vec<PriceLevel>,
    depth: usize,
}

impl OrderBookSnapshot {
    pub fn from_event(event: &DepthSnapshotEvent, depth: usize) -> Result<Self, RestError> {
        Ok(OrderBookSnapshot {
            bids: parse_side(&event.bids)?,
            asks: parse_side(&event.asks)?,
            depth,
        })
    }

    /// The depth tier this book was fetched at (may exceed the number of
    /// levels actually present on a thin book).
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn bids(&self) -> &[PriceLevel] {
        &self.bids
    }

    pub fn asks(&self) -> &[PriceLevel] {
        &self.asks
    }

    /// View of the first `num_levels` levels per side.
    pub fn truncated(&self, num_levels: usize) -> OrderBookSnapshot {
        debug_assert!(num_levels <= self.depth);
        OrderBookSnapshot {
            bids: self.bids.iter().take(num_levels).cloned().collect(),
            asks: self.asks.iter().take(num_levels).cloned().collect(),
            depth: num_levels,
        }
    }

    /// Total price × quantity across all bid levels.
    pub fn total_bid_notional(&self) -> Decimal {
        total_notional(&self.bids)
    }

    /// Total price × quantity across all ask levels.
    pub fn total_ask_notional(&self) -> Decimal {
        total_notional(&self.asks)
    }
}

fn parse_side(raw: &[[String; 2]]) -> Result<Vec<PriceLevel>, RestError> {
    raw.iter()
        .map(|pair| {
            PriceLevel::parse(pair)
                .map_err(|e| RestError::Parse(format!("bad depth level {:?}: {}", pair, e)))
        })
        .collect()
}

fn total_notional(levels: &[PriceLevel]) -> Decimal {
    levels.iter().map(PriceLevel::notional).sum()
}

/// Cache of order book snapshots keyed by symbol.
///
/// A cache hit requires the stored book to be at least as deep as the
/// request; excess depth is served as a truncated view without touching
/// the cache. The stored depth therefore never regresses below what has
/// already been served for a symbol.
#[derive(Clone)]
pub struct DepthCache {
    client: RestClient,
    entries: Arc<RwLock<HashMap<Symbol, Arc<OrderBookSnapshot>>>>,
}

impl DepthCache {
    pub fn new(client: RestClient) -> Self {
        DepthCache {
            client,
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn get(
        &self,
        symbol: &Symbol,
        num_levels: usize,
        use_cache: bool,
    ) -> Result<OrderBookSnapshot, AnalyticsError> {
        let tier = fetch_tier(num_levels)?;

        if use_cache
            && let Some(book) = self.entries.read().get(symbol)
            && book.depth() >= num_levels
        {
            return Ok(book.truncated(num_levels));
        }

        tracing::debug!("fetching depth {} for {} (tier {})", num_levels, symbol, tier);
        let event = self.client.depth(symbol.as_str(), tier).await?;
        let book = Arc::new(OrderBookSnapshot::from_event(&event, tier)?);

        self.entries.write().insert(symbol.clone(), Arc::clone(&book));
        Ok(book.truncated(num_levels))
    }

    /// Drop every cached book; the next read fetches fresh data.
    pub fn clear(&self) {
        self.entries.write().clear();
    }
}

/// Round a requested level count up to the nearest supported tier.
fn fetch_tier(num_levels: usize) -> Result<usize, AnalyticsError> {
    DEPTH_TIERS
        .iter()
        .copied()
        .find(|tier| *tier >= num_levels)
        .ok_or(AnalyticsError::DepthTooDeep {
            requested: num_levels,
            max: DEPTH_TIERS[DEPTH_TIERS.len() - 1],
        })
}

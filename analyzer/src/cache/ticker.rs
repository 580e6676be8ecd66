use parking_lot::RwLock;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;

use market_core::{Symbol, Ticker24hEvent};

use crate::client::{RestClient, RestError};
use crate::error::AnalyticsError;

/// Parsed 24h ticker for one symbol.
///
/// The spread is fixed at construction from the bid/ask the snapshot was
/// built with; it is never re-derived later. Snapshots are immutable and
/// superseded wholesale by newer fetches.
#[derive(Debug, Clone)]
pub struct TickerSnapshot {
    pub volume: Decimal,
    pub trade_count: u64,
    pub bid_price: Decimal,
    pub ask_price: Decimal,
    pub spread: Decimal,
}

impl TickerSnapshot {
    pub fn from_event(event: &Ticker24hEvent) -> Result<Self, RestError> {
        let volume = parse_decimal(&event.volume, "volume")?;
        let bid_price = parse_decimal(&event.bid_price, "bidPrice")?;
        let ask_price = parse_decimal(&event.ask_price, "askPrice")?;

        Ok(TickerSnapshot {
            volume,
            trade_count: event.count,
            bid_price,
            ask_price,
            spread: ask_price - bid_price,
        })
    }
}

fn parse_decimal(raw: &str, field: &str) -> Result<Decimal, RestError> {
    raw.parse::<Decimal>()
        .map_err(|e| RestError::Parse(format!("bad {} value {:?}: {}", field, raw, e)))
}

/// Cache of 24h ticker snapshots keyed by symbol.
///
/// A miss is filled either by a single-symbol fetch (inserts one entry,
/// leaves the rest untouched) or by a bulk fetch of every symbol, which
/// replaces the whole map in one shot; fresh and stale entries are
/// never mixed. Ranking across many symbols should use `bulk = true` to
/// amortize one request over the entire universe.
#[derive(Clone)]
pub struct TickerCache {
    client: RestClient,
    entries: Arc<RwLock<HashMap<Symbol, Arc<TickerSnapshot>>>>,
}

impl TickerCache {
    pub fn new(client: RestClient) -> Self {
        TickerCache {
            client,
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn get(
        &self,
        symbol: &Symbol,
        use_cache: bool,
        bulk: bool,
    ) -> Result<Arc<TickerSnapshot>, AnalyticsError> {
        if use_cache
            && let Some(snapshot) = self.entries.read().get(symbol)
        {
            return Ok(Arc::clone(snapshot));
        }

        if bulk {
            self.refresh_all().await?;
        } else {
            self.refresh_one(symbol).await?;
        }

        self.entries
            .read()
            .get(symbol)
            .map(Arc::clone)
            .ok_or_else(|| {
                RestError::Parse(format!("no ticker for {} in exchange response", symbol)).into()
            })
    }

    /// Fetch every symbol's ticker and replace the cache wholesale.
    async fn refresh_all(&self) -> Result<(), AnalyticsError> {
        tracing::debug!("refreshing all tickers");
        let events = self.client.all_tickers_24hr().await?;

        let mut fresh = HashMap::with_capacity(events.len());
        for event in &events {
            let Ok(symbol) = Symbol::new(&event.symbol) else {
                continue;
            };
            fresh.insert(symbol, Arc::new(TickerSnapshot::from_event(event)?));
        }

        *self.entries.write() = fresh;
        Ok(())
    }

    /// Fetch a single symbol's ticker and overwrite just that entry.
    async fn refresh_one(&self, symbol: &Symbol) -> Result<(), AnalyticsError> {
        tracing::debug!("refreshing ticker for {}", symbol);
        let event = self.client.ticker_24hr(symbol.as_str()).await?;
        let snapshot = Arc::new(TickerSnapshot::from_event(&event)?);

        self.entries.write().insert(symbol.clone(), snapshot);
        Ok(())
    }

    /// Drop every cached entry; the next read fetches fresh data.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

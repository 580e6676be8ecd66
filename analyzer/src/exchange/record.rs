use std::fmt;
use std::sync::Arc;

use crate::cache::{OrderBookSnapshot, TickerSnapshot};
use crate::error::AnalyticsError;

use super::index::SymbolIdentity;
use super::Exchange;

/// Handle onto one tradeable pair.
///
/// Carries the pair's immutable identity plus a cheap-clone handle on
/// the shared exchange context, so field extraction can reach the
/// ticker and depth caches. Equality and hashing consider only the
/// symbol name.
#[derive(Clone)]
pub struct SymbolRecord {
    identity: Arc<SymbolIdentity>,
    exchange: Exchange,
}

impl SymbolRecord {
    pub(crate) fn new(identity: Arc<SymbolIdentity>, exchange: Exchange) -> Self {
        SymbolRecord { identity, exchange }
    }

    pub fn symbol(&self) -> &str {
        self.identity.symbol.as_str()
    }

    pub fn base_asset(&self) -> &str {
        &self.identity.base_asset
    }

    pub fn quote_asset(&self) -> &str {
        &self.identity.quote_asset
    }

    /// 24h ticker for this pair, through the shared cache.
    pub async fn ticker(
        &self,
        use_cache: bool,
        bulk: bool,
    ) -> Result<Arc<TickerSnapshot>, AnalyticsError> {
        self.exchange
            .tickers()
            .get(&self.identity.symbol, use_cache, bulk)
            .await
    }

    /// Order book for this pair at the given depth, through the shared cache.
    pub async fn depth(
        &self,
        num_levels: usize,
        use_cache: bool,
    ) -> Result<OrderBookSnapshot, AnalyticsError> {
        self.exchange
            .books()
            .get(&self.identity.symbol, num_levels, use_cache)
            .await
    }
}

impl PartialEq for SymbolRecord {
    fn eq(&self, other: &Self) -> bool {
        self.identity.symbol == other.identity.symbol
    }
}

impl Eq for SymbolRecord {}

impl std::hash::Hash for SymbolRecord {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.identity.symbol.hash(state);
    }
}

impl fmt::Debug for SymbolRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<{} base={} quote={}>",
            self.identity.symbol, self.identity.base_asset, self.identity.quote_asset
        )
    }
}

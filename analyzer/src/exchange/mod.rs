//! Exchange context: the symbol index plus the two shared caches.
//!
//! Built once per session from the exchange metadata listing. The index
//! is read-only after construction; the caches are mutable and shared:
//! two consumers (say, two delta trackers) holding handles on the same
//! `Exchange` cross-pollinate cache warmth by design.

mod index;
mod record;

pub use index::{SymbolIdentity, SymbolIndex};
pub use record::SymbolRecord;

use std::sync::Arc;

use market_core::Symbol;

use crate::cache::{DepthCache, TickerCache};
use crate::client::RestClient;
use crate::config::ClientConfig;
use crate::error::AnalyticsError;

/// Cheap-clone handle on the shared exchange context.
#[derive(Clone)]
pub struct Exchange {
    inner: Arc<ExchangeInner>,
}

struct ExchangeInner {
    index: SymbolIndex,
    tickers: TickerCache,
    books: DepthCache,
    client: RestClient,
}

impl Exchange {
    /// Fetch the exchange metadata listing and build the session context.
    pub async fn connect(config: ClientConfig) -> Result<Self, AnalyticsError> {
        let client = RestClient::new(&config)?;
        let info = client.exchange_info().await?;
        let index = SymbolIndex::from_exchange_info(&info)?;

        tracing::info!("indexed {} symbols from exchange info", index.len());

        Ok(Exchange {
            inner: Arc::new(ExchangeInner {
                index,
                tickers: TickerCache::new(client.clone()),
                books: DepthCache::new(client.clone()),
                client,
            }),
        })
    }

    /// Symbols matching the given asset filters, as records bound to
    /// this context. See [`SymbolIndex::select`] for filter semantics.
    pub fn symbols(
        &self,
        quote_assets: Option<&[String]>,
        base_assets: Option<&[String]>,
    ) -> Result<Vec<SymbolRecord>, AnalyticsError> {
        Ok(self
            .inner
            .index
            .select(quote_assets, base_assets)?
            .into_iter()
            .map(|identity| SymbolRecord::new(identity, self.clone()))
            .collect())
    }

    /// Look up a single symbol by name.
    pub fn symbol(&self, name: &Symbol) -> Option<SymbolRecord> {
        self.inner
            .index
            .get(name)
            .map(|identity| SymbolRecord::new(Arc::clone(identity), self.clone()))
    }

    /// Number of indexed symbols.
    pub fn symbol_count(&self) -> usize {
        self.inner.index.len()
    }

    /// Most recently observed request-weight usage on the underlying client.
    pub fn quota_usage(&self) -> u32 {
        self.inner.client.quota_usage()
    }

    /// Invalidate both caches. The symbol index is untouched; it is
    /// fixed for the session.
    pub fn clear_caches(&self) {
        self.inner.tickers.clear();
        self.inner.books.clear();
    }

    pub(crate) fn tickers(&self) -> &TickerCache {
        &self.inner.tickers
    }

    pub(crate) fn books(&self) -> &DepthCache {
        &self.inner.books
    }
}

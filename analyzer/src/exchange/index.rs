use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use market_core::{ExchangeInfoEvent, Symbol};

use crate::client::RestError;
use crate::error::{AnalyticsError, FilterKind};

/// Immutable identity of one tradeable pair.
#[derive(Debug)]
pub struct SymbolIdentity {
    pub symbol: Symbol,
    pub base_asset: String,
    pub quote_asset: String,
}

impl PartialEq for SymbolIdentity {
    fn eq(&self, other: &Self) -> bool {
        self.symbol == other.symbol
    }
}

impl Eq for SymbolIdentity {}

impl std::hash::Hash for SymbolIdentity {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.symbol.hash(state);
    }
}

/// Index over the exchange metadata listing, built once per session.
///
/// Read-only after construction: a symbol → identity map plus
/// multi-valued base-asset and quote-asset indices for filtering.
pub struct SymbolIndex {
    by_symbol: HashMap<Symbol, Arc<SymbolIdentity>>,
    by_base: HashMap<String, Vec<Arc<SymbolIdentity>>>,
    by_quote: HashMap<String, Vec<Arc<SymbolIdentity>>>,
}

impl SymbolIndex {
    pub fn from_exchange_info(info: &ExchangeInfoEvent) -> Result<Self, RestError> {
        let mut by_symbol = HashMap::with_capacity(info.symbols.len());
        let mut by_base: HashMap<String, Vec<Arc<SymbolIdentity>>> = HashMap::new();
        let mut by_quote: HashMap<String, Vec<Arc<SymbolIdentity>>> = HashMap::new();

        for raw in &info.symbols {
            let symbol = Symbol::new(&raw.symbol)
                .map_err(|e| RestError::Parse(format!("bad symbol {:?}: {}", raw.symbol, e)))?;

            let identity = Arc::new(SymbolIdentity {
                symbol: symbol.clone(),
                base_asset: raw.base_asset.to_uppercase(),
                quote_asset: raw.quote_asset.to_uppercase(),
            });

            by_base
                .entry(identity.base_asset.clone())
                .or_default()
                .push(Arc::clone(&identity));
            by_quote
                .entry(identity.quote_asset.clone())
                .or_default()
                .push(Arc::clone(&identity));
            by_symbol.insert(symbol, identity);
        }

        Ok(SymbolIndex {
            by_symbol,
            by_base,
            by_quote,
        })
    }

    pub fn get(&self, symbol: &Symbol) -> Option<&Arc<SymbolIdentity>> {
        self.by_symbol.get(symbol)
    }

    pub fn len(&self) -> usize {
        self.by_symbol.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_symbol.is_empty()
    }

    /// Select identities matching the given asset filters.
    ///
    /// An omitted filter matches every known symbol; a provided filter
    /// unions the listed assets' symbols. The quote-filtered and
    /// base-filtered sets are intersected. A provided filter that
    /// matches nothing is an input error, distinct from "no filter".
    /// Results are sorted by symbol for deterministic output.
    pub fn select(
        &self,
        quote_assets: Option<&[String]>,
        base_assets: Option<&[String]>,
    ) -> Result<Vec<Arc<SymbolIdentity>>, AnalyticsError> {
        let quote_filtered = self.filtered_set(&self.by_quote, quote_assets, FilterKind::Quote)?;
        let base_filtered = self.filtered_set(&self.by_base, base_assets, FilterKind::Base)?;

        let mut selected: Vec<Arc<SymbolIdentity>> = quote_filtered
            .intersection(&base_filtered)
            .cloned()
            .collect();
        selected.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        Ok(selected)
    }

    fn filtered_set(
        &self,
        index: &HashMap<String, Vec<Arc<SymbolIdentity>>>,
        assets: Option<&[String]>,
        kind: FilterKind,
    ) -> Result<HashSet<Arc<SymbolIdentity>>, AnalyticsError> {
        let Some(assets) = assets else {
            return Ok(self.by_symbol.values().cloned().collect());
        };

        let matched: HashSet<Arc<SymbolIdentity>> = assets
            .iter()
            .filter_map(|asset| index.get(asset))
            .flatten()
            .cloned()
            .collect();

        if matched.is_empty() {
            return Err(AnalyticsError::EmptyFilterResult {
                kind,
                assets: assets.to_vec(),
            });
        }

        Ok(matched)
    }
}

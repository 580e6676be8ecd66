use regex::{Captures, Regex};
use std::sync::OnceLock;

use crate::error::AnalyticsError;
use crate::exchange::SymbolRecord;

use super::value::FieldValue;

/// What a resolved field extracts from a symbol.
///
/// The registry's job is to turn a field string into one of these
/// tagged variants; evaluation is then a single match. Ticker-backed
/// variants fetch through the bulk-eligible cache path so that ranking
/// a large symbol set costs one request, not one per symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Symbol,
    BaseAsset,
    QuoteAsset,
    Volume,
    Trades,
    BidPrice,
    AskPrice,
    Spread,
    /// Total bid-side notional over the first N book levels.
    BidBookValue(usize),
    /// Total ask-side notional over the first N book levels.
    AskBookValue(usize),
}

impl FieldKind {
    /// Extract this field's value from a symbol record.
    ///
    /// Ticker- and book-backed variants hit the caches and may fetch
    /// over the network as a side effect.
    pub async fn evaluate(&self, symbol: &SymbolRecord) -> Result<FieldValue, AnalyticsError> {
        match self {
            FieldKind::Symbol => Ok(FieldValue::Text(symbol.symbol().to_string())),
            FieldKind::BaseAsset => Ok(FieldValue::Text(symbol.base_asset().to_string())),
            FieldKind::QuoteAsset => Ok(FieldValue::Text(symbol.quote_asset().to_string())),
            FieldKind::Volume => Ok(FieldValue::Decimal(symbol.ticker(true, true).await?.volume)),
            FieldKind::Trades => Ok(FieldValue::Int(symbol.ticker(true, true).await?.trade_count)),
            FieldKind::BidPrice => Ok(FieldValue::Decimal(
                symbol.ticker(true, true).await?.bid_price,
            )),
            FieldKind::AskPrice => Ok(FieldValue::Decimal(
                symbol.ticker(true, true).await?.ask_price,
            )),
            FieldKind::Spread => Ok(FieldValue::Decimal(symbol.ticker(true, true).await?.spread)),
            FieldKind::BidBookValue(levels) => Ok(FieldValue::Decimal(
                symbol.depth(*levels, true).await?.total_bid_notional(),
            )),
            FieldKind::AskBookValue(levels) => Ok(FieldValue::Decimal(
                symbol.depth(*levels, true).await?.total_ask_notional(),
            )),
        }
    }
}

/// One entry of the field registry.
///
/// Registration order is authoritative: resolution tries each pattern
/// in turn and the first match wins.
struct FieldSpec {
    /// Display name, shown in invalid-field errors.
    name: &'static str,
    /// Anchored match pattern; capture groups parameterize the field.
    regex: Regex,
    orderable: bool,
    delta_eligible: bool,
    parse: fn(&Captures<'_>) -> Result<FieldKind, AnalyticsError>,
}

fn registry() -> &'static [FieldSpec] {
    static REGISTRY: OnceLock<Vec<FieldSpec>> = OnceLock::new();
    REGISTRY.get_or_init(build_registry)
}

fn build_registry() -> Vec<FieldSpec> {
    fn spec(
        name: &'static str,
        pattern: &str,
        orderable: bool,
        delta_eligible: bool,
        parse: fn(&Captures<'_>) -> Result<FieldKind, AnalyticsError>,
    ) -> FieldSpec {
        // Anchored so e.g. "volumes" or "spread_bps" never match a
        // shorter field by prefix.
        let anchored = format!("^(?:{})$", pattern);
        FieldSpec {
            name,
            regex: Regex::new(&anchored).expect("field pattern must compile"),
            orderable,
            delta_eligible,
            parse,
        }
    }

    vec![
        spec("symbol", "symbol", false, false, |_| Ok(FieldKind::Symbol)),
        spec("base_asset", "base_asset", true, false, |_| {
            Ok(FieldKind::BaseAsset)
        }),
        spec("quote_asset", "quote_asset", true, false, |_| {
            Ok(FieldKind::QuoteAsset)
        }),
        spec("volume", "volume", true, true, |_| Ok(FieldKind::Volume)),
        spec("trades", "trades", true, true, |_| Ok(FieldKind::Trades)),
        spec("bid_price", "bid_price", true, true, |_| {
            Ok(FieldKind::BidPrice)
        }),
        spec("ask_price", "ask_price", true, true, |_| {
            Ok(FieldKind::AskPrice)
        }),
        spec("spread", "spread", true, true, |_| Ok(FieldKind::Spread)),
        spec(
            "order_book_bid_total_value[<number of levels>]",
            r"order_book_bid_total_value\[(\d+)\]",
            false,
            true,
            |caps| Ok(FieldKind::BidBookValue(parse_levels(caps)?)),
        ),
        spec(
            "order_book_ask_total_value[<number of levels>]",
            r"order_book_ask_total_value\[(\d+)\]",
            false,
            true,
            |caps| Ok(FieldKind::AskBookValue(parse_levels(caps)?)),
        ),
    ]
}

fn parse_levels(caps: &Captures<'_>) -> Result<usize, AnalyticsError> {
    let expr = caps.get(0).map_or("", |m| m.as_str());
    caps.get(1)
        .and_then(|m| m.as_str().parse::<usize>().ok())
        .ok_or_else(|| AnalyticsError::InvalidField {
            field: expr.to_string(),
            valid: field_names(),
        })
}

/// A field expression resolved against the registry.
#[derive(Debug, Clone)]
pub struct ResolvedField {
    /// The expression as given (e.g. `order_book_bid_total_value[200]`).
    pub expr: String,
    pub kind: FieldKind,
    pub orderable: bool,
    pub delta_eligible: bool,
}

/// Resolve a field expression; first matching registry entry wins.
pub fn resolve_field(expr: &str) -> Result<ResolvedField, AnalyticsError> {
    for spec in registry() {
        if let Some(caps) = spec.regex.captures(expr) {
            return Ok(ResolvedField {
                expr: expr.to_string(),
                kind: (spec.parse)(&caps)?,
                orderable: spec.orderable,
                delta_eligible: spec.delta_eligible,
            });
        }
    }

    Err(AnalyticsError::InvalidField {
        field: expr.to_string(),
        valid: field_names(),
    })
}

/// Display names of every registered field, in registration order.
pub fn field_names() -> Vec<String> {
    registry().iter().map(|s| s.name.to_string()).collect()
}

/// Display names of the fields that can appear in an order expression.
pub fn orderable_field_names() -> Vec<String> {
    registry()
        .iter()
        .filter(|s| s.orderable)
        .map(|s| s.name.to_string())
        .collect()
}

/// Display names of the fields that can be delta-tracked.
pub fn delta_eligible_field_names() -> Vec<String> {
    registry()
        .iter()
        .filter(|s| s.delta_eligible)
        .map(|s| s.name.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolves_plain_fields() {
        assert_eq!(resolve_field("symbol").unwrap().kind, FieldKind::Symbol);
        assert_eq!(resolve_field("volume").unwrap().kind, FieldKind::Volume);
        assert_eq!(resolve_field("spread").unwrap().kind, FieldKind::Spread);
    }

    #[test]
    fn test_resolves_parameterized_fields() {
        let field = resolve_field("order_book_bid_total_value[200]").unwrap();
        assert_eq!(field.kind, FieldKind::BidBookValue(200));
        assert!(!field.orderable);
        assert!(field.delta_eligible);

        let field = resolve_field("order_book_ask_total_value[5]").unwrap();
        assert_eq!(field.kind, FieldKind::AskBookValue(5));
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let a = resolve_field("order_book_bid_total_value[50]").unwrap();
        let b = resolve_field("order_book_bid_total_value[50]").unwrap();
        assert_eq!(a.kind, b.kind);
    }

    #[test]
    fn test_unknown_field_lists_valid_names() {
        let err = resolve_field("nonsense").unwrap_err();
        match err {
            AnalyticsError::InvalidField { field, valid } => {
                assert_eq!(field, "nonsense");
                assert!(valid.contains(&"volume".to_string()));
                assert_eq!(valid.len(), registry().len());
            }
            other => panic!("expected InvalidField, got {:?}", other),
        }
    }

    #[test]
    fn test_patterns_are_anchored() {
        // Prefix or suffix junk must not match a shorter field.
        assert!(resolve_field("volumes").is_err());
        assert!(resolve_field("xvolume").is_err());
        assert!(resolve_field("order_book_bid_total_value[200]x").is_err());
        assert!(resolve_field("order_book_bid_total_value[]").is_err());
    }

    #[test]
    fn test_flags() {
        assert!(!resolve_field("symbol").unwrap().orderable);
        assert!(!resolve_field("symbol").unwrap().delta_eligible);
        assert!(resolve_field("base_asset").unwrap().orderable);
        assert!(!resolve_field("base_asset").unwrap().delta_eligible);
        assert!(resolve_field("trades").unwrap().orderable);
        assert!(resolve_field("trades").unwrap().delta_eligible);
    }

    #[test]
    fn test_name_lists() {
        let all = field_names();
        assert_eq!(all.len(), 10);

        let orderable = orderable_field_names();
        assert!(orderable.contains(&"volume".to_string()));
        assert!(!orderable.contains(&"symbol".to_string()));

        let delta = delta_eligible_field_names();
        assert!(delta.contains(&"spread".to_string()));
        assert!(!delta.contains(&"base_asset".to_string()));
    }
}

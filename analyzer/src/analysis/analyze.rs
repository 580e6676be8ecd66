use crate::error::AnalyticsError;
use crate::exchange::Exchange;
use crate::fields::{ResolvedField, resolve_field, resolve_order};

use super::{AnalysisRequest, Record};

/// Produce a point-in-time snapshot: filter symbols, order them by the
/// requested expression, keep the first `limit`, and resolve the
/// requested fields for each.
///
/// Evaluating an order key or field that is ticker- or book-backed
/// fetches through the shared caches as a side effect. Ordering
/// evaluates the key for *every* candidate symbol, so large symbol sets
/// should order by a bulk-cache-eligible field (volume, trades, ...).
pub async fn analyze(
    exchange: &Exchange,
    request: &AnalysisRequest,
) -> Result<Vec<Record>, AnalyticsError> {
    let mut symbols = exchange.symbols(
        request.quote_assets.as_deref(),
        request.base_assets.as_deref(),
    )?;

    if let Some(order_by) = &request.order_by {
        let order = resolve_order(order_by)?;

        let mut keyed = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            let key = order.field.kind.evaluate(&symbol).await?;
            keyed.push((key, symbol));
        }
        keyed.sort_by(|a, b| a.0.compare(&b.0));
        if order.descending {
            keyed.reverse();
        }

        symbols = keyed.into_iter().map(|(_, symbol)| symbol).collect();
    }

    symbols.truncate(request.limit);

    let field_exprs = request
        .fields
        .clone()
        .unwrap_or_else(|| vec!["symbol".to_string()]);
    let resolved: Vec<ResolvedField> = field_exprs
        .iter()
        .map(|expr| resolve_field(expr))
        .collect::<Result<_, _>>()?;

    let mut records = Vec::with_capacity(symbols.len());
    for symbol in &symbols {
        let mut record = Record::new();
        for field in &resolved {
            record.insert(field.expr.clone(), field.kind.evaluate(symbol).await?);
        }
        records.push(record);
    }

    Ok(records)
}

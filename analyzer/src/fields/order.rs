use crate::error::AnalyticsError;

use super::registry::{ResolvedField, orderable_field_names, resolve_field};

/// An order expression resolved to a sort key and direction.
#[derive(Debug, Clone)]
pub struct ResolvedOrder {
    pub field: ResolvedField,
    pub descending: bool,
}

/// Resolve an order expression: a field optionally suffixed with
/// `[asc]` or `[desc]`. No suffix means ascending. The field must be
/// orderable.
pub fn resolve_order(expr: &str) -> Result<ResolvedOrder, AnalyticsError> {
    let (raw_field, descending) = if let Some(stripped) = expr.strip_suffix("[desc]") {
        (stripped, true)
    } else if let Some(stripped) = expr.strip_suffix("[asc]") {
        (stripped, false)
    } else {
        (expr, false)
    };

    let field = resolve_field(raw_field)?;
    if !field.orderable {
        return Err(AnalyticsError::NotOrderable {
            field: expr.to_string(),
            valid: orderable_field_names(),
        });
    }

    Ok(ResolvedOrder { field, descending })
}

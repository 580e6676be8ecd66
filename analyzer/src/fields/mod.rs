//! The field/ordering mini-language.
//!
//! Field expressions are resolved against a fixed, ordered registry of
//! patterns; the first pattern that matches wins and its captures
//! parameterize the extraction (e.g. `order_book_bid_total_value[200]`).
//! Order expressions are field expressions with an optional `[asc]` or
//! `[desc]` suffix.

mod order;
mod registry;
mod value;

pub use order::{ResolvedOrder, resolve_order};
pub use registry::{
    FieldKind, ResolvedField, delta_eligible_field_names, field_names, orderable_field_names,
    resolve_field,
};
pub use value::FieldValue;

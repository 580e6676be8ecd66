use thiserror::Error;

use crate::client::RestError;

/// Errors surfaced by the analytics core.
///
/// The core never swallows an error: everything here propagates to the
/// caller (CLI/HTTP shell), which translates it into a user-facing
/// response. An insufficient cached book depth is deliberately *not* an
/// error kind: it triggers a refetch inside the depth cache instead.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// Unrecognized field expression.
    #[error("\"{field}\" is not a valid field. Must be one of {valid:?}")]
    InvalidField { field: String, valid: Vec<String> },

    /// A recognized field used in an order expression, but not orderable.
    #[error("\"{field}\" cannot be used for ordering. Orderable fields are {valid:?}")]
    NotOrderable { field: String, valid: Vec<String> },

    /// A recognized field requested for delta tracking, but not delta-eligible.
    #[error("\"{field}\" cannot be delta-tracked. Delta-eligible fields are {valid:?}")]
    NotDeltaEligible { field: String, valid: Vec<String> },

    /// A provided base/quote asset filter matched zero symbols.
    #[error("no symbols found with the provided {kind} asset filter - {assets:?}")]
    EmptyFilterResult { kind: FilterKind, assets: Vec<String> },

    /// Requested order book levels exceed the deepest supported tier.
    #[error("given {requested} levels for order book request, but only up to {max} are allowed")]
    DepthTooDeep { requested: usize, max: usize },

    /// Transport or API failure from the exchange, propagated unchanged.
    #[error("upstream exchange error: {0}")]
    Upstream(#[from] RestError),
}

/// Which symbol filter came up empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Base,
    Quote,
}

impl std::fmt::Display for FilterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterKind::Base => write!(f, "base"),
            FilterKind::Quote => write!(f, "quote"),
        }
    }
}

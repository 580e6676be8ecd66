//! One-shot snapshots and continuous delta tracking.

mod analyze;
mod delta;

pub use analyze::analyze;
pub use delta::{DEFAULT_TRACK_INTERVAL, DeltaStream, DeltaTracker, TrackedRecord};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::fields::FieldValue;

/// One output row: requested field name → resolved value, in request
/// order.
pub type Record = IndexMap<String, FieldValue>;

/// Default number of symbols to analyze when the caller gives no limit.
/// Deliberately small: book-depth fields spend request weight per
/// symbol.
pub const DEFAULT_LIMIT: usize = 5;

/// A snapshot request: which symbols, in what order, showing what.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Keep only symbols quoted in one of these assets (omit = all)
    #[serde(default)]
    pub quote_assets: Option<Vec<String>>,
    /// Keep only symbols based in one of these assets (omit = all)
    #[serde(default)]
    pub base_assets: Option<Vec<String>>,
    /// Order expression, e.g. `"volume[desc]"`
    #[serde(default)]
    pub order_by: Option<String>,
    /// Maximum number of symbols to return
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// Field expressions to resolve per symbol (omit = `["symbol"]`)
    #[serde(default)]
    pub fields: Option<Vec<String>>,
}

impl Default for AnalysisRequest {
    fn default() -> Self {
        AnalysisRequest {
            quote_assets: None,
            base_assets: None,
            order_by: None,
            limit: DEFAULT_LIMIT,
            fields: None,
        }
    }
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

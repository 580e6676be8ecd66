//! Market-data analytics over the exchange's public REST API.
//!
//! The crate polls exchange endpoints through a rate-limit-aware client,
//! caches ticker and order-book snapshots per symbol, and resolves a
//! small field/ordering mini-language into point-in-time or
//! change-over-time views of trading symbols.
//!
//! ```text
//!   CLI / HTTP shell (external)
//!        │
//!        ▼
//!   analysis  ── analyze() one-shot snapshots
//!        │       DeltaTracker continuous delta streams
//!        ▼
//!   fields    ── field + order expression resolution
//!        ▼
//!   exchange  ── symbol index + SymbolRecord handles
//!        ▼
//!   cache     ── ticker + order book caches
//!        ▼
//!   client    ── rate-limit-aware REST client
//! ```

pub mod analysis;
pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod exchange;
pub mod fields;

// Re-export the public surface at crate root for convenience

pub use analysis::{
    AnalysisRequest, DEFAULT_TRACK_INTERVAL, DeltaStream, DeltaTracker, Record, TrackedRecord,
    analyze,
};
pub use cache::{DEPTH_TIERS, OrderBookSnapshot, TickerSnapshot};
pub use client::{RestClient, RestError};
pub use config::ClientConfig;
pub use error::{AnalyticsError, FilterKind};
pub use exchange::{Exchange, SymbolRecord};
pub use fields::{FieldValue, field_names, resolve_field, resolve_order};

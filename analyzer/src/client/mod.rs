//! Rate-limit-aware REST client for the exchange's public market-data API.
//!
//! The client reports quota usage (from the exchange's used-weight
//! response header) through logging only; it never throttles or blocks.
//! Transport and API errors propagate unchanged; there is no retry layer.

mod quota;
mod rest;

pub use quota::{QuotaMonitor, USED_WEIGHT_HEADER};
pub use rest::{RestClient, RestError};

use reqwest::header::HeaderMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

/// Response header carrying the caller's request-weight usage.
pub const USED_WEIGHT_HEADER: &str = "x-mbx-used-weight";

/// Observes the exchange's quota-usage signal on every response.
///
/// Purely a logging side effect: usage above `warn_threshold` of the
/// quota ceiling is logged at warning severity, anything below at info.
/// The most recent usage value is retained for inspection.
#[derive(Clone)]
pub struct QuotaMonitor {
    limit: u32,
    warn_threshold: f64,
    last_usage: Arc<AtomicU32>,
}

impl QuotaMonitor {
    pub fn new(limit: u32, warn_threshold: f64) -> Self {
        QuotaMonitor {
            limit,
            warn_threshold,
            last_usage: Arc::new(AtomicU32::new(0)),
        }
    }

    /// Read the used-weight header from a response, if present, and log.
    pub fn observe(&self, headers: &HeaderMap) {
        let Some(usage) = headers
            .get(USED_WEIGHT_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u32>().ok())
        else {
            return;
        };

        self.last_usage.store(usage, Ordering::Relaxed);

        if f64::from(usage) / f64::from(self.limit) > self.warn_threshold {
            tracing::warn!("API usage is at {} of limit {}", usage, self.limit);
        } else {
            tracing::info!("API usage is at {} of limit {}", usage, self.limit);
        }
    }

    /// Most recently observed usage value (0 before any response).
    pub fn last_usage(&self) -> u32 {
        self.last_usage.load(Ordering::Relaxed)
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }
}

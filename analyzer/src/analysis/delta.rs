use indexmap::IndexMap;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;

use crate::error::AnalyticsError;
use crate::exchange::Exchange;
use crate::fields::{FieldValue, delta_eligible_field_names, resolve_field};

use super::analyze::analyze;
use super::{AnalysisRequest, Record};

/// Default wall-clock interval between polling cycles.
pub const DEFAULT_TRACK_INTERVAL: Duration = Duration::from_millis(60_000);

const STREAM_BUFFER_SIZE: usize = 1024;

/// One emitted row of a delta stream: the current snapshot record plus
/// the per-field absolute change since the previous cycle. A delta is
/// `None` whenever the symbol has no prior observation.
#[derive(Debug, Clone)]
pub struct TrackedRecord {
    pub record: Record,
    pub deltas: IndexMap<String, Option<FieldValue>>,
}

/// Continuous change-over-time tracking of an analysis request.
///
/// Lifecycle is Created → Running → Stopped, terminal: `start()`
/// consumes the tracker, and a stopped stream can only be replaced by
/// creating a new tracker. Each cycle re-runs the snapshot, diffs it
/// against the previous one, emits annotated records, replaces the
/// stored previous snapshot wholesale, then sleeps for the interval.
/// `stop()` is observed at the top of the next cycle, never
/// mid-cycle. An upstream failure mid-cycle is emitted as the final
/// stream item and halts the stream.
pub struct DeltaTracker {
    exchange: Exchange,
    request: AnalysisRequest,
    delta_fields: Vec<String>,
    interval: Duration,
    running: Arc<AtomicBool>,
}

impl std::fmt::Debug for DeltaTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeltaTracker")
            .field("request", &self.request)
            .field("delta_fields", &self.delta_fields)
            .field("interval", &self.interval)
            .field("running", &self.running)
            .finish_non_exhaustive()
    }
}

impl DeltaTracker {
    /// Validate and create a tracker.
    ///
    /// Every delta field must be delta-eligible; `symbol` is prepended
    /// to the output fields if absent and each delta field is appended
    /// if not already requested, so emitted records always carry what
    /// the diff needs.
    pub fn new(
        exchange: Exchange,
        mut request: AnalysisRequest,
        delta_fields: Vec<String>,
        interval: Duration,
    ) -> Result<Self, AnalyticsError> {
        request.fields = Some(normalized_fields(request.fields.take(), &delta_fields)?);

        Ok(DeltaTracker {
            exchange,
            request,
            delta_fields,
            interval,
            running: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Transition to Running: spawn the polling loop and hand back the
    /// record stream.
    pub fn start(self) -> DeltaStream {
        let (tx, rx) = mpsc::channel(STREAM_BUFFER_SIZE);
        let running = Arc::clone(&self.running);
        running.store(true, Ordering::SeqCst);

        tokio::spawn(self.run(tx));

        DeltaStream { rx, running }
    }

    async fn run(self, tx: mpsc::Sender<Result<TrackedRecord, AnalyticsError>>) {
        let mut previous: HashMap<String, Record> = HashMap::new();
        let mut cycle: u64 = 0;

        while self.running.load(Ordering::SeqCst) {
            // Each cycle observes fresh data; a warm cache would make
            // every delta zero.
            self.exchange.clear_caches();

            let records = match analyze(&self.exchange, &self.request).await {
                Ok(records) => records,
                Err(e) => {
                    tracing::error!("delta cycle failed, halting stream: {}", e);
                    let _ = tx.send(Err(e)).await;
                    self.running.store(false, Ordering::SeqCst);
                    return;
                }
            };

            let mut next_previous = HashMap::with_capacity(records.len());
            for record in records {
                let Some(symbol) = record
                    .get("symbol")
                    .and_then(FieldValue::as_text)
                    .map(str::to_string)
                else {
                    continue;
                };

                let deltas = self
                    .delta_fields
                    .iter()
                    .map(|field| {
                        let delta = previous
                            .get(&symbol)
                            .and_then(|prev| prev.get(field))
                            .and_then(|prev_value| {
                                record
                                    .get(field)
                                    .and_then(|current| current.abs_delta(prev_value))
                            });
                        (field.clone(), delta)
                    })
                    .collect();

                next_previous.insert(symbol, record.clone());

                if tx.send(Ok(TrackedRecord { record, deltas })).await.is_err() {
                    // Consumer dropped the stream
                    return;
                }
            }

            // Wholesale replace: never merge fresh and stale cycles
            previous = next_previous;

            cycle += 1;
            tracing::debug!("delta cycle {} complete", cycle);
            tokio::time::sleep(self.interval).await;
        }

        tracing::info!("delta tracker stopped after {} cycles", cycle);
    }
}

/// Consumer side of a running tracker.
pub struct DeltaStream {
    rx: mpsc::Receiver<Result<TrackedRecord, AnalyticsError>>,
    running: Arc<AtomicBool>,
}

impl DeltaStream {
    /// Next annotated record. `None` once the stream has stopped and
    /// drained.
    pub async fn next(&mut self) -> Option<Result<TrackedRecord, AnalyticsError>> {
        self.rx.recv().await
    }

    /// Request a stop. Honored at the top of the next cycle; records
    /// already emitted remain readable until the stream drains.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Whether the polling loop is still scheduled to run more cycles.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

impl Drop for DeltaStream {
    fn drop(&mut self) {
        self.stop();
    }
}

fn normalized_fields(
    fields: Option<Vec<String>>,
    delta_fields: &[String],
) -> Result<Vec<String>, AnalyticsError> {
    let mut fields = fields.unwrap_or_else(|| vec!["symbol".to_string()]);
    if !fields.iter().any(|f| f == "symbol") {
        fields.insert(0, "symbol".to_string());
    }

    for delta_field in delta_fields {
        let resolved = resolve_field(delta_field)?;
        if !resolved.delta_eligible {
            return Err(AnalyticsError::NotDeltaEligible {
                field: delta_field.clone(),
                valid: delta_eligible_field_names(),
            });
        }
        if !fields.contains(delta_field) {
            fields.push(delta_field.clone());
        }
    }

    Ok(fields)
}

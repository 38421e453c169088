//! Stream scoring loop and its broker abstraction
//!
//! The loop pulls one record at a time, scores it, and republishes. Broker
//! access hides behind two small traits so the loop also runs against
//! in-memory fakes in tests.

use crate::error::ProcessingError;
use crate::metrics::PipelineMetrics;
use crate::models::HeuristicModel;
use crate::types::Transaction;
use async_trait::async_trait;
use bytes::Bytes;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Ordered pull source of raw transaction records.
#[async_trait]
pub trait RecordSource: Send {
    /// Wait for the next record; `None` means the stream ended.
    async fn next_record(&mut self) -> Option<Bytes>;
}

/// Fire-and-forget sink for scored records.
#[async_trait]
pub trait RecordSink: Send + Sync {
    /// Publish one serialized scored record.
    async fn publish(&self, payload: Bytes) -> Result<(), ProcessingError>;
}

/// A record scored and ready to publish.
#[derive(Debug)]
pub struct ScoredRecord {
    pub transaction_id: Option<String>,
    pub score: f64,
    pub payload: Bytes,
}

/// Sequential scorer driving records from a source into a sink.
pub struct StreamScorer {
    model: HeuristicModel,
    metrics: Arc<PipelineMetrics>,
}

impl StreamScorer {
    pub fn new(model: HeuristicModel, metrics: Arc<PipelineMetrics>) -> Self {
        Self { model, metrics }
    }

    /// Decode, score, and re-encode one record.
    pub fn score_record(&self, payload: &[u8]) -> Result<ScoredRecord, ProcessingError> {
        let transaction: Transaction = serde_json::from_slice(payload)?;
        let score = self.model.predict(&transaction);
        let transaction_id = transaction.id.clone();
        let encoded = serde_json::to_vec(&transaction.with_score(score))?;

        Ok(ScoredRecord {
            transaction_id,
            score,
            payload: encoded.into(),
        })
    }

    /// Run the consume loop until the source ends or `shutdown` fires.
    ///
    /// Per-record failures are logged and skipped; nothing escapes the loop.
    pub async fn run<S, K>(&self, source: &mut S, sink: &K, shutdown: CancellationToken)
    where
        S: RecordSource,
        K: RecordSink,
    {
        info!("Stream scorer loop started");

        loop {
            let payload = tokio::select! {
                _ = shutdown.cancelled() => {
                    info!("Shutdown requested, leaving consume loop");
                    break;
                }
                next = source.next_record() => match next {
                    Some(payload) => payload,
                    None => {
                        info!("Transaction stream closed, leaving consume loop");
                        break;
                    }
                },
            };

            let started = Instant::now();
            match self.score_record(&payload) {
                Ok(record) => match sink.publish(record.payload).await {
                    Ok(()) => {
                        self.metrics
                            .record_transaction(started.elapsed(), record.score);
                        info!(
                            transaction_id = record.transaction_id.as_deref().unwrap_or("unknown"),
                            fraud_score = record.score,
                            "Processed transaction"
                        );
                    }
                    Err(e) => {
                        self.metrics.record_skip();
                        error!(error = %e, "Error processing transaction");
                    }
                },
                Err(e) => {
                    self.metrics.record_skip();
                    error!(error = %e, "Error processing transaction");
                }
            }

            let processed = self.metrics.transactions_processed.load(Ordering::Relaxed);
            if processed > 0 && processed % 100 == 0 {
                info!(
                    processed,
                    throughput = format!("{:.1}/sec", self.metrics.get_throughput()),
                    "Processing milestone"
                );
            }
        }
    }
}

//! NATS message producer for scored transactions

use crate::error::ProcessingError;
use crate::processor::RecordSink;
use async_nats::Client;
use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;

/// Producer for publishing scored transactions to NATS
#[derive(Clone)]
pub struct ScoredProducer {
    client: Client,
    subject: String,
}

impl ScoredProducer {
    /// Create a new scored-transaction producer
    pub fn new(client: Client, subject: &str) -> Self {
        Self {
            client,
            subject: subject.to_string(),
        }
    }

    /// Get the subject name
    pub fn subject(&self) -> &str {
        &self.subject
    }
}

#[async_trait]
impl RecordSink for ScoredProducer {
    async fn publish(&self, payload: Bytes) -> Result<(), ProcessingError> {
        self.client
            .publish(self.subject.clone(), payload)
            .await
            .map_err(|e| ProcessingError::Publish(e.to_string()))?;

        debug!(subject = %self.subject, "Published scored transaction");
        Ok(())
    }
}

//! NATS message consumer for incoming transactions

use crate::processor::RecordSource;
use anyhow::Result;
use async_nats::{Client, Subscriber};
use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use tracing::info;

/// Consumer for receiving transactions from NATS
///
/// Subscribes under a queue group, so concurrently running scorer instances
/// split the stream instead of each seeing every record.
pub struct TransactionConsumer {
    client: Client,
    subject: String,
    queue_group: String,
}

impl TransactionConsumer {
    /// Create a new transaction consumer
    pub fn new(client: Client, subject: &str, queue_group: &str) -> Self {
        Self {
            client,
            subject: subject.to_string(),
            queue_group: queue_group.to_string(),
        }
    }

    /// Join the queue group on the transaction subject
    pub async fn subscribe(&self) -> Result<Subscriber> {
        let subscriber = self
            .client
            .queue_subscribe(self.subject.clone(), self.queue_group.clone())
            .await?;
        info!(
            subject = %self.subject,
            queue_group = %self.queue_group,
            "Subscribed to transaction subject"
        );
        Ok(subscriber)
    }

    /// Get the subject name
    pub fn subject(&self) -> &str {
        &self.subject
    }
}

#[async_trait]
impl RecordSource for Subscriber {
    async fn next_record(&mut self) -> Option<Bytes> {
        self.next().await.map(|message| message.payload)
    }
}

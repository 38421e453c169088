//! End-to-end flow tests for the stream scorer: decode, score, attach,
//! publish, driven against in-memory broker fakes.

use async_trait::async_trait;
use bytes::Bytes;
use fraud_scorer::metrics::PipelineMetrics;
use fraud_scorer::models::noise::NoiseSource;
use fraud_scorer::models::HeuristicModel;
use fraud_scorer::processor::{RecordSink, RecordSource, StreamScorer};
use fraud_scorer::ProcessingError;
use serde_json::{json, Value};
use std::sync::atomic::Ordering;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

struct ChannelSource(mpsc::Receiver<Bytes>);

#[async_trait]
impl RecordSource for ChannelSource {
    async fn next_record(&mut self) -> Option<Bytes> {
        self.0.recv().await
    }
}

#[derive(Default)]
struct CaptureSink {
    published: Mutex<Vec<Bytes>>,
}

impl CaptureSink {
    fn records(&self) -> Vec<Value> {
        self.published
            .lock()
            .unwrap()
            .iter()
            .map(|payload| serde_json::from_slice(payload).unwrap())
            .collect()
    }
}

#[async_trait]
impl RecordSink for CaptureSink {
    async fn publish(&self, payload: Bytes) -> Result<(), ProcessingError> {
        self.published.lock().unwrap().push(payload);
        Ok(())
    }
}

struct FixedNoise(f64);

impl NoiseSource for FixedNoise {
    fn sample(&self) -> f64 {
        self.0
    }
}

#[tokio::test]
async fn scored_stream_preserves_fields_and_stays_in_range() {
    let metrics = Arc::new(PipelineMetrics::new());
    let scorer = StreamScorer::new(HeuristicModel::new(), metrics.clone());

    let record = json!({
        "id": "tx_3",
        "amount": 1500,
        "timestamp": "2024-03-01T09:30:00Z",
        "is_foreign": true,
        "merchant_id": "merchant_42",
        "currency": "EUR"
    });

    let (sender, receiver) = mpsc::channel(512);
    for _ in 0..300 {
        sender.send(Bytes::from(record.to_string())).await.unwrap();
    }
    drop(sender);

    let mut source = ChannelSource(receiver);
    let sink = CaptureSink::default();
    scorer.run(&mut source, &sink, CancellationToken::new()).await;

    let published = sink.records();
    assert_eq!(published.len(), 300);

    let mut scores = Vec::with_capacity(published.len());
    let inbound_fields = record.as_object().unwrap();
    for scored in &published {
        let score = scored["fraud_score"].as_f64().unwrap();
        assert!((0.0..=100.0).contains(&score), "score {score} out of range");
        scores.push(score);

        for (key, value) in inbound_fields {
            assert_eq!(&scored[key], value, "field {key} changed in flight");
        }
        assert_eq!(
            scored.as_object().unwrap().len(),
            inbound_fields.len() + 1,
            "outbound record should add exactly one field"
        );
    }

    // amount > 1000 plus foreign puts the pre-noise score at 60
    let mean = scores.iter().sum::<f64>() / scores.len() as f64;
    assert!((mean - 60.0).abs() < 4.0, "mean score {mean} too far from 60");

    assert_eq!(metrics.transactions_processed.load(Ordering::Relaxed), 300);
    assert_eq!(metrics.transactions_skipped.load(Ordering::Relaxed), 0);
}

#[tokio::test]
async fn poison_records_are_skipped_without_stopping_the_loop() {
    let metrics = Arc::new(PipelineMetrics::new());
    let scorer = StreamScorer::new(
        HeuristicModel::with_noise(Box::new(FixedNoise(0.0))),
        metrics.clone(),
    );

    let (sender, receiver) = mpsc::channel(8);
    let first = json!({"id": "tx_1", "amount": 100.0}).to_string();
    let last = json!({"id": "tx_2", "amount": 700.0}).to_string();
    sender.send(Bytes::from(first)).await.unwrap();
    sender.send(Bytes::from_static(b"{truncated")).await.unwrap();
    sender
        .send(Bytes::from_static(br#"{"id": "tx_bad", "amount": "plenty"}"#))
        .await
        .unwrap();
    sender.send(Bytes::from_static(b"[1, 2, 3]")).await.unwrap();
    sender.send(Bytes::from(last)).await.unwrap();
    drop(sender);

    let mut source = ChannelSource(receiver);
    let sink = CaptureSink::default();
    scorer.run(&mut source, &sink, CancellationToken::new()).await;

    let published = sink.records();
    assert_eq!(published.len(), 2);
    assert_eq!(published[0]["id"], json!("tx_1"));
    assert_eq!(published[0]["fraud_score"], json!(10.0));
    assert_eq!(published[1]["id"], json!("tx_2"));
    assert_eq!(published[1]["fraud_score"], json!(25.0));

    assert_eq!(metrics.transactions_processed.load(Ordering::Relaxed), 2);
    assert_eq!(metrics.transactions_skipped.load(Ordering::Relaxed), 3);
}

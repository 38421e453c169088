//! Stream Scorer - Main Entry Point
//!
//! Consumes transactions from NATS, scores each with the heuristic model,
//! and republishes the record with its fraud score attached.

use anyhow::Result;
use fraud_scorer::{
    config::AppConfig,
    consumer::TransactionConsumer,
    logging,
    metrics::{MetricsReporter, PipelineMetrics},
    models::{HeuristicModel, FEATURE_NAMES},
    processor::StreamScorer,
    producer::ScoredProducer,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let config = AppConfig::load()?;
    logging::init(&config.logging);

    info!("Starting stream scorer");

    let metrics = Arc::new(PipelineMetrics::new());

    let model = HeuristicModel::new();
    info!(
        "Heuristic model initialized ({} features)",
        FEATURE_NAMES.len()
    );

    // The servers setting accepts a comma-separated list
    let client = async_nats::connect(&config.stream.servers).await?;
    info!("Connected to NATS at {}", config.stream.servers);

    let consumer = TransactionConsumer::new(
        client.clone(),
        &config.stream.transaction_subject,
        &config.stream.queue_group,
    );
    let producer = ScoredProducer::new(client.clone(), &config.stream.scored_subject);

    info!("Consuming from subject: {}", consumer.subject());
    info!("Publishing scored transactions to: {}", producer.subject());

    // Start metrics reporter (prints summary every 30 seconds)
    let metrics_clone = metrics.clone();
    tokio::spawn(async move {
        let reporter = MetricsReporter::new(metrics_clone, 30);
        reporter.start().await;
    });

    // Stop the consume loop on Ctrl-C
    let shutdown = CancellationToken::new();
    let token = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Termination signal received");
                token.cancel();
            }
            Err(e) => error!(error = %e, "Failed to listen for termination signal"),
        }
    });

    let mut subscription = consumer.subscribe().await?;

    let scorer = StreamScorer::new(model, metrics.clone());
    scorer.run(&mut subscription, &producer, shutdown).await;

    // Release broker handles before exit
    subscription.unsubscribe().await?;
    client.flush().await?;

    info!("Pipeline shutting down...");
    metrics.print_summary();

    Ok(())
}

//! Test Transaction Sender
//!
//! Generates and publishes test transactions to NATS for scoring runs.
//! The records carry the fields the stream scorer interprets plus a few
//! pass-through fields, and also satisfy the HTTP scorer's validation.

use chrono::Utc;
use rand::Rng;
use serde::Serialize;
use std::time::Duration;
use tracing::{info, warn};

/// Transaction structure matching the scorer's expected format
#[derive(Debug, Clone, Serialize)]
struct TestTransaction {
    id: String,
    amount: f64,
    timestamp: String,
    merchant_id: String,
    merchant_category: String,
    currency: String,
    time_since_last_transaction: f64,
    distance_from_last_transaction: f64,
    is_foreign: bool,
}

/// Transaction generator for testing
struct TransactionGenerator {
    rng: rand::rngs::ThreadRng,
    transaction_counter: u64,
}

impl TransactionGenerator {
    fn new() -> Self {
        Self {
            rng: rand::thread_rng(),
            transaction_counter: 0,
        }
    }

    /// Generate a routine transaction
    fn generate_routine(&mut self) -> TestTransaction {
        self.transaction_counter += 1;

        TestTransaction {
            id: format!("tx_{:012}", self.transaction_counter),
            amount: self.rng.gen_range(10.0..500.0),
            timestamp: Utc::now().to_rfc3339(),
            merchant_id: format!("merchant_{}", self.rng.gen_range(1..1000)),
            merchant_category: self
                .random_choice(&["5411", "5812", "5541", "5912", "5999"])
                .to_string(),
            currency: self.random_choice(&["USD", "EUR", "GBP", "CAD"]).to_string(),
            time_since_last_transaction: self.rng.gen_range(300.0..7200.0),
            distance_from_last_transaction: self.rng.gen_range(0.0..100.0),
            is_foreign: self.rng.gen_bool(0.1),
        }
    }

    /// Generate a suspicious transaction
    fn generate_suspicious(&mut self) -> TestTransaction {
        self.transaction_counter += 1;

        TestTransaction {
            id: format!("tx_{:012}", self.transaction_counter),
            amount: self.rng.gen_range(1000.0..10000.0), // High amount
            timestamp: Utc::now().to_rfc3339(),
            merchant_id: format!("merchant_{}", self.rng.gen_range(1..1000)),
            merchant_category: self.random_choice(&["5999", "5912"]).to_string(),
            currency: self.random_choice(&["USD", "EUR"]).to_string(),
            time_since_last_transaction: self.rng.gen_range(60.0..300.0), // Very short time
            distance_from_last_transaction: self.rng.gen_range(500.0..5000.0), // Large distance
            is_foreign: true,
        }
    }

    fn random_choice<'a>(&mut self, choices: &[&'a str]) -> &'a str {
        choices[self.rng.gen_range(0..choices.len())]
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("send_transactions=info".parse()?),
        )
        .init();

    info!("Starting Test Transaction Sender");

    // Parse arguments
    let args: Vec<String> = std::env::args().collect();
    let nats_url = args
        .get(1)
        .map(|s| s.as_str())
        .unwrap_or("nats://localhost:4222");
    let subject = args.get(2).map(|s| s.as_str()).unwrap_or("transactions");
    let count: u64 = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(100);
    let suspicious_rate: f64 = args.get(4).and_then(|s| s.parse().ok()).unwrap_or(0.1);
    let delay_ms: u64 = args.get(5).and_then(|s| s.parse().ok()).unwrap_or(100);

    info!(
        nats_url = %nats_url,
        subject = %subject,
        count = count,
        suspicious_rate = suspicious_rate,
        delay_ms = delay_ms,
        "Configuration loaded"
    );

    // Connect to NATS
    let client = match async_nats::connect(nats_url).await {
        Ok(c) => {
            info!("Connected to NATS");
            c
        }
        Err(e) => {
            warn!(error = %e, "Failed to connect to NATS. Running in dry-run mode.");
            return run_dry_mode(count, suspicious_rate, delay_ms).await;
        }
    };

    // Generate and publish transactions
    let mut generator = TransactionGenerator::new();
    let mut rng = rand::thread_rng();

    info!("Starting to publish {} transactions...", count);

    let mut routine_count = 0;
    let mut suspicious_count = 0;

    for i in 0..count {
        let transaction = if rng.gen_bool(suspicious_rate) {
            suspicious_count += 1;
            generator.generate_suspicious()
        } else {
            routine_count += 1;
            generator.generate_routine()
        };

        let payload = serde_json::to_vec(&transaction)?;

        client.publish(subject.to_string(), payload.into()).await?;

        if (i + 1) % 10 == 0 {
            info!(
                "Published {}/{} transactions ({} routine, {} suspicious)",
                i + 1,
                count,
                routine_count,
                suspicious_count
            );
        }

        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    }

    info!(
        "Completed! Published {} transactions ({} routine, {} suspicious)",
        count, routine_count, suspicious_count
    );

    Ok(())
}

async fn run_dry_mode(count: u64, suspicious_rate: f64, delay_ms: u64) -> anyhow::Result<()> {
    info!("Running in dry-run mode (no NATS connection)");

    let mut generator = TransactionGenerator::new();
    let mut rng = rand::thread_rng();

    for i in 0..count {
        let transaction = if rng.gen_bool(suspicious_rate) {
            generator.generate_suspicious()
        } else {
            generator.generate_routine()
        };

        let json = serde_json::to_string_pretty(&transaction)?;

        if (i + 1) % 10 == 0 || i == 0 {
            info!("Sample transaction {}:\n{}", i + 1, json);
        }

        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    }

    Ok(())
}

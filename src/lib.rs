//! Transaction Scoring Service Library
//!
//! Two independent scoring paths: a synchronous HTTP scorer and a
//! NATS-driven stream scorer built around a heuristic model.

pub mod api;
pub mod config;
pub mod consumer;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod processor;
pub mod producer;
pub mod types;

pub use config::AppConfig;
pub use consumer::TransactionConsumer;
pub use error::{MissingFieldsError, ProcessingError};
pub use models::{HeuristicModel, NoiseSource};
pub use processor::{RecordSink, RecordSource, StreamScorer};
pub use producer::ScoredProducer;
pub use types::{ScoredTransaction, Transaction};

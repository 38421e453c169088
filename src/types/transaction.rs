//! Transaction record types shared by both scoring paths

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// A transaction record as it arrives on the stream
///
/// Records are open JSON objects. The fields the scorers interpret are typed
/// here; everything else lands in `extra` and passes through untouched.
/// Numeric fields keep their `serde_json::Number` representation so an
/// integer amount republishes as the same integer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique transaction identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Transaction amount
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Number>,

    /// Event time, carried as an opaque string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,

    /// Merchant category code or label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant_category: Option<String>,

    /// Seconds since the account's previous transaction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_since_last_transaction: Option<Number>,

    /// Distance from the account's previous transaction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_from_last_transaction: Option<Number>,

    /// Whether the transaction happened outside the home country
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_foreign: Option<bool>,

    /// Fields this service does not interpret, forwarded as-is
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Transaction {
    /// Amount, defaulting to zero when absent
    pub fn amount(&self) -> f64 {
        self.amount.as_ref().and_then(Number::as_f64).unwrap_or(0.0)
    }

    /// Merchant category, defaulting to the empty string
    pub fn merchant_category(&self) -> &str {
        self.merchant_category.as_deref().unwrap_or("")
    }

    /// Seconds since the previous transaction, defaulting to zero
    pub fn time_since_last_transaction(&self) -> f64 {
        self.time_since_last_transaction
            .as_ref()
            .and_then(Number::as_f64)
            .unwrap_or(0.0)
    }

    /// Distance from the previous transaction, defaulting to zero
    pub fn distance_from_last_transaction(&self) -> f64 {
        self.distance_from_last_transaction
            .as_ref()
            .and_then(Number::as_f64)
            .unwrap_or(0.0)
    }

    /// Foreign-transaction flag, defaulting to false
    pub fn is_foreign(&self) -> bool {
        self.is_foreign.unwrap_or(false)
    }

    /// Attach a fraud score, replacing any score already on the record
    pub fn with_score(mut self, score: f64) -> ScoredTransaction {
        self.extra.remove("fraud_score");
        ScoredTransaction {
            transaction: self,
            fraud_score: score,
        }
    }
}

/// A transaction enriched with the model's score, as published downstream
///
/// Serializes to the inbound record's fields plus `fraud_score`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredTransaction {
    #[serde(flatten)]
    pub transaction: Transaction,

    /// Heuristic fraud score in [0, 100]
    pub fraud_score: f64,
}

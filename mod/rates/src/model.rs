use serde::{Deserialize, Serialize};

/// A published commodity rate for one (effective date, category) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRate {
    pub id: String,

    /// Effective date, `YYYY-MM-DD`.
    pub effective_date: String,

    /// Commodity category, stored uppercase (e.g. `LATEX60`, `SCRAP`).
    pub category: String,

    /// Rate in Indian rupees per kilogram.
    pub inr: f64,

    /// Rate in US dollars per kilogram.
    pub usd: f64,

    /// Who published it ("admin" for manual publishes).
    pub source: String,

    pub created_at: String,
    pub updated_at: String,
}

/// Payload for publishing or updating a rate.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishRate {
    pub effective_date: String,
    pub category: String,
    pub inr: f64,
    pub usd: f64,
}

use serde::{Deserialize, Serialize};

/// One tracked product and its current stock level.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockItem {
    pub product_name: String,

    /// Current quantity on hand, liters. Never negative.
    pub quantity_liters: f64,

    /// Below this level a low-stock warning is logged.
    pub min_threshold: f64,

    pub last_updated: String,
}

/// Payload for seeding a new product.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStockItem {
    pub product_name: String,

    /// Opening quantity, liters.
    #[serde(default)]
    pub quantity_liters: f64,

    #[serde(default)]
    pub min_threshold: f64,
}

/// Payload for adjusting a stock level.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustStock {
    /// Signed delta in liters: positive receives, negative dispatches.
    pub quantity_change: f64,
}

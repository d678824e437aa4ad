//! Inventory module — stock levels and signed adjustments.
//!
//! # Resources
//!
//! - **StockItem** — one tracked product (latex, ammonia, ...) with its
//!   current quantity in liters and a minimum threshold.
//!
//! Adjustments are signed deltas: receiving stock is positive, dispatch is
//! negative. This is why the request guard carves out `/stock` routes —
//! negative numbers are the normal case here, not a client mistake. The
//! service still floors quantities at zero.

pub mod api;
pub mod model;
pub mod service;

use std::sync::Arc;

use axum::Router;

use hfp_core::Module;

pub use crate::service::InventoryService;

/// Inventory module implementing the Module trait.
pub struct InventoryModule {
    service: Arc<InventoryService>,
}

impl InventoryModule {
    /// Create a new InventoryModule.
    pub fn new() -> Self {
        Self {
            service: Arc::new(InventoryService::new()),
        }
    }

    /// Get a reference to the underlying InventoryService.
    pub fn service(&self) -> &Arc<InventoryService> {
        &self.service
    }
}

impl Default for InventoryModule {
    fn default() -> Self {
        Self::new()
    }
}

impl Module for InventoryModule {
    fn name(&self) -> &str {
        "inventory"
    }

    fn routes(&self) -> Router {
        api::build_router(self.service.clone())
    }
}

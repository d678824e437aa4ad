//! Rates module — daily commodity rate publishing and lookup.
//!
//! # Resources
//!
//! - **DailyRate** — one published rate per (effective date, category),
//!   e.g. the LATEX60 rate for 2026-08-30 in INR and USD.
//!
//! Publishing upserts: re-publishing for the same date and category updates
//! the existing entry. Updates are blocked from the configured cutoff hour
//! (IST) onward, mirroring the business rule that the day's rate is final
//! by late afternoon.
//!
//! # Usage
//!
//! ```ignore
//! use hfp_rates::{RatesConfig, RatesModule};
//!
//! let module = RatesModule::new(RatesConfig::default());
//! let router = module.routes(); // Mount under /rates
//! ```

pub mod api;
pub mod model;
pub mod service;

use std::sync::Arc;

use axum::Router;

use hfp_core::Module;

pub use crate::service::{RatesConfig, RatesService};

/// Rates module implementing the Module trait.
pub struct RatesModule {
    service: Arc<RatesService>,
}

impl RatesModule {
    /// Create a new RatesModule.
    pub fn new(config: RatesConfig) -> Self {
        Self {
            service: Arc::new(RatesService::new(config)),
        }
    }

    /// Get a reference to the underlying RatesService.
    pub fn service(&self) -> &Arc<RatesService> {
        &self.service
    }
}

impl Module for RatesModule {
    fn name(&self) -> &str {
        "rates"
    }

    fn routes(&self) -> Router {
        api::build_router(self.service.clone())
    }
}

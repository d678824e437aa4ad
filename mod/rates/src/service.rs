//! Rate publishing service.
//!
//! State is held in process memory behind an `RwLock`; persistence is out
//! of scope for this service, so callers treat it as the storage boundary.

use std::sync::RwLock;

use chrono::{Duration, NaiveDate, Timelike, Utc};
use tracing::info;

use hfp_core::{new_id, now_rfc3339, ListParams, ListResult, ServiceError};

use crate::model::{DailyRate, PublishRate};

/// IST has no DST, so a fixed +05:30 offset is exact.
const IST_OFFSET_SECS: i64 = 5 * 3600 + 30 * 60;

/// Default category when a lookup doesn't name one.
pub const DEFAULT_CATEGORY: &str = "LATEX60";

/// Rates service configuration.
#[derive(Debug, Clone)]
pub struct RatesConfig {
    /// Publishing is blocked from this hour (IST) onward. `None` disables
    /// the cutoff.
    pub cutoff_hour_ist: Option<u32>,
}

impl Default for RatesConfig {
    fn default() -> Self {
        Self {
            cutoff_hour_ist: Some(16),
        }
    }
}

/// Daily rate publishing and lookup.
pub struct RatesService {
    config: RatesConfig,
    rates: RwLock<Vec<DailyRate>>,
}

impl RatesService {
    pub fn new(config: RatesConfig) -> Self {
        Self {
            config,
            rates: RwLock::new(Vec::new()),
        }
    }

    /// Publish or update the rate for (effective date, category).
    pub fn publish(&self, input: PublishRate) -> Result<DailyRate, ServiceError> {
        self.check_cutoff()?;

        let effective_date = normalize_date(&input.effective_date)?;
        let category = input.category.trim().to_uppercase();
        if category.is_empty() {
            return Err(ServiceError::Validation("category is required".into()));
        }

        let now = now_rfc3339();
        let mut rates = self.write_lock()?;

        if let Some(existing) = rates
            .iter_mut()
            .find(|r| r.effective_date == effective_date && r.category == category)
        {
            existing.inr = input.inr;
            existing.usd = input.usd;
            existing.updated_at = now;
            info!(%category, %effective_date, "daily rate updated");
            return Ok(existing.clone());
        }

        let rate = DailyRate {
            id: new_id(),
            effective_date: effective_date.clone(),
            category: category.clone(),
            inr: input.inr,
            usd: input.usd,
            source: "admin".to_string(),
            created_at: now.clone(),
            updated_at: now,
        };
        rates.push(rate.clone());
        info!(%category, %effective_date, "daily rate published");
        Ok(rate)
    }

    /// Most recent rate for a category.
    pub fn latest(&self, category: &str) -> Result<DailyRate, ServiceError> {
        let category = category.trim().to_uppercase();
        let rates = self.read_lock()?;
        rates
            .iter()
            .filter(|r| r.category == category)
            .max_by(|a, b| {
                (&a.effective_date, &a.updated_at).cmp(&(&b.effective_date, &b.updated_at))
            })
            .cloned()
            .ok_or_else(|| ServiceError::NotFound(format!("no rate published for {}", category)))
    }

    /// Rate history, newest first, optionally filtered by category.
    pub fn history(
        &self,
        category: Option<&str>,
        params: &ListParams,
    ) -> Result<ListResult<DailyRate>, ServiceError> {
        let category = category.map(|c| c.trim().to_uppercase());
        let rates = self.read_lock()?;

        let mut items: Vec<DailyRate> = rates
            .iter()
            .filter(|r| category.as_deref().is_none_or(|c| r.category == c))
            .cloned()
            .collect();
        items.sort_by(|a, b| {
            (&b.effective_date, &b.updated_at).cmp(&(&a.effective_date, &a.updated_at))
        });

        let total = items.len();
        let items = items
            .into_iter()
            .skip(params.offset)
            .take(params.limit)
            .collect();
        Ok(ListResult { items, total })
    }

    fn check_cutoff(&self) -> Result<(), ServiceError> {
        let Some(cutoff) = self.config.cutoff_hour_ist else {
            return Ok(());
        };
        if ist_hour_now() >= cutoff {
            return Err(ServiceError::PermissionDenied(format!(
                "rate updates are allowed only before {}:00 IST",
                cutoff
            )));
        }
        Ok(())
    }

    fn read_lock(&self) -> Result<std::sync::RwLockReadGuard<'_, Vec<DailyRate>>, ServiceError> {
        self.rates
            .read()
            .map_err(|_| ServiceError::Internal("rates lock poisoned".into()))
    }

    fn write_lock(&self) -> Result<std::sync::RwLockWriteGuard<'_, Vec<DailyRate>>, ServiceError> {
        self.rates
            .write()
            .map_err(|_| ServiceError::Internal("rates lock poisoned".into()))
    }
}

/// Current hour of day in IST. Shifts the UTC clock by the fixed offset and
/// reads the hour field, same as the upstream implementation.
fn ist_hour_now() -> u32 {
    (Utc::now() + Duration::seconds(IST_OFFSET_SECS)).hour()
}

/// Normalize an effective date to `YYYY-MM-DD`. Accepts a bare date or a
/// full RFC 3339 timestamp (the date part is kept).
fn normalize_date(input: &str) -> Result<String, ServiceError> {
    let input = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(date.format("%Y-%m-%d").to_string());
    }
    if let Ok(datetime) = chrono::DateTime::parse_from_rfc3339(input) {
        return Ok(datetime.date_naive().format("%Y-%m-%d").to_string());
    }
    Err(ServiceError::Validation(format!(
        "invalid effectiveDate: {}",
        input
    )))
}

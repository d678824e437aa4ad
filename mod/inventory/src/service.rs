//! Stock level service. In-memory, same storage boundary as the rates
//! service.

use std::sync::RwLock;

use tracing::{info, warn};

use hfp_core::{now_rfc3339, ServiceError};

use crate::model::{CreateStockItem, StockItem};

/// Stock levels keyed by product name.
pub struct InventoryService {
    items: RwLock<Vec<StockItem>>,
}

impl InventoryService {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
        }
    }

    /// Seed a new product.
    ///
    /// The guard bypasses `/stock` routes, so negative opening values can
    /// reach this service; it enforces non-negativity itself.
    pub fn create(&self, input: CreateStockItem) -> Result<StockItem, ServiceError> {
        let product_name = input.product_name.trim().to_string();
        if product_name.is_empty() {
            return Err(ServiceError::Validation("productName is required".into()));
        }
        if input.quantity_liters < 0.0 {
            return Err(ServiceError::Validation(
                "quantityLiters cannot be negative".into(),
            ));
        }
        if input.min_threshold < 0.0 {
            return Err(ServiceError::Validation(
                "minThreshold cannot be negative".into(),
            ));
        }

        let mut items = self.write_lock()?;
        if items.iter().any(|i| i.product_name == product_name) {
            return Err(ServiceError::Conflict(format!(
                "stock item '{}' already exists",
                product_name
            )));
        }

        let item = StockItem {
            product_name: product_name.clone(),
            quantity_liters: input.quantity_liters,
            min_threshold: input.min_threshold,
            last_updated: now_rfc3339(),
        };
        items.push(item.clone());
        info!(product = %product_name, "stock item created");
        Ok(item)
    }

    /// All tracked products.
    pub fn list(&self) -> Result<Vec<StockItem>, ServiceError> {
        Ok(self.read_lock()?.clone())
    }

    /// Look up one product by name.
    pub fn get(&self, product_name: &str) -> Result<StockItem, ServiceError> {
        self.read_lock()?
            .iter()
            .find(|i| i.product_name == product_name)
            .cloned()
            .ok_or_else(|| {
                ServiceError::NotFound(format!("stock item '{}' not found", product_name))
            })
    }

    /// Apply a signed quantity delta. The resulting level must not go below
    /// zero.
    pub fn adjust(&self, product_name: &str, quantity_change: f64) -> Result<StockItem, ServiceError> {
        let mut items = self.write_lock()?;
        let item = items
            .iter_mut()
            .find(|i| i.product_name == product_name)
            .ok_or_else(|| {
                ServiceError::NotFound(format!("stock item '{}' not found", product_name))
            })?;

        let new_quantity = item.quantity_liters + quantity_change;
        if new_quantity < 0.0 {
            return Err(ServiceError::Validation("insufficient stock".into()));
        }

        item.quantity_liters = new_quantity;
        item.last_updated = now_rfc3339();
        if new_quantity < item.min_threshold {
            warn!(
                product = %item.product_name,
                remaining = new_quantity,
                "stock below minimum threshold"
            );
        }
        Ok(item.clone())
    }

    fn read_lock(&self) -> Result<std::sync::RwLockReadGuard<'_, Vec<StockItem>>, ServiceError> {
        self.items
            .read()
            .map_err(|_| ServiceError::Internal("inventory lock poisoned".into()))
    }

    fn write_lock(&self) -> Result<std::sync::RwLockWriteGuard<'_, Vec<StockItem>>, ServiceError> {
        self.items
            .write()
            .map_err(|_| ServiceError::Internal("inventory lock poisoned".into()))
    }
}

impl Default for InventoryService {
    fn default() -> Self {
        Self::new()
    }
}

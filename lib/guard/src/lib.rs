//! Request guard — rejects negative numeric values anywhere in a request's
//! body or query string before business handlers run.
//!
//! Quantities, rates, and wages in this system are never negative, so the
//! boundary enforces that invariant once instead of every handler checking
//! its own fields. The one legitimate exception is stock adjustment, which
//! carries signed deltas; routes containing `/stock` are exempt.
//!
//! # Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use hfp_guard::{guard_middleware, GuardConfig};
//!
//! let config = Arc::new(GuardConfig::default());
//! let app = router.layer(axum::middleware::from_fn_with_state(
//!     config,
//!     guard_middleware,
//! ));
//! ```

pub mod error;
pub mod middleware;
pub mod path;
pub mod scan;

pub use error::GuardError;
pub use middleware::{guard_middleware, GuardRejection, REJECTION_MESSAGE};
pub use path::{FieldPath, Segment};
pub use scan::{is_bypassed, scan_request, GuardConfig, BYPASS_MARKER};

//! Negative-value scanner over untrusted request values.
//!
//! Walks a deserialized JSON value pre-order, depth-first, and records the
//! path of every finite negative number. Numeric-looking strings count too:
//! front-end forms submit numeric fields as strings, so `"-5"` is treated
//! the same as `-5`. That leniency is a deliberate contract, not an
//! accident. Non-numeric strings, booleans, and nulls are inert.

use serde_json::Value;

use crate::error::GuardError;
use crate::path::FieldPath;

/// Substring that exempts a route from scanning.
///
/// Stock adjustment endpoints legitimately carry negative deltas, so any
/// route whose path contains `/stock` is passed through unscanned. This is
/// a raw, case-sensitive substring match — not segment-anchored.
pub const BYPASS_MARKER: &str = "/stock";

/// Scanner configuration.
#[derive(Debug, Clone)]
pub struct GuardConfig {
    /// Maximum traversal depth before the scan fails closed.
    pub max_depth: usize,

    /// Maximum request body size the middleware will buffer for scanning.
    pub max_body_bytes: usize,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            max_depth: 64,
            max_body_bytes: 2 * 1024 * 1024,
        }
    }
}

/// Check whether a route path skips scanning entirely.
pub fn is_bypassed(route: &str) -> bool {
    route.contains(BYPASS_MARKER)
}

/// Scan a request's body and query values for negative numbers.
///
/// Returns the paths of all violations in visit order: the body tree first,
/// then the query tree, each walked pre-order depth-first. An empty result
/// means the request may proceed. Pure: the same input always produces the
/// same report, and the values are never mutated.
pub fn scan_request(
    route: &str,
    body: Option<&Value>,
    query: Option<&Value>,
    config: &GuardConfig,
) -> Result<Vec<FieldPath>, GuardError> {
    let mut found = Vec::new();
    if is_bypassed(route) {
        return Ok(found);
    }
    if let Some(value) = body {
        let mut path = FieldPath::root("body");
        scan_value(value, &mut path, 0, config.max_depth, &mut found)?;
    }
    if let Some(value) = query {
        let mut path = FieldPath::root("query");
        scan_value(value, &mut path, 0, config.max_depth, &mut found)?;
    }
    Ok(found)
}

fn scan_value(
    value: &Value,
    path: &mut FieldPath,
    depth: usize,
    max_depth: usize,
    found: &mut Vec<FieldPath>,
) -> Result<(), GuardError> {
    if depth > max_depth {
        return Err(GuardError::DepthExceeded {
            path: path.to_string(),
            max_depth,
        });
    }
    match value {
        Value::Null | Value::Bool(_) => {}
        Value::Number(number) => {
            if is_negative(number) {
                found.push(path.clone());
            }
        }
        Value::String(text) => {
            if coerces_negative(text) {
                found.push(path.clone());
            }
        }
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                path.push_index(index);
                scan_value(item, path, depth + 1, max_depth, found)?;
                path.pop();
            }
        }
        Value::Object(fields) => {
            for (name, field) in fields {
                path.push_field(name);
                scan_value(field, path, depth + 1, max_depth, found)?;
                path.pop();
            }
        }
    }
    Ok(())
}

/// A number leaf violates iff it is finite and strictly negative.
///
/// serde_json numbers are always finite, but the finiteness check stays
/// explicit: only finite negatives count, per the boundary contract.
fn is_negative(number: &serde_json::Number) -> bool {
    if let Some(i) = number.as_i64() {
        return i < 0;
    }
    if number.as_u64().is_some() {
        return false;
    }
    number.as_f64().is_some_and(|f| f.is_finite() && f < 0.0)
}

/// Numeric coercion for string leaves: trimmed `f64` parse.
///
/// `"-5"` and `"-1e3"` coerce and are flagged; `"-5kg"` and `""` fail to
/// parse and are inert; `"-inf"` and `"nan"` parse to non-finite values
/// and are never flagged.
fn coerces_negative(text: &str) -> bool {
    match text.trim().parse::<f64>() {
        Ok(parsed) => parsed.is_finite() && parsed < 0.0,
        Err(_) => false,
    }
}

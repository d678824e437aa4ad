use thiserror::Error;

/// Errors from the request scanner.
#[derive(Error, Debug)]
pub enum GuardError {
    /// Input nesting exceeded the configured bound. Nesting depth is
    /// attacker-influenced, so the walk fails closed: the boundary rejects
    /// the request instead of recursing further.
    #[error("value nesting at {path} exceeds maximum depth {max_depth}")]
    DepthExceeded { path: String, max_depth: usize },
}

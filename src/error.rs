//! Error types.
//!
//! Only [`RouteError`] ever reaches the caller of
//! [`HybridRunner::optimize`](crate::hybrid::HybridRunner::optimize).
//! [`MatrixError`] is produced by routing providers and always recovered
//! by the geometric fallback.

use thiserror::Error;

/// Fatal errors surfaced by the optimizer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RouteError {
    #[error("at least 2 locations are required (start and end), got {count}")]
    InvalidInput { count: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Failures of a distance matrix source.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatrixError {
    #[error("routing provider unavailable: {0}")]
    Unavailable(String),

    #[error("matrix has {actual} locations, expected {expected}")]
    DimensionMismatch { expected: usize, actual: usize },
}

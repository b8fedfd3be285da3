//! Error types for the object pool

use thiserror::Error;

use crate::pool::PoolId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    #[error("Pool is exhausted - no objects available and no room to grow")]
    Exhausted,

    #[error("Lease belongs to pool {lease_pool}, not pool {pool}")]
    ForeignLease { pool: PoolId, lease_pool: PoolId },

    #[error("Lease is stale - its object was recycled, revoked or discarded")]
    StaleLease,
}

pub type PoolResult<T> = Result<T, PoolError>;

/// Failure reported by an object's reset routine.
///
/// The pool never propagates it; it is logged and counted, and the object is
/// made available again regardless.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Failed to reset pooled object: {reason}")]
pub struct ResetError {
    reason: String,
}

impl ResetError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// A configuration field that was rejected or adjusted while merging.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigWarning {
    #[error("Invalid value for 'min': expected >= 1, got 0. Setting to 1")]
    MinCoerced,

    #[error("Invalid value for 'min': expected <= max ({max}), got {min}. Ignoring")]
    MinAboveMax { min: usize, max: usize },

    #[error("Invalid value for 'max': expected >= min ({min}), got {max}. Ignoring")]
    MaxBelowMin { max: usize, min: usize },

    #[error("Invalid value for 'expand_factor': expected a finite number >= 0, got {0}. Ignoring")]
    InvalidExpandFactor(f64),
}

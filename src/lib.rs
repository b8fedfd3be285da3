//! # flexipool
//!
//! Flexible object pool: pre-allocates instances of one type, hands them out
//! on demand and takes them back for reuse instead of rebuilding them.
//!
//! ## Features
//!
//! - Capacity kept between a configurable minimum and (optional) maximum
//! - Automatic growth by a configurable factor when the pool runs dry
//! - Manual `expand_by`, `shrink_by`, `resize_to` and `empty`
//! - Optional recycling of the longest-held object when saturated
//! - Objects reset on return through a [`Reset`] capability or custom factory
//! - Best-effort configuration updates that never fail the caller
//! - Metrics with Prometheus export, and health status
//! - A mutex-guarded [`SharedPool`] handle for cross-thread use
//!
//! ## Quick Start
//!
//! ```rust
//! use flexipool::{Pool, PoolConfig};
//!
//! let mut pool = Pool::new(|| String::with_capacity(64), PoolConfig::default());
//!
//! let lease = pool.get().unwrap();
//! pool.item_mut(&lease).unwrap().push_str("hello");
//! println!("Got: {}", pool.item(&lease).unwrap());
//! pool.release(lease);
//! ```

mod pool;
mod config;
mod factory;
mod metrics;
mod health;
mod shared;
mod errors;

pub use pool::{Lease, Pool, PoolId};
pub use config::{PoolConfig, PoolConfigUpdate, DEFAULT_EXPAND_FACTOR, DEFAULT_MAX, DEFAULT_MIN};
pub use factory::{ObjectFactory, Reset, Resetting};
pub use metrics::{MetricsExporter, PoolMetrics};
pub use health::HealthStatus;
pub use shared::SharedPool;
pub use errors::{ConfigWarning, PoolError, PoolResult, ResetError};

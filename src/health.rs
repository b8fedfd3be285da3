//! Health monitoring for object pools

/// Health status of an object pool
///
/// # Examples
///
/// ```
/// use flexipool::{Pool, PoolConfig};
///
/// let pool = Pool::new(|| 0u32, PoolConfig::default());
///
/// let health = pool.health();
/// assert!(health.is_healthy());
/// assert_eq!(health.available, 2);
/// ```
#[derive(Debug, Clone)]
pub struct HealthStatus {
    /// Whether the pool is healthy
    pub is_healthy: bool,

    /// Number of warnings detected
    pub warning_count: usize,

    /// Leased share of the capacity ceiling, or of the current size when
    /// unbounded (0.0 to 1.0)
    pub utilization: f64,

    /// Available objects count
    pub available: usize,

    /// Leased objects count
    pub used: usize,

    /// Current capacity
    pub size: usize,

    /// Capacity ceiling
    pub max: Option<usize>,

    /// Warning messages
    pub warnings: Vec<String>,
}

impl HealthStatus {
    /// Create a new health status
    pub fn new(available: usize, size: usize, max: Option<usize>, recycle: bool) -> Self {
        let used = size.saturating_sub(available);
        let ceiling = max.unwrap_or(size);
        let utilization = if ceiling > 0 {
            used as f64 / ceiling as f64
        } else {
            0.0
        };

        let mut warnings = Vec::new();
        let mut is_healthy = true;

        // Only meaningful against a fixed ceiling
        if max.is_some() && utilization > 0.9 {
            warnings.push(format!("High utilization: {:.1}%", utilization * 100.0));
            is_healthy = false;
        }

        let saturated = max == Some(size) && available == 0;
        if saturated && !recycle {
            warnings.push("Pool is saturated and recycling is disabled".to_string());
            is_healthy = false;
        } else if available == 0 && size > 0 {
            warnings.push("Pool is empty".to_string());
        }

        Self {
            is_healthy,
            warning_count: warnings.len(),
            utilization,
            available,
            used,
            size,
            max,
            warnings,
        }
    }

    /// Check if the pool is healthy
    pub fn is_healthy(&self) -> bool {
        self.is_healthy
    }
}

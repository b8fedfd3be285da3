//! Pool configuration options

use crate::errors::ConfigWarning;

/// Default minimum capacity.
pub const DEFAULT_MIN: usize = 2;

/// Default maximum capacity (256^2).
pub const DEFAULT_MAX: usize = 65_536;

/// Default auto-expansion rate (20%).
pub const DEFAULT_EXPAND_FACTOR: f64 = 0.2;

/// Configuration for pool capacity and recycling behavior
///
/// A value obtained from a pool is always consistent: `1 <= min`, `min <= max`
/// when `max` is bounded, and `expand_factor` is finite and non-negative.
///
/// # Examples
///
/// ```
/// use flexipool::PoolConfig;
///
/// let config = PoolConfig::new()
///     .with_min(4)
///     .with_max(64)
///     .with_expand_factor(0.5)
///     .with_recycle(true);
///
/// assert_eq!(config.min, 4);
/// assert_eq!(config.max, Some(64));
/// assert!(config.recycle);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PoolConfig {
    /// Minimum capacity of the pool. Never less than 1.
    ///
    /// This is the minimum number of objects owned, not available.
    pub min: usize,

    /// Maximum capacity of the pool, `None` for no limit
    pub max: Option<usize>,

    /// Fraction of the current size to grow by when the pool runs dry
    pub expand_factor: f64,

    /// Reclaim the longest-held object when the pool is saturated
    pub recycle: bool,

    /// Emit warnings for rejected input
    pub debug: bool,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN,
            max: Some(DEFAULT_MAX),
            expand_factor: DEFAULT_EXPAND_FACTOR,
            recycle: false,
            debug: false,
        }
    }
}

impl PoolConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum capacity
    pub fn with_min(mut self, min: usize) -> Self {
        self.min = min;
        self
    }

    /// Set a bounded maximum capacity
    pub fn with_max(mut self, max: usize) -> Self {
        self.max = Some(max);
        self
    }

    /// Remove the capacity ceiling
    pub fn with_unbounded_max(mut self) -> Self {
        self.max = None;
        self
    }

    /// Set the auto-expansion rate
    pub fn with_expand_factor(mut self, factor: f64) -> Self {
        self.expand_factor = factor;
        self
    }

    /// Enable or disable recycling when saturated
    pub fn with_recycle(mut self, recycle: bool) -> Self {
        self.recycle = recycle;
        self
    }

    /// Enable or disable diagnostic warnings
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Merge a partial update into this configuration.
    ///
    /// Each field is validated on its own; an invalid field is left unchanged
    /// (or coerced, for `min == 0`) and reported in the returned warnings
    /// while the remaining fields still apply.
    ///
    /// # Examples
    ///
    /// ```
    /// use flexipool::{ConfigWarning, PoolConfig, PoolConfigUpdate};
    ///
    /// let update = PoolConfigUpdate::new().max(1).recycle(true);
    /// let (merged, warnings) = PoolConfig::default().merge(&update);
    ///
    /// assert_eq!(merged.max, PoolConfig::default().max);
    /// assert!(merged.recycle);
    /// assert_eq!(warnings, vec![ConfigWarning::MaxBelowMin { max: 1, min: 2 }]);
    /// ```
    pub fn merge(&self, update: &PoolConfigUpdate) -> (PoolConfig, Vec<ConfigWarning>) {
        let mut merged = *self;
        let mut warnings = Vec::new();

        if let Some(mut min) = update.min {
            if min == 0 {
                warnings.push(ConfigWarning::MinCoerced);
                min = 1;
            }
            match self.max {
                // With a new max in the same update, the check happens below.
                Some(max) if update.max.is_none() && min > max => {
                    warnings.push(ConfigWarning::MinAboveMax { min, max });
                }
                _ => merged.min = min,
            }
        }

        if let Some(max) = update.max {
            match max {
                Some(max) if max < merged.min => {
                    warnings.push(ConfigWarning::MaxBelowMin {
                        max,
                        min: merged.min,
                    });
                }
                _ => merged.max = max,
            }
        }

        if let Some(factor) = update.expand_factor {
            if factor.is_finite() && factor >= 0.0 {
                merged.expand_factor = factor;
            } else {
                warnings.push(ConfigWarning::InvalidExpandFactor(factor));
            }
        }

        if let Some(recycle) = update.recycle {
            merged.recycle = recycle;
        }

        if let Some(debug) = update.debug {
            merged.debug = debug;
        }

        // Guard the invariant if `min` went through while `max` was rejected.
        if let Some(max) = merged.max
            && merged.min > max
        {
            warnings.push(ConfigWarning::MinAboveMax {
                min: merged.min,
                max,
            });
            merged.min = self.min;
        }

        (merged, warnings)
    }
}

/// A partial configuration: only the fields that are set are merged.
///
/// # Examples
///
/// ```
/// use flexipool::PoolConfigUpdate;
///
/// let update = PoolConfigUpdate::new().min(4).unbounded();
/// assert_eq!(update.min_value(), Some(4));
/// assert_eq!(update.max_value(), Some(None));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PoolConfigUpdate {
    min: Option<usize>,
    max: Option<Option<usize>>,
    expand_factor: Option<f64>,
    recycle: Option<bool>,
    debug: Option<bool>,
}

impl PoolConfigUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min(mut self, min: usize) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: usize) -> Self {
        self.max = Some(Some(max));
        self
    }

    pub fn unbounded(mut self) -> Self {
        self.max = Some(None);
        self
    }

    pub fn expand_factor(mut self, factor: f64) -> Self {
        self.expand_factor = Some(factor);
        self
    }

    pub fn recycle(mut self, recycle: bool) -> Self {
        self.recycle = Some(recycle);
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = Some(debug);
        self
    }

    pub fn min_value(&self) -> Option<usize> {
        self.min
    }

    /// `Some(None)` means the update removes the ceiling.
    pub fn max_value(&self) -> Option<Option<usize>> {
        self.max
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl From<PoolConfig> for PoolConfigUpdate {
    fn from(config: PoolConfig) -> Self {
        Self {
            min: Some(config.min),
            max: Some(config.max),
            expand_factor: Some(config.expand_factor),
            recycle: Some(config.recycle),
            debug: Some(config.debug),
        }
    }
}

//! Metrics collection and export for object pools

use std::collections::HashMap;

/// Metrics snapshot for a pool
///
/// # Examples
///
/// ```
/// use flexipool::{Pool, PoolConfig};
///
/// let mut pool = Pool::new(|| 0u32, PoolConfig::default());
/// let lease = pool.get().unwrap();
///
/// let metrics = pool.metrics();
/// assert_eq!(metrics.total_acquired, 1);
/// assert_eq!(metrics.used, 1);
/// assert_eq!(metrics.available, 1);
/// # pool.release(lease);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolMetrics {
    /// Objects built by the factory
    pub total_created: usize,

    /// Objects dropped by shrinking, revocation or emptying
    pub total_destroyed: usize,

    /// Successful acquisitions
    pub total_acquired: usize,

    /// Objects returned to the pool
    pub total_released: usize,

    /// Releases ignored because the lease was foreign or stale
    pub rejected_releases: usize,

    /// Leases reclaimed to serve a saturated pool
    pub recycled: usize,

    /// Leases destroyed because the maximum dropped below the size
    pub revoked: usize,

    /// Reset routines that reported an error
    pub reset_failures: usize,

    /// Capacity increases, manual or automatic
    pub expansions: usize,

    /// Acquisitions that found nothing to hand out
    pub empty_events: usize,

    /// Current capacity
    pub size: usize,

    /// Current available objects
    pub available: usize,

    /// Current leased objects
    pub used: usize,

    /// Capacity ceiling, `None` when unbounded
    pub max_capacity: Option<usize>,

    /// Leased share of the current capacity (0.0 to 1.0)
    pub utilization: f64,
}

impl PoolMetrics {
    /// Export metrics as a HashMap
    pub fn export(&self) -> HashMap<String, String> {
        let mut metrics = HashMap::new();
        metrics.insert("total_created".to_string(), self.total_created.to_string());
        metrics.insert("total_destroyed".to_string(), self.total_destroyed.to_string());
        metrics.insert("total_acquired".to_string(), self.total_acquired.to_string());
        metrics.insert("total_released".to_string(), self.total_released.to_string());
        metrics.insert("rejected_releases".to_string(), self.rejected_releases.to_string());
        metrics.insert("recycled".to_string(), self.recycled.to_string());
        metrics.insert("revoked".to_string(), self.revoked.to_string());
        metrics.insert("reset_failures".to_string(), self.reset_failures.to_string());
        metrics.insert("expansions".to_string(), self.expansions.to_string());
        metrics.insert("empty_events".to_string(), self.empty_events.to_string());
        metrics.insert("size".to_string(), self.size.to_string());
        metrics.insert("available".to_string(), self.available.to_string());
        metrics.insert("used".to_string(), self.used.to_string());
        metrics.insert(
            "max_capacity".to_string(),
            self.max_capacity
                .map_or_else(|| "unbounded".to_string(), |max| max.to_string()),
        );
        metrics.insert("utilization".to_string(), format!("{:.2}", self.utilization));
        metrics
    }
}

/// Metrics exporter for Prometheus format
pub struct MetricsExporter;

impl MetricsExporter {
    /// Export metrics in Prometheus exposition format
    ///
    /// # Examples
    ///
    /// ```
    /// use flexipool::{Pool, PoolConfig};
    /// use std::collections::HashMap;
    ///
    /// let pool = Pool::new(|| 0u32, PoolConfig::default());
    ///
    /// let mut tags = HashMap::new();
    /// tags.insert("service".to_string(), "particles".to_string());
    ///
    /// let output = pool.export_metrics_prometheus("sparks", Some(&tags));
    /// assert!(output.contains("flexipool_objects_available{pool=\"sparks\",service=\"particles\"} 2"));
    /// ```
    pub fn export_prometheus(
        metrics: &PoolMetrics,
        pool_name: &str,
        tags: Option<&HashMap<String, String>>,
    ) -> String {
        let mut output = String::new();
        let labels = Self::format_labels(pool_name, tags);

        // Gauge metrics
        Self::write_metric(&mut output, "flexipool_objects_size", "gauge", "Current pool capacity", &labels, metrics.size);
        Self::write_metric(&mut output, "flexipool_objects_available", "gauge", "Current available objects", &labels, metrics.available);
        Self::write_metric(&mut output, "flexipool_objects_used", "gauge", "Current leased objects", &labels, metrics.used);

        output.push_str("# HELP flexipool_utilization Pool utilization ratio\n");
        output.push_str("# TYPE flexipool_utilization gauge\n");
        output.push_str(&format!("flexipool_utilization{{{}}} {:.2}\n", labels, metrics.utilization));

        // Counter metrics
        Self::write_metric(&mut output, "flexipool_objects_created_total", "counter", "Total objects created", &labels, metrics.total_created);
        Self::write_metric(&mut output, "flexipool_objects_destroyed_total", "counter", "Total objects destroyed", &labels, metrics.total_destroyed);
        Self::write_metric(&mut output, "flexipool_objects_acquired_total", "counter", "Total objects acquired", &labels, metrics.total_acquired);
        Self::write_metric(&mut output, "flexipool_objects_released_total", "counter", "Total objects released", &labels, metrics.total_released);
        Self::write_metric(&mut output, "flexipool_releases_rejected_total", "counter", "Rejected releases", &labels, metrics.rejected_releases);
        Self::write_metric(&mut output, "flexipool_objects_recycled_total", "counter", "Leases reclaimed by recycling", &labels, metrics.recycled);
        Self::write_metric(&mut output, "flexipool_objects_revoked_total", "counter", "Leases revoked by shrinking", &labels, metrics.revoked);
        Self::write_metric(&mut output, "flexipool_reset_failures_total", "counter", "Reset failures", &labels, metrics.reset_failures);
        Self::write_metric(&mut output, "flexipool_expansions_total", "counter", "Capacity expansions", &labels, metrics.expansions);
        Self::write_metric(&mut output, "flexipool_events_empty_total", "counter", "Pool empty events", &labels, metrics.empty_events);

        output
    }

    fn write_metric(output: &mut String, name: &str, kind: &str, help: &str, labels: &str, value: usize) {
        output.push_str(&format!("# HELP {} {}\n", name, help));
        output.push_str(&format!("# TYPE {} {}\n", name, kind));
        output.push_str(&format!("{}{{{}}} {}\n", name, labels, value));
    }

    fn format_labels(pool_name: &str, tags: Option<&HashMap<String, String>>) -> String {
        let mut labels = vec![format!("pool=\"{}\"", Self::escape_label_value(pool_name))];

        if let Some(tags) = tags {
            let mut tags: Vec<_> = tags.iter().collect();
            tags.sort();
            for (key, value) in tags {
                labels.push(format!("{}=\"{}\"", key, Self::escape_label_value(value)));
            }
        }

        labels.join(",")
    }

    /// Backslash, double quote and newline must be escaped in label values
    fn escape_label_value(value: &str) -> String {
        let mut escaped = String::with_capacity(value.len());
        for ch in value.chars() {
            match ch {
                '\\' => escaped.push_str("\\\\"),
                '"' => escaped.push_str("\\\""),
                '\n' => escaped.push_str("\\n"),
                _ => escaped.push(ch),
            }
        }
        escaped
    }
}

/// Internal metrics tracker
#[derive(Debug, Default, Clone)]
pub(crate) struct MetricsTracker {
    pub total_created: usize,
    pub total_destroyed: usize,
    pub total_acquired: usize,
    pub total_released: usize,
    pub rejected_releases: usize,
    pub recycled: usize,
    pub revoked: usize,
    pub reset_failures: usize,
    pub expansions: usize,
    pub empty_events: usize,
}

impl MetricsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_metrics(&self, size: usize, available: usize, max: Option<usize>) -> PoolMetrics {
        let used = size - available;
        let utilization = if size > 0 {
            used as f64 / size as f64
        } else {
            0.0
        };

        PoolMetrics {
            total_created: self.total_created,
            total_destroyed: self.total_destroyed,
            total_acquired: self.total_acquired,
            total_released: self.total_released,
            rejected_releases: self.rejected_releases,
            recycled: self.recycled,
            revoked: self.revoked,
            reset_failures: self.reset_failures,
            expansions: self.expansions,
            empty_events: self.empty_events,
            size,
            available,
            used,
            max_capacity: max,
            utilization,
        }
    }
}

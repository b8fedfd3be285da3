//! Core pool implementation

use crate::config::{PoolConfig, PoolConfigUpdate};
use crate::errors::{PoolError, PoolResult};
use crate::factory::ObjectFactory;
use crate::health::HealthStatus;
use crate::metrics::{MetricsExporter, MetricsTracker, PoolMetrics};

use std::cmp::Ordering as CmpOrdering;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, warn};

static NEXT_POOL_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PoolId(u64);

impl PoolId {
    fn next() -> Self {
        Self(NEXT_POOL_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for PoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Handle to an object acquired with [`Pool::get`].
///
/// The pool keeps ownership of the object; reach it with [`Pool::item`] and
/// [`Pool::item_mut`] and hand it back with [`Pool::release`]. A lease cannot
/// be copied, so it is released at most once. It goes stale when its object
/// is recycled, revoked or discarded by [`Pool::empty`].
#[must_use = "an unreleased lease keeps its object out of the pool"]
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Lease {
    pool: PoolId,
    ticket: u64,
}

impl Lease {
    /// The pool this lease was issued by
    pub fn pool_id(&self) -> PoolId {
        self.pool
    }
}

/// Single-owner object pool with configurable growth, shrinking and recycling
///
/// Holds between `min` and `max` objects built by the factory `F`. Objects
/// cycle between the available list and the lease table; they are only
/// dropped when capacity shrinks or the pool is emptied.
///
/// # Examples
///
/// ```
/// use flexipool::{Pool, PoolConfig};
///
/// let mut pool = Pool::new(Vec::<u8>::new, PoolConfig::default());
/// assert_eq!(pool.size(), 2);
///
/// let lease = pool.get().unwrap();
/// pool.item_mut(&lease).unwrap().push(7);
/// assert_eq!(pool.used(), 1);
///
/// pool.release(lease);
/// assert_eq!(pool.available(), 2);
/// ```
pub struct Pool<T, F> {
    id: PoolId,
    config: PoolConfig,
    factory: F,
    size: usize,
    /// Front holds the longest-available object, back the most recent.
    objects: VecDeque<T>,
    /// Keyed by ticket, so the first entry is the oldest lease.
    leased: BTreeMap<u64, T>,
    next_ticket: u64,
    metrics: MetricsTracker,
}

impl<T, F> fmt::Debug for Pool<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pool")
            .field("id", &self.id)
            .field("item_type", &format_args!("{}", std::any::type_name::<T>()))
            .field("size", &self.size)
            .field("available", &self.objects.len())
            .field("config", &self.config)
            .finish()
    }
}

impl<T, F: ObjectFactory<T>> Pool<T, F> {
    /// Create a pool and fill it with `min` objects.
    ///
    /// `config` is merged over [`PoolConfig::default`] field by field, so
    /// both a full [`PoolConfig`] and a partial [`PoolConfigUpdate`] work.
    pub fn new(factory: F, config: impl Into<PoolConfigUpdate>) -> Self {
        let mut pool = Self {
            id: PoolId::next(),
            config: PoolConfig::default(),
            factory,
            size: 0,
            objects: VecDeque::new(),
            leased: BTreeMap::new(),
            next_ticket: 0,
            metrics: MetricsTracker::new(),
        };
        pool.merge_config(&config.into());
        pool.empty();
        pool
    }

    /// Identity stamped on every lease this pool issues
    pub fn id(&self) -> PoolId {
        self.id
    }

    /// Total capacity: available plus leased objects
    pub fn size(&self) -> usize {
        self.size
    }

    /// Objects ready to be handed out
    pub fn available(&self) -> usize {
        self.objects.len()
    }

    /// Objects currently leased
    pub fn used(&self) -> usize {
        self.size - self.objects.len()
    }

    /// Capacity floor
    pub fn min(&self) -> usize {
        self.config.min
    }

    /// `None` when the pool is unbounded
    pub fn max(&self) -> Option<usize> {
        self.config.max
    }

    /// Whether diagnostic warnings are enabled
    pub fn debug(&self) -> bool {
        self.config.debug
    }

    /// Whether the size is down to the floor
    pub fn at_min(&self) -> bool {
        self.size == self.config.min
    }

    /// Always false for an unbounded pool
    pub fn at_max(&self) -> bool {
        self.config.max.is_some_and(|max| self.size >= max)
    }

    /// A copy of the current configuration
    pub fn config(&self) -> PoolConfig {
        self.config
    }

    /// Whether `lease` still refers to an object leased from this pool
    pub fn contains(&self, lease: &Lease) -> bool {
        lease.pool == self.id && self.leased.contains_key(&lease.ticket)
    }

    /// The leased object, or `None` for a foreign or stale lease
    pub fn item(&self, lease: &Lease) -> Option<&T> {
        if lease.pool != self.id {
            return None;
        }
        self.leased.get(&lease.ticket)
    }

    /// Mutable access to the leased object
    pub fn item_mut(&mut self, lease: &Lease) -> Option<&mut T> {
        if lease.pool != self.id {
            return None;
        }
        self.leased.get_mut(&lease.ticket)
    }

    /// Update the configuration, then grow or shrink to the new bounds.
    ///
    /// Invalid fields are skipped (warned about in debug mode) and the rest
    /// still apply. Lowering `max` below the size evicts available objects
    /// first, then revokes the oldest leases.
    pub fn set_config(&mut self, update: impl Into<PoolConfigUpdate>) -> &mut Self {
        let update = update.into();
        if update.is_empty() {
            self.diagnose("set_config", "no configuration fields supplied");
            return self;
        }

        self.merge_config(&update);

        if let Some(max) = self.config.max
            && self.size > max
        {
            self.shrink_to_max(max);
        }
        if self.size < self.config.min {
            self.expand_by(self.config.min - self.size);
        }
        self
    }

    /// Grow capacity by `n` new objects, clamped to `max`.
    pub fn expand_by(&mut self, n: usize) -> &mut Self {
        if n == 0 || self.at_max() {
            return self;
        }
        let n = match self.config.max {
            Some(max) => n.min(max - self.size),
            None => n,
        };
        if self.size.checked_add(n).is_none() {
            self.diagnose("expand_by", format_args!("growing by {n} would overflow the capacity counter; ignoring"));
            return self;
        }
        if let Err(err) = self.objects.try_reserve(n) {
            self.diagnose("expand_by", format_args!("cannot reserve room for {n} objects ({err}); ignoring"));
            return self;
        }

        for _ in 0..n {
            self.objects.push_back(self.factory.create());
        }
        self.size += n;
        self.metrics.total_created += n;
        self.metrics.expansions += 1;

        debug!(pool = %self.id, by = n, size = self.size, "expanded pool");
        self
    }

    /// Shrink capacity by `n`, dropping the longest-available objects.
    ///
    /// Never goes below `min`: a larger request resizes to exactly `min`.
    /// Leased objects are never dropped, so `n` is clamped to the number of
    /// available objects.
    pub fn shrink_by(&mut self, n: usize) -> &mut Self {
        if n == 0 || self.size <= self.config.min {
            return self;
        }
        if n > self.size - self.config.min {
            return self.resize_to(self.config.min);
        }

        let available = self.objects.len();
        let n = if n > available {
            self.diagnose(
                "shrink_by",
                format_args!("only {available} of {n} objects are available; shrinking by {available}"),
            );
            available
        } else {
            n
        };
        self.evict_available(n);
        self
    }

    /// Set capacity to exactly `target`, within the configured bounds.
    pub fn resize_to(&mut self, target: usize) -> &mut Self {
        match target.cmp(&self.size) {
            CmpOrdering::Equal => self,
            CmpOrdering::Greater => self.expand_by(target - self.size),
            CmpOrdering::Less => self.shrink_by(self.size - target),
        }
    }

    /// Drop every object, leased ones included, and refill to `min`.
    ///
    /// Outstanding leases become stale.
    pub fn empty(&mut self) -> &mut Self {
        let dropped = self.size;
        self.objects.clear();
        self.leased.clear();
        self.size = 0;
        self.metrics.total_destroyed += dropped;

        if dropped > 0 {
            debug!(pool = %self.id, dropped, "emptied pool");
        }
        self.resize_to(self.config.min)
    }

    /// Acquire an object, or `None` when the pool is saturated.
    pub fn get(&mut self) -> Option<Lease> {
        self.try_get().ok()
    }

    /// Acquire an object.
    ///
    /// Grows by `ceil(size * expand_factor + 0.4)` when nothing is available.
    /// At `max` with recycling on, the oldest lease is reclaimed instead.
    /// The most recently available object is handed out first.
    pub fn try_get(&mut self) -> PoolResult<Lease> {
        if self.objects.is_empty() && !self.at_max() {
            let grow = (self.size as f64 * self.config.expand_factor + 0.4).ceil() as usize;
            self.expand_by(grow);
        }
        if self.objects.is_empty() && self.at_max() && self.config.recycle {
            self.recycle_oldest();
        }

        match self.objects.pop_back() {
            Some(obj) => {
                let ticket = self.next_ticket;
                self.next_ticket += 1;
                self.leased.insert(ticket, obj);
                self.metrics.total_acquired += 1;
                Ok(Lease {
                    pool: self.id,
                    ticket,
                })
            }
            None => {
                self.metrics.empty_events += 1;
                debug!(pool = %self.id, size = self.size, "pool exhausted");
                Err(PoolError::Exhausted)
            }
        }
    }

    /// Reset the leased object and make it available again.
    ///
    /// Foreign and stale leases are ignored. A failing reset is logged and
    /// the object is still returned.
    pub fn release(&mut self, lease: Lease) -> &mut Self {
        if let Err(err) = self.try_release(lease) {
            self.diagnose("release", err);
        }
        self
    }

    /// Like [`Pool::release`], but reports why a lease was rejected.
    pub fn try_release(&mut self, lease: Lease) -> PoolResult<()> {
        if lease.pool != self.id {
            self.metrics.rejected_releases += 1;
            return Err(PoolError::ForeignLease {
                pool: self.id,
                lease_pool: lease.pool,
            });
        }
        let Some(mut obj) = self.leased.remove(&lease.ticket) else {
            self.metrics.rejected_releases += 1;
            return Err(PoolError::StaleLease);
        };

        self.reset_object(&mut obj);
        debug_assert!(self.objects.len() < self.size, "available objects exceed capacity");
        self.objects.push_back(obj);
        self.metrics.total_released += 1;
        Ok(())
    }

    /// Get pool metrics
    pub fn metrics(&self) -> PoolMetrics {
        self.metrics
            .get_metrics(self.size, self.objects.len(), self.config.max)
    }

    /// Export metrics
    pub fn export_metrics(&self) -> HashMap<String, String> {
        self.metrics().export()
    }

    /// Export metrics in Prometheus format
    pub fn export_metrics_prometheus(
        &self,
        pool_name: &str,
        tags: Option<&HashMap<String, String>>,
    ) -> String {
        MetricsExporter::export_prometheus(&self.metrics(), pool_name, tags)
    }

    /// Get health status
    pub fn health(&self) -> HealthStatus {
        HealthStatus::new(
            self.objects.len(),
            self.size,
            self.config.max,
            self.config.recycle,
        )
    }

    fn merge_config(&mut self, update: &PoolConfigUpdate) {
        let (merged, warnings) = self.config.merge(update);
        self.config = merged;
        for warning in warnings {
            self.diagnose("set_config", warning);
        }
    }

    fn evict_available(&mut self, n: usize) {
        if n == 0 {
            return;
        }
        drop(self.objects.drain(..n));
        self.size -= n;
        self.metrics.total_destroyed += n;
        debug!(pool = %self.id, by = n, size = self.size, "shrank pool");
    }

    fn shrink_to_max(&mut self, max: usize) {
        let excess = self.size - max;
        self.evict_available(excess.min(self.objects.len()));

        while self.size > max {
            let Some((ticket, _obj)) = self.leased.pop_first() else {
                break;
            };
            self.size -= 1;
            self.metrics.revoked += 1;
            self.metrics.total_destroyed += 1;
            debug!(pool = %self.id, ticket, max, "revoked lease above new maximum");
        }
    }

    fn recycle_oldest(&mut self) {
        if let Some((ticket, mut obj)) = self.leased.pop_first() {
            self.reset_object(&mut obj);
            self.objects.push_back(obj);
            self.metrics.recycled += 1;
            debug!(pool = %self.id, ticket, "recycled oldest lease");
        }
    }

    fn reset_object(&mut self, obj: &mut T) {
        if let Err(err) = self.factory.reset(obj) {
            self.metrics.reset_failures += 1;
            self.diagnose("reset", err);
        }
    }

    fn diagnose(&self, operation: &'static str, message: impl fmt::Display) {
        if self.config.debug {
            warn!(pool = %self.id, operation, "{message}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ResetError;
    use crate::factory::{Reset, Resetting};

    #[derive(Debug, Default)]
    struct Particle {
        x: f32,
        poisoned: bool,
    }

    impl Reset for Particle {
        fn reset(&mut self) -> Result<(), ResetError> {
            self.x = 0.0;
            if self.poisoned {
                return Err(ResetError::new("particle poisoned"));
            }
            Ok(())
        }
    }

    fn particles(config: impl Into<PoolConfigUpdate>) -> Pool<Particle, Resetting<fn() -> Particle>> {
        Pool::new(Resetting(Particle::default as fn() -> Particle), config)
    }

    fn assert_invariants<T, F: ObjectFactory<T>>(pool: &Pool<T, F>) {
        assert!(pool.min() <= pool.size());
        if let Some(max) = pool.max() {
            assert!(pool.size() <= max);
        }
        assert!(pool.available() <= pool.size());
        assert_eq!(pool.used(), pool.size() - pool.available());
    }

    #[test]
    fn test_new_pool_defaults() {
        let pool = Pool::new(|| 0u8, PoolConfig::default());
        assert_eq!(pool.size(), 2);
        assert_eq!(pool.available(), 2);
        assert_eq!(pool.used(), 0);
        assert!(pool.at_min());
        assert!(!pool.at_max());
        assert_eq!(pool.metrics().total_created, 2);
    }

    #[test]
    fn test_new_pool_with_partial_config() {
        let pool = Pool::new(|| 0u8, PoolConfigUpdate::new().min(5));
        assert_eq!(pool.size(), 5);
        assert_eq!(pool.max(), Some(crate::config::DEFAULT_MAX));
    }

    #[test]
    fn test_new_pool_coerces_zero_min() {
        let pool = Pool::new(|| 0u8, PoolConfig::new().with_min(0));
        assert_eq!(pool.min(), 1);
        assert_eq!(pool.size(), 1);
    }

    #[test]
    fn test_expand_clamps_to_max() {
        let mut pool = Pool::new(|| 0u8, PoolConfig::new().with_max(10));
        pool.expand_by(100);
        assert_eq!(pool.size(), 10);
        assert!(pool.at_max());

        pool.expand_by(1);
        assert_eq!(pool.size(), 10);
        assert_invariants(&pool);
    }

    #[test]
    fn test_shrink_redirects_to_min() {
        let mut pool = Pool::new(|| 0u8, PoolConfig::default());
        pool.expand_by(8).shrink_by(200);
        assert_eq!(pool.size(), 2);
        assert_eq!(pool.available(), 2);
        assert!(pool.at_min());
    }

    #[test]
    fn test_shrink_evicts_oldest_available() {
        let counter = std::cell::Cell::new(0u32);
        let mut pool = Pool::new(
            || {
                counter.set(counter.get() + 1);
                counter.get()
            },
            PoolConfig::default(),
        );
        pool.expand_by(2);
        pool.shrink_by(2);

        // 1 and 2 were evicted from the front
        let lease = pool.get().unwrap();
        assert_eq!(pool.item(&lease), Some(&4));
        pool.release(lease);
    }

    #[test]
    fn test_shrink_never_drops_leased_objects() {
        let mut pool = Pool::new(|| 0u8, PoolConfig::default());
        pool.expand_by(4);
        let a = pool.get().unwrap();
        let b = pool.get().unwrap();
        let c = pool.get().unwrap();

        pool.shrink_by(4);
        assert_eq!(pool.size(), 3);
        assert_eq!(pool.available(), 0);
        assert_eq!(pool.used(), 3);
        assert!(pool.contains(&a) && pool.contains(&b) && pool.contains(&c));
        assert_invariants(&pool);

        pool.release(a).release(b).release(c);
        assert_eq!(pool.available(), 3);
    }

    #[test]
    fn test_resize_to_current_size_is_noop() {
        let mut pool = Pool::new(|| 0u8, PoolConfig::default());
        let before = pool.metrics();
        pool.resize_to(2);
        assert_eq!(pool.metrics(), before);
    }

    #[test]
    fn test_get_is_lifo() {
        let counter = std::cell::Cell::new(0u32);
        let mut pool = Pool::new(
            || {
                counter.set(counter.get() + 1);
                counter.get()
            },
            PoolConfig::default(),
        );
        let first = pool.get().unwrap();
        assert_eq!(pool.item(&first), Some(&2));

        let second = pool.get().unwrap();
        pool.release(second);
        let again = pool.get().unwrap();
        assert_eq!(pool.item(&again), Some(&1));

        pool.release(first).release(again);
    }

    #[test]
    fn test_get_auto_expands() {
        let mut pool = Pool::new(|| 0u8, PoolConfig::default());
        let _a = pool.get().unwrap();
        let _b = pool.get().unwrap();
        assert_eq!(pool.size(), 2);

        let _c = pool.get().unwrap();
        assert_eq!(pool.size(), 3);
        assert_eq!(pool.available(), 0);
        assert_eq!(pool.used(), 3);
    }

    #[test]
    fn test_get_expands_by_factor() {
        let mut pool = Pool::new(|| 0u8, PoolConfig::new().with_min(10).with_expand_factor(0.5));
        let leases: Vec<_> = (0..10).map(|_| pool.get().unwrap()).collect();
        assert_eq!(pool.size(), 10);

        let extra = pool.get().unwrap();
        // ceil(10 * 0.5 + 0.4) = 6
        assert_eq!(pool.size(), 16);
        assert_eq!(pool.available(), 5);

        for lease in leases {
            pool.release(lease);
        }
        pool.release(extra);
        assert_eq!(pool.available(), 16);
    }

    #[test]
    fn test_zero_expand_factor_still_grows() {
        let mut pool = Pool::new(|| 0u8, PoolConfig::new().with_min(1).with_expand_factor(0.0));
        let _a = pool.get().unwrap();
        let _b = pool.get().unwrap();
        assert_eq!(pool.size(), 2);
    }

    #[test]
    fn test_get_exhausted_without_recycle() {
        let mut pool = Pool::new(|| 0u8, PoolConfig::new().with_max(2));
        let _a = pool.get().unwrap();
        let _b = pool.get().unwrap();

        assert!(pool.get().is_none());
        assert_eq!(pool.try_get(), Err(PoolError::Exhausted));
        assert_eq!(pool.metrics().empty_events, 2);
    }

    #[test]
    fn test_recycle_reclaims_oldest_lease() {
        let mut pool = particles(PoolConfig::new().with_max(2).with_recycle(true));
        let a = pool.get().unwrap();
        let b = pool.get().unwrap();
        pool.item_mut(&a).unwrap().x = 3.0;

        let c = pool.get().unwrap();
        assert!(!pool.contains(&a));
        assert!(pool.contains(&b));
        assert_eq!(pool.item(&c).unwrap().x, 0.0);
        assert_eq!(pool.size(), 2);
        assert_eq!(pool.metrics().recycled, 1);

        assert_eq!(pool.try_release(a), Err(PoolError::StaleLease));
        pool.release(b).release(c);
        assert_eq!(pool.available(), 2);
    }

    #[test]
    fn test_release_resets_object() {
        let mut pool = particles(PoolConfig::default());
        let lease = pool.get().unwrap();
        pool.item_mut(&lease).unwrap().x = 9.5;
        pool.release(lease);

        let lease = pool.get().unwrap();
        assert_eq!(pool.item(&lease).unwrap().x, 0.0);
        pool.release(lease);
    }

    #[test]
    fn test_release_survives_reset_failure() {
        let mut pool = particles(PoolConfig::new().with_debug(true));
        let lease = pool.get().unwrap();
        pool.item_mut(&lease).unwrap().poisoned = true;

        assert_eq!(pool.try_release(lease), Ok(()));
        assert_eq!(pool.available(), 2);
        assert_eq!(pool.metrics().reset_failures, 1);
    }

    #[test]
    fn test_release_foreign_lease_is_noop() {
        let mut pool = Pool::new(|| 0u8, PoolConfig::default());
        let mut other = Pool::new(|| 0u8, PoolConfig::default());
        let foreign = other.get().unwrap();

        assert!(pool.item(&foreign).is_none());
        let err = pool.try_release(foreign).unwrap_err();
        assert!(matches!(err, PoolError::ForeignLease { .. }));
        assert_eq!(pool.size(), 2);
        assert_eq!(pool.available(), 2);
        assert_eq!(pool.metrics().rejected_releases, 1);
        assert_eq!(other.used(), 1);
    }

    #[test]
    fn test_set_config_raises_min() {
        let mut pool = Pool::new(|| 0u8, PoolConfig::default());
        pool.set_config(PoolConfigUpdate::new().min(4));
        assert_eq!(pool.min(), 4);
        assert_eq!(pool.size(), 4);
        assert!(pool.at_min());
    }

    #[test]
    fn test_set_config_lowers_max_evicting_available() {
        let mut pool = Pool::new(|| 0u8, PoolConfig::default());
        pool.expand_by(18);
        pool.set_config(PoolConfigUpdate::new().max(10));
        assert_eq!(pool.size(), 10);
        assert_eq!(pool.available(), 10);
        assert!(pool.at_max());
    }

    #[test]
    fn test_set_config_lowers_max_revoking_leases() {
        let mut pool = Pool::new(|| 0u8, PoolConfig::new().with_min(4));
        let leases: Vec<_> = (0..4).map(|_| pool.get().unwrap()).collect();
        assert_eq!(pool.available(), 0);

        pool.set_config(PoolConfigUpdate::new().min(1).max(2));
        assert_eq!(pool.size(), 2);
        assert_eq!(pool.used(), 2);
        assert_eq!(pool.metrics().revoked, 2);

        let live: Vec<bool> = leases.iter().map(|lease| pool.contains(lease)).collect();
        assert_eq!(live, vec![false, false, true, true]);
        assert_invariants(&pool);
    }

    #[test]
    fn test_set_config_ignores_invalid_fields() {
        let mut pool = Pool::new(|| 0u8, PoolConfig::new().with_debug(true));
        pool.set_config(PoolConfigUpdate::new().max(1).expand_factor(f64::INFINITY).recycle(true));
        let config = pool.config();
        assert_eq!(config.max, Some(crate::config::DEFAULT_MAX));
        assert_eq!(config.expand_factor, crate::config::DEFAULT_EXPAND_FACTOR);
        assert!(config.recycle);
        assert_eq!(pool.size(), 2);
    }

    #[test]
    fn test_empty_discards_leases() {
        let mut pool = Pool::new(|| 0u8, PoolConfig::default());
        pool.expand_by(5);
        let lease = pool.get().unwrap();

        pool.empty();
        assert_eq!(pool.size(), 2);
        assert_eq!(pool.available(), 2);
        assert!(!pool.contains(&lease));
        assert_eq!(pool.try_release(lease), Err(PoolError::StaleLease));
        assert_eq!(pool.metrics().total_destroyed, 7);
    }

    #[test]
    fn test_unbounded_pool_never_exhausts() {
        let mut pool = Pool::new(|| 0u8, PoolConfig::new().with_unbounded_max());
        let leases: Vec<_> = (0..100).map(|_| pool.get().unwrap()).collect();
        assert_eq!(pool.used(), 100);
        assert!(!pool.at_max());
        for lease in leases {
            pool.release(lease);
        }
        assert_eq!(pool.available(), pool.size());
    }

    #[test]
    fn test_pool_health() {
        let mut pool = Pool::new(|| 0u8, PoolConfig::new().with_max(2));
        let _a = pool.get().unwrap();
        let _b = pool.get().unwrap();

        let health = pool.health();
        assert!(!health.is_healthy());
        assert_eq!(health.used, 2);
    }

    #[test]
    fn test_debug_format() {
        let pool = Pool::new(|| 0u8, PoolConfig::default());
        let rendered = format!("{pool:?}");
        assert!(rendered.contains("item_type: u8"));
        assert!(rendered.contains("size: 2"));
    }

    #[test]
    fn test_huge_expand_factor_on_unbounded_pool_is_ignored() {
        let config = PoolConfig::new()
            .with_min(1)
            .with_unbounded_max()
            .with_expand_factor(1e30);
        let mut pool = Pool::new(|| 0u8, config);

        let first = pool.get().unwrap();
        assert!(pool.get().is_none());
        assert_eq!(pool.size(), 1);
        assert_eq!(pool.used(), 1);
        pool.release(first);
    }

    #[test]
    fn test_expand_beyond_addressable_capacity_is_ignored() {
        let mut pool = Pool::new(|| 0u8, PoolConfig::new().with_unbounded_max().with_debug(true));
        pool.expand_by(usize::MAX);
        assert_eq!(pool.size(), 2);

        pool.expand_by(usize::MAX - 10);
        assert_eq!(pool.size(), 2);
        assert_eq!(pool.available(), 2);
        assert_eq!(pool.metrics().expansions, 1);
    }

    #[test]
    fn test_debug_accessor() {
        let mut pool = Pool::new(|| 0u8, PoolConfig::default());
        assert!(!pool.debug());
        pool.set_config(PoolConfigUpdate::new().debug(true));
        assert!(pool.debug());
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(std::sync::Arc<parking_lot::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock()).into_owned()
        }
    }

    fn capture_warnings(f: impl FnOnce()) -> String {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        logs.contents()
    }

    #[test]
    fn test_rejected_config_warns_in_debug_mode() {
        let mut pool = Pool::new(|| 0u8, PoolConfig::new().with_debug(true));
        let output = capture_warnings(|| {
            pool.set_config(PoolConfigUpdate::new().max(1));
        });
        assert!(output.contains("WARN"));
        assert!(output.contains("Invalid value for 'max': expected >= min (2), got 1. Ignoring"));
    }

    #[test]
    fn test_rejected_config_is_silent_without_debug() {
        let mut pool = Pool::new(|| 0u8, PoolConfig::default());
        let output = capture_warnings(|| {
            pool.set_config(PoolConfigUpdate::new().max(1));
        });
        assert!(output.is_empty(), "unexpected output: {output}");
        assert_eq!(pool.max(), Some(crate::config::DEFAULT_MAX));
    }

    #[test]
    fn test_reset_failure_warns_only_in_debug_mode() {
        for debug in [true, false] {
            let mut pool = particles(PoolConfig::new().with_debug(debug));
            let lease = pool.get().unwrap();
            pool.item_mut(&lease).unwrap().poisoned = true;

            let output = capture_warnings(|| {
                pool.release(lease);
            });
            assert_eq!(output.contains("particle poisoned"), debug);
        }
    }
}

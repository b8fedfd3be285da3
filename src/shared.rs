//! Externally locked pool handle

use crate::config::PoolConfigUpdate;
use crate::factory::ObjectFactory;
use crate::pool::{Lease, Pool};

use parking_lot::{Mutex, MutexGuard};
use std::fmt;
use std::sync::Arc;

/// Cloneable handle to a [`Pool`] guarded by a mutex.
///
/// The pool itself is single-owner; this wrapper only serializes access so
/// several threads can share one. Each call holds the lock until it returns.
/// Use [`SharedPool::with`] to run a get/use/release sequence atomically.
///
/// # Examples
///
/// ```
/// use flexipool::{PoolConfig, SharedPool};
/// use std::thread;
///
/// let pool = SharedPool::new(|| 0u64, PoolConfig::default());
///
/// let handles: Vec<_> = (0..4)
///     .map(|_| {
///         let pool = pool.clone();
///         thread::spawn(move || {
///             pool.with(|pool| {
///                 let lease = pool.get().unwrap();
///                 *pool.item_mut(&lease).unwrap() += 1;
///                 pool.release(lease);
///             })
///         })
///     })
///     .collect();
///
/// for handle in handles {
///     handle.join().unwrap();
/// }
/// assert_eq!(pool.lock().used(), 0);
/// ```
pub struct SharedPool<T, F> {
    inner: Arc<Mutex<Pool<T, F>>>,
}

impl<T, F> Clone for SharedPool<T, F> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T, F> fmt::Debug for SharedPool<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_lock() {
            Some(pool) => f.debug_tuple("SharedPool").field(&*pool).finish(),
            None => f.write_str("SharedPool(<locked>)"),
        }
    }
}

impl<T, F: ObjectFactory<T>> From<Pool<T, F>> for SharedPool<T, F> {
    fn from(pool: Pool<T, F>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(pool)),
        }
    }
}

impl<T, F: ObjectFactory<T>> SharedPool<T, F> {
    pub fn new(factory: F, config: impl Into<PoolConfigUpdate>) -> Self {
        Pool::new(factory, config).into()
    }

    /// Lock the pool for a sequence of calls
    pub fn lock(&self) -> MutexGuard<'_, Pool<T, F>> {
        self.inner.lock()
    }

    /// Run `f` with exclusive access to the pool
    pub fn with<R>(&self, f: impl FnOnce(&mut Pool<T, F>) -> R) -> R {
        f(&mut self.inner.lock())
    }

    pub fn get(&self) -> Option<Lease> {
        self.inner.lock().get()
    }

    pub fn release(&self, lease: Lease) {
        self.inner.lock().release(lease);
    }

    pub fn size(&self) -> usize {
        self.inner.lock().size()
    }

    pub fn available(&self) -> usize {
        self.inner.lock().available()
    }
}

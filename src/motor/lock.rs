//! Mutual exclusion between motors that must not step at the same time.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, TryLockError};

/// Cloneable rotation lock.
///
/// Clones share one underlying lock: motors built with clones of the same
/// `MotionLock` take turns, motors with distinct locks run concurrently.
/// Waiters are not guaranteed to be served in arrival order.
#[derive(Debug, Clone, Default)]
pub struct MotionLock {
    inner: Arc<Mutex<()>>,
}

impl MotionLock {
    /// Create an independent lock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Block until the lock is free and take it.
    ///
    /// The lock is released when the guard drops. It guards no data, so a
    /// rotation that panicked while holding it does not leave it poisoned for
    /// the other motors.
    pub fn acquire(&self) -> MutexGuard<'_, ()> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Whether some rotation currently holds the lock.
    pub fn is_locked(&self) -> bool {
        matches!(self.inner.try_lock(), Err(TryLockError::WouldBlock))
    }

    /// Whether `self` and `other` are the same lock.
    pub fn is_shared_with(&self, other: &MotionLock) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

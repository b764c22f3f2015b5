//! Shared state.
//!
//! An [`Entity`] is a cheaply cloneable handle to a value behind a lock, shared
//! between the shell, the pages and their background tasks.

use std::sync::{Arc, RwLock};

/// Strong handle to shared state.
pub struct Entity<T: ?Sized + Send + Sync> {
    inner: Arc<RwLock<T>>,
}

impl<T: Send + Sync> Entity<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(RwLock::new(value)),
        }
    }
}

impl<T: ?Sized + Send + Sync> Entity<T> {
    /// Mutate the value.
    pub fn update<F, R>(&self, f: F) -> crate::Result<R>
    where
        F: FnOnce(&mut T) -> R,
    {
        let mut guard = self.inner.write().map_err(|_| crate::Error::LockPoisoned)?;
        Ok(f(&mut *guard))
    }

    /// Read the value.
    pub fn read<F, R>(&self, f: F) -> crate::Result<R>
    where
        F: FnOnce(&T) -> R,
    {
        let guard = self.inner.read().map_err(|_| crate::Error::LockPoisoned)?;
        Ok(f(&*guard))
    }
}

impl<T: ?Sized + Send + Sync> Clone for Entity<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: ?Sized + Send + Sync> std::fmt::Debug for Entity<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entity").finish_non_exhaustive()
    }
}

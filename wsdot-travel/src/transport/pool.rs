//! Process-wide shared connection pool.
//!
//! Clients that are not given their own `reqwest::Client` share a single
//! pool, created on first use. `reqwest::Client` is reference counted, so
//! handing out clones is cheap and every clone reuses the same connections.

use std::sync::Mutex;

use tracing::debug;

use super::error::TransportError;

static SHARED_POOL: Mutex<Option<reqwest::Client>> = Mutex::new(None);

/// Get the shared pool, creating it if this is the first use.
pub fn shared_pool() -> Result<reqwest::Client, TransportError> {
    let mut slot = SHARED_POOL
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());

    if let Some(pool) = slot.as_ref() {
        return Ok(pool.clone());
    }

    let pool = reqwest::Client::builder().build().map_err(|e| {
        TransportError::new("failed to create connection pool", "", None).with_source(e)
    })?;
    debug!("created shared connection pool");
    *slot = Some(pool.clone());
    Ok(pool)
}

/// Release the shared pool.
///
/// Best effort: never panics and ignores a poisoned lock. Connections are
/// closed once every in-flight clone has been dropped. A later call to
/// [`shared_pool`] starts a fresh pool.
pub fn close_shared_pool() {
    let taken = match SHARED_POOL.try_lock() {
        Ok(mut slot) => slot.take(),
        Err(std::sync::TryLockError::Poisoned(poisoned)) => poisoned.into_inner().take(),
        Err(std::sync::TryLockError::WouldBlock) => None,
    };
    if taken.is_some() {
        debug!("closed shared connection pool");
    }
}

/// Closes the shared pool when dropped.
///
/// Hold one for the lifetime of `main` so the pool is torn down on the way
/// out of the process.
#[derive(Debug, Default)]
#[must_use = "the shared pool is closed when the guard is dropped"]
pub struct SharedPoolGuard {
    _private: (),
}

impl SharedPoolGuard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Drop for SharedPoolGuard {
    fn drop(&mut self) {
        close_shared_pool();
    }
}

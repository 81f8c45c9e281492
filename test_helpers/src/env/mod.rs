//! Guards for mutating the process environment in tests.
//!
//! Every mutation takes a process-wide re-entrant lock and returns a guard
//! that restores the variable when dropped. Guards for the same key restore
//! in LIFO order. Hold an [`EnvScope`] when a test sets several variables
//! and then reads the environment as a whole, for example through
//! `EnvRecord::from_process_env`.
//!
//! # Examples
//!
//! ```
//! use test_helpers::env;
//!
//! let _port = env::set_var("API_PORT", "8080");
//! assert_eq!(std::env::var("API_PORT").as_deref(), Ok("8080"));
//! ```

use std::env;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::sync::LazyLock;

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};

static ENV_LOCK: LazyLock<ReentrantMutex<()>> = LazyLock::new(ReentrantMutex::default);

/// Restores one variable to its prior state on drop.
#[must_use = "dropping restores the prior value"]
pub struct EnvVarGuard {
    key: String,
    original: Option<OsString>,
}

impl fmt::Debug for EnvVarGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvVarGuard")
            .field("key", &self.key)
            .field("had_original", &self.original.is_some())
            .finish_non_exhaustive()
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        let _lock = ENV_LOCK.lock();
        match self.original.take() {
            // SAFETY: `ENV_LOCK` is held.
            Some(value) => unsafe { env::set_var(&self.key, value) },
            // SAFETY: `ENV_LOCK` is held.
            None => unsafe { env::remove_var(&self.key) },
        }
    }
}

fn replace(key: String, value: Option<&OsStr>) -> EnvVarGuard {
    let _lock = ENV_LOCK.lock();
    let original = env::var_os(&key);
    match value {
        // SAFETY: `ENV_LOCK` is held.
        Some(new) => unsafe { env::set_var(&key, new) },
        // SAFETY: `ENV_LOCK` is held.
        None => unsafe { env::remove_var(&key) },
    }
    EnvVarGuard { key, original }
}

/// Set `key` to `value` until the guard drops.
///
/// # Examples
/// ```
/// use test_helpers::env;
///
/// let _g = env::set_var("API_HOST", "localhost");
/// assert_eq!(std::env::var("API_HOST").as_deref(), Ok("localhost"));
/// ```
pub fn set_var<K, V>(key: K, value: V) -> EnvVarGuard
where
    K: Into<String>,
    V: AsRef<OsStr>,
{
    replace(key.into(), Some(value.as_ref()))
}

/// Unset `key` until the guard drops.
///
/// # Examples
/// ```
/// use test_helpers::env;
///
/// let _g = env::remove_var("API_HOST");
/// assert!(std::env::var("API_HOST").is_err());
/// ```
pub fn remove_var<K>(key: K) -> EnvVarGuard
where
    K: Into<String>,
{
    replace(key.into(), None)
}

/// Exclusive hold on the process environment.
#[must_use = "dropping releases the environment lock"]
pub struct EnvLock {
    _guard: ReentrantMutexGuard<'static, ()>,
}

impl fmt::Debug for EnvLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvLock").finish_non_exhaustive()
    }
}

/// Acquire the environment lock. Guards created on the same thread while
/// the lock is held do not block.
pub fn lock() -> EnvLock {
    EnvLock {
        _guard: ENV_LOCK.lock(),
    }
}

/// Holds the environment lock and a set of guards.
///
/// Guards restore before the lock is released.
///
/// # Examples
/// ```
/// use test_helpers::env::EnvScope;
///
/// let _scope = EnvScope::apply([("API_HOST", Some("db.local")), ("API_PORT", None)]);
/// assert_eq!(std::env::var("API_HOST").as_deref(), Ok("db.local"));
/// assert!(std::env::var("API_PORT").is_err());
/// ```
#[must_use = "dropping releases the environment lock and restores guards"]
#[derive(Debug)]
pub struct EnvScope {
    guards: Vec<EnvVarGuard>,
    _lock: EnvLock,
}

impl EnvScope {
    /// Set each `Some` entry and unset each `None` entry.
    pub fn apply<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Option<V>)>,
        K: Into<String>,
        V: AsRef<OsStr>,
    {
        let lock = lock();
        let guards = entries
            .into_iter()
            .map(|(key, value)| match value {
                Some(new) => set_var(key, new),
                None => remove_var(key),
            })
            .collect();
        Self {
            guards,
            _lock: lock,
        }
    }

    /// Number of variables the scope restores.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.guards.len()
    }

    /// Whether the scope restores no variables.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.guards.is_empty()
    }
}

impl Drop for EnvScope {
    fn drop(&mut self) {
        // Restore in reverse so repeated keys unwind correctly.
        while let Some(guard) = self.guards.pop() {
            drop(guard);
        }
    }
}

#[cfg(test)]
mod tests;

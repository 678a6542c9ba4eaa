//! Environment variable management for testing
//!
//! Tests in one binary run on parallel threads but share a single process
//! environment. [`EnvVarGuard`] holds a process wide lock for its lifetime so
//! tests touching the environment run one at a time, and restores every
//! variable it changed when dropped.

use std::collections::HashMap;
use std::env;
use std::ffi::{OsStr, OsString};
use std::sync::{Mutex, MutexGuard, PoisonError};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Overrides environment variables and restores them on drop.
pub struct EnvVarGuard {
  /// Original values, `None` when the variable was unset
  saved: HashMap<OsString, Option<OsString>>,
  _lock: MutexGuard<'static, ()>,
}

impl Default for EnvVarGuard {
  fn default() -> Self {
    Self::new()
  }
}

impl EnvVarGuard {
  /// Take the environment lock. A test that panicked while holding it does
  /// not block the others.
  pub fn new() -> Self {
    let lock = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);

    Self {
      saved: HashMap::new(),
      _lock: lock,
    }
  }

  /// Set `key` to `value` until the guard is dropped.
  pub fn set<K: AsRef<OsStr>, V: AsRef<OsStr>>(&mut self, key: K, value: V) -> &mut Self {
    self.save(key.as_ref());
    unsafe {
      env::set_var(key, value);
    }
    self
  }

  /// Unset `key` until the guard is dropped.
  pub fn remove<K: AsRef<OsStr>>(&mut self, key: K) -> &mut Self {
    self.save(key.as_ref());
    unsafe {
      env::remove_var(key);
    }
    self
  }

  /// Unset every variable whose name starts with `prefix`, e.g. `CI_`.
  pub fn remove_prefixed(&mut self, prefix: &str) -> &mut Self {
    let keys: Vec<OsString> = env::vars_os()
      .map(|(key, _)| key)
      .filter(|key| key.to_string_lossy().starts_with(prefix))
      .collect();

    for key in keys {
      self.remove(key);
    }
    self
  }

  fn save(&mut self, key: &OsStr) {
    self
      .saved
      .entry(key.to_os_string())
      .or_insert_with(|| env::var_os(key));
  }
}

impl Drop for EnvVarGuard {
  fn drop(&mut self) {
    for (key, original) in self.saved.drain() {
      match original {
        Some(val) => unsafe {
          env::set_var(&key, val);
        },
        None => unsafe {
          env::remove_var(&key);
        },
      }
    }
  }
}

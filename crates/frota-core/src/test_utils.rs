//! Environment helpers for unit tests

use once_cell::sync::Lazy;
use std::ffi::OsString;
use std::sync::Mutex;

/// Held by any test that reads or writes process environment
pub static ENV_MUTEX: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

/// One variable pinned to a test value until drop
pub struct ScopedVar {
    key: &'static str,
    previous: Option<OsString>,
}

impl ScopedVar {
    pub fn set(key: &'static str, value: &str) -> Self {
        let previous = std::env::var_os(key);
        unsafe { std::env::set_var(key, value) };
        Self { key, previous }
    }

    pub fn unset(key: &'static str) -> Self {
        let previous = std::env::var_os(key);
        unsafe { std::env::remove_var(key) };
        Self { key, previous }
    }
}

impl Drop for ScopedVar {
    fn drop(&mut self) {
        match self.previous.take() {
            Some(value) => unsafe { std::env::set_var(self.key, value) },
            None => unsafe { std::env::remove_var(self.key) },
        }
    }
}

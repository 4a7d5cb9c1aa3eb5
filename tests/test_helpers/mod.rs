//! Scoped environment overrides for integration tests.

use std::env;
use std::sync::{Mutex, MutexGuard, OnceLock};

static ENV_MUTEX: OnceLock<Mutex<()>> = OnceLock::new();

/// Applies environment overrides until dropped, then restores prior values.
///
/// Holding the guard serializes every test that touches the environment.
pub struct ScopedEnv {
    previous: Vec<(&'static str, Option<String>)>,
    _lock: MutexGuard<'static, ()>,
}

impl ScopedEnv {
    /// Sets (`Some`) or removes (`None`) each variable for the guard lifetime.
    pub fn apply(overrides: &[(&'static str, Option<&str>)]) -> Self {
        let lock = ENV_MUTEX
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        let previous = overrides
            .iter()
            .map(|&(name, value)| {
                let prior = env::var(name).ok();
                // SAFETY: the global mutex serializes environment mutations in tests.
                unsafe {
                    match value {
                        Some(new_value) => env::set_var(name, new_value),
                        None => env::remove_var(name),
                    }
                }
                (name, prior)
            })
            .collect();

        Self {
            previous,
            _lock: lock,
        }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (name, value) in self.previous.drain(..).rev() {
            // SAFETY: the global mutex serializes environment mutations in tests.
            unsafe {
                match value {
                    Some(prior) => env::set_var(name, prior),
                    None => env::remove_var(name),
                }
            }
        }
    }
}

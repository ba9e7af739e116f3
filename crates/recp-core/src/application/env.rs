//! Scoped environment overrides.

use std::ffi::OsString;

use tracing::debug;

/// Sets environment variables for the lifetime of the guard.
///
/// On drop every variable is put back the way it was, including removing
/// those that did not exist before. Drop also runs while unwinding, so a
/// panicking or failing expansion still restores the environment.
///
/// The process environment is global: guards must not be held across
/// threads that read or write the environment concurrently.
#[must_use = "the override is reverted as soon as the guard is dropped"]
#[derive(Debug)]
pub struct EnvOverride {
    saved: Vec<(OsString, Option<OsString>)>,
}

impl EnvOverride {
    pub fn new<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<OsString>,
        V: Into<OsString>,
    {
        let mut saved = Vec::new();
        for (key, value) in vars {
            let key = key.into();
            let value = value.into();
            saved.push((key.clone(), std::env::var_os(&key)));
            debug!(key = %key.to_string_lossy(), "Overriding environment variable");
            // SAFETY: recp expands recipes on a single thread and no other
            // thread touches the environment while a guard is alive.
            unsafe { std::env::set_var(&key, &value) };
        }
        Self { saved }
    }

    /// Number of variables this guard will restore.
    pub fn len(&self) -> usize {
        self.saved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.saved.is_empty()
    }
}

impl Drop for EnvOverride {
    fn drop(&mut self) {
        // Reverse order so a key overridden twice ends at its first saved value.
        for (key, previous) in self.saved.drain(..).rev() {
            // SAFETY: see `EnvOverride::new`.
            unsafe {
                match previous {
                    Some(value) => std::env::set_var(&key, value),
                    None => std::env::remove_var(&key),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restores_previous_value() {
        let key = "RECP_TEST_ENV_RESTORE";
        unsafe { std::env::set_var(key, "before") };
        {
            let _guard = EnvOverride::new([(key, "during")]);
            assert_eq!(std::env::var(key).unwrap(), "during");
        }
        assert_eq!(std::env::var(key).unwrap(), "before");
        unsafe { std::env::remove_var(key) };
    }

    #[test]
    fn removes_variables_that_did_not_exist() {
        let key = "RECP_TEST_ENV_ABSENT";
        {
            let guard = EnvOverride::new([(key, "x")]);
            assert_eq!(guard.len(), 1);
            assert_eq!(std::env::var(key).unwrap(), "x");
        }
        assert!(std::env::var_os(key).is_none());
    }

    #[test]
    fn duplicate_keys_restore_original() {
        let key = "RECP_TEST_ENV_DUPLICATE";
        {
            let _guard = EnvOverride::new([(key, "one"), (key, "two")]);
            assert_eq!(std::env::var(key).unwrap(), "two");
        }
        assert!(std::env::var_os(key).is_none());
    }

    #[test]
    fn restores_on_panic() {
        let key = "RECP_TEST_ENV_PANIC";
        let result = std::panic::catch_unwind(|| {
            let _guard = EnvOverride::new([(key, "x")]);
            panic!("boom");
        });
        assert!(result.is_err());
        assert!(std::env::var_os(key).is_none());
    }
}

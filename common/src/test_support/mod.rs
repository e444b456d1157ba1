//! Shared test helpers for Lingo crates.
//!
//! The helpers in this module are intended for use from unit and integration
//! tests so repeated boilerplate (such as environment overrides) can live in
//! one place with the necessary safety documentation.

use std::ffi::OsString;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::i18n::DEFAULT_LOCALE_ENV;

static ENVIRONMENT_LOCK: Mutex<()> = Mutex::new(());

/// Guard that overrides `LINGO_DEFAULT_LOCALE` for the lifetime of the
/// instance.
///
/// The guard captures any existing value and restores it when dropped. It
/// also holds a process-wide lock, so overrides created from concurrently
/// running tests take turns instead of racing on the environment.
///
/// # Examples
///
/// ```
/// use lingo_common::test_support::DefaultLocaleOverride;
///
/// {
///     let _guard = DefaultLocaleOverride::set("cy");
///     assert_eq!(
///         std::env::var("LINGO_DEFAULT_LOCALE").ok().as_deref(),
///         Some("cy")
///     );
/// }
/// ```
pub struct DefaultLocaleOverride {
    previous: Option<OsString>,
    _lock: MutexGuard<'static, ()>,
}

impl DefaultLocaleOverride {
    /// Sets `LINGO_DEFAULT_LOCALE` to `locale`, returning a guard that will
    /// restore the prior value (if any) when dropped.
    #[must_use]
    pub fn set(locale: &str) -> Self {
        let lock = acquire();
        let previous = std::env::var_os(DEFAULT_LOCALE_ENV);
        // SAFETY: `ENVIRONMENT_LOCK` is held for the guard's lifetime, so no
        // other override mutates the environment concurrently.
        unsafe {
            std::env::set_var(DEFAULT_LOCALE_ENV, locale);
        }
        Self {
            previous,
            _lock: lock,
        }
    }

    /// Removes `LINGO_DEFAULT_LOCALE`, returning a guard that reinstates the
    /// prior value (if any) when dropped.
    #[must_use]
    pub fn clear() -> Self {
        let lock = acquire();
        let previous = std::env::var_os(DEFAULT_LOCALE_ENV);
        // SAFETY: as in `set`, the held lock serialises environment access.
        unsafe {
            std::env::remove_var(DEFAULT_LOCALE_ENV);
        }
        Self {
            previous,
            _lock: lock,
        }
    }
}

impl Drop for DefaultLocaleOverride {
    fn drop(&mut self) {
        if let Some(value) = &self.previous {
            // SAFETY: the lock is still held until this guard finishes
            // dropping, so restoration cannot race with another override.
            unsafe {
                std::env::set_var(DEFAULT_LOCALE_ENV, value);
            }
        } else {
            // SAFETY: see above.
            unsafe {
                std::env::remove_var(DEFAULT_LOCALE_ENV);
            }
        }
    }
}

fn acquire() -> MutexGuard<'static, ()> {
    ENVIRONMENT_LOCK
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

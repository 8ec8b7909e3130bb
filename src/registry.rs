//! Thread-scoped default reporter.
//!
//! Each thread owns its own slot, so tests running concurrently never see
//! each other's reporter configuration.

use std::cell::RefCell;
use std::sync::Arc;

use super::config::Settings;
use super::reporter::Reporter;

thread_local! {
    static DEFAULT_REPORTER: RefCell<Option<Arc<dyn Reporter>>> = const { RefCell::new(None) };
}

/// Sets the default reporter for verifications on the current thread.
pub fn set_default_reporter(reporter: impl Reporter + 'static) {
    set_default_reporter_arc(Arc::new(reporter));
}

/// Sets an already shared reporter as the current thread's default.
pub fn set_default_reporter_arc(reporter: Arc<dyn Reporter>) {
    replace_default_reporter(Some(reporter));
}

/// Clears the current thread's default reporter.
pub fn clear_default_reporter() {
    replace_default_reporter(None);
}

/// Returns the current thread's default reporter.
///
/// Falls back to the reporter selected by [`Settings::from_env`] (a
/// [`DiffReporter`](crate::DiffReporter) unless configured otherwise) when
/// none has been set.
#[must_use]
pub fn get_default_reporter() -> Arc<dyn Reporter> {
    DEFAULT_REPORTER
        .with(|slot| slot.borrow().clone())
        .unwrap_or_else(|| Settings::from_env().default_reporter())
}

pub(crate) fn replace_default_reporter(
    reporter: Option<Arc<dyn Reporter>>,
) -> Option<Arc<dyn Reporter>> {
    DEFAULT_REPORTER.with(|slot| std::mem::replace(&mut *slot.borrow_mut(), reporter))
}

//! Per-thread test context.
//!
//! The test harness runs each test on its own thread, so the identity of the
//! running test is carried in thread-local state installed by
//! `#[approval_test]` (or by hand via [`TestScope::enter`]).

use std::cell::RefCell;
use std::marker::PhantomData;
use std::sync::Arc;

use super::namer::Namer;
use super::registry;
use super::reporter::Reporter;

thread_local! {
    static CURRENT_TEST: RefCell<Option<Namer>> = const { RefCell::new(None) };
}

/// Guard that makes a [`Namer`] the current test context on this thread.
///
/// Entering a scope also clears the thread's default reporter, so a test
/// never inherits configuration from whatever ran on the thread before it.
/// Dropping the guard restores both the previous namer and the previous
/// default reporter.
///
/// # Examples
///
///     use approvals::{Namer, TestIdentity, TestScope};
///
///     let identity = TestIdentity::new("docs.example").unwrap();
///     let _scope = TestScope::enter(Namer::new("/tmp", identity));
///     assert!(TestScope::current().is_some());
#[derive(Debug)]
#[must_use = "the scope ends as soon as the guard is dropped"]
pub struct TestScope {
    previous_namer: Option<Namer>,
    previous_reporter: Option<Arc<dyn Reporter>>,
    // Thread-local state must be restored on the thread that set it.
    _not_send: PhantomData<*const ()>,
}

impl TestScope {
    /// Installs `namer` as the current test context.
    pub fn enter(namer: Namer) -> Self {
        let previous_namer = CURRENT_TEST.with(|slot| slot.borrow_mut().replace(namer));
        let previous_reporter = registry::replace_default_reporter(None);
        Self {
            previous_namer,
            previous_reporter,
            _not_send: PhantomData,
        }
    }

    /// Returns the namer of the innermost active scope on this thread.
    #[must_use]
    pub fn current() -> Option<Namer> {
        CURRENT_TEST.with(|slot| slot.borrow().clone())
    }
}

impl Drop for TestScope {
    fn drop(&mut self) {
        let namer = self.previous_namer.take();
        CURRENT_TEST.with(|slot| *slot.borrow_mut() = namer);
        registry::replace_default_reporter(self.previous_reporter.take());
    }
}

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use parking_lot::Mutex;

/// Cleanup handle returned by `subscribe`.
///
/// Dropping the handle leaves the subscriber registered; call
/// [`Subscription::unsubscribe`] to remove it.
#[derive(Clone)]
pub struct Subscription(Rc<RefCell<Option<Box<dyn FnOnce()>>>>);

impl Subscription {
    pub(crate) fn new(cleanup: impl FnOnce() + 'static) -> Self {
        Self(Rc::new(RefCell::new(Some(Box::new(cleanup)))))
    }

    /// Removes the subscriber. Runs at most once (safe to call multiple times).
    pub fn unsubscribe(&self) {
        let cleanup = self.0.borrow_mut().take();
        if let Some(cleanup) = cleanup {
            cleanup()
        }
    }

    pub fn is_active(&self) -> bool {
        self.0.borrow().is_some()
    }
}

/// [`Subscription`] for a [`SharedStore`](crate::SharedStore); can be sent to and
/// released from any thread.
#[derive(Clone)]
pub struct SharedSubscription(Arc<Mutex<Option<Box<dyn FnOnce() + Send>>>>);

impl SharedSubscription {
    pub(crate) fn new(cleanup: impl FnOnce() + Send + 'static) -> Self {
        Self(Arc::new(Mutex::new(Some(Box::new(cleanup)))))
    }

    /// Removes the subscriber. Runs at most once.
    pub fn unsubscribe(&self) {
        let cleanup = self.0.lock().take();
        if let Some(cleanup) = cleanup {
            cleanup()
        }
    }

    pub fn is_active(&self) -> bool {
        self.0.lock().is_some()
    }
}

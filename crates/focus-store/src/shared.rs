//! Thread-shared store.
//!
//! [`SharedStore`] has the same semantics as [`Store`](crate::Store) but can be
//! cloned across threads. A reentrant mutex is held across the whole
//! compose-apply-log-notify sequence, so updates from different threads never
//! interleave, while a subscriber running on the updating thread can still read
//! the store or update it again.

use std::cell::RefCell;
use std::fmt;
use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::ReentrantMutex;

use focus_core::{Lens, Reducer, flow};

use crate::{Collection, Logger, SharedSubscription, StoreError, UpdateRecord};

type SharedSubscriber = Arc<dyn Fn() + Send + Sync>;

struct SharedCell<S> {
    state: Arc<S>,
    subscribers: Collection<SharedSubscriber>,
}

type Guarded<S> = ReentrantMutex<RefCell<SharedCell<S>>>;

pub struct SharedStore<S> {
    cell: Arc<Guarded<S>>,
    logger: Logger<S>,
}

impl<S> Clone for SharedStore<S> {
    fn clone(&self) -> Self {
        Self {
            cell: self.cell.clone(),
            logger: self.logger.clone(),
        }
    }
}

impl<S> SharedStore<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new(initial_state: S) -> Self {
        Self::with_logger(initial_state, Logger::noop())
    }

    pub fn with_logger(initial_state: S, logger: Logger<S>) -> Self {
        Self {
            cell: Arc::new(ReentrantMutex::new(RefCell::new(SharedCell {
                state: Arc::new(initial_state),
                subscribers: Collection::new(),
            }))),
            logger,
        }
    }

    pub fn snapshot(&self) -> Arc<S> {
        self.cell.lock().borrow().state.clone()
    }

    pub fn get_state(&self) -> S {
        S::clone(&self.snapshot())
    }

    pub fn select<R>(&self, selector: impl FnOnce(&S) -> R) -> R {
        let state = self.snapshot();
        selector(&state)
    }

    pub fn update_state(&self, reducers: impl IntoIterator<Item = Reducer<S>>) {
        let reducer = flow(reducers);
        let guard = self.cell.lock();
        self.apply_locked(&guard, reducer);
    }

    /// Like [`SharedStore::update_state`], but gives up when the store stays locked
    /// by another thread for longer than `timeout`. On error nothing is applied,
    /// logged or notified.
    pub fn try_update_state_for(
        &self,
        timeout: Duration,
        reducers: impl IntoIterator<Item = Reducer<S>>,
    ) -> Result<(), StoreError> {
        let reducer = flow(reducers);
        let guard = self
            .cell
            .try_lock_for(timeout)
            .ok_or(StoreError::Contended { waited: timeout })?;
        self.apply_locked(&guard, reducer);
        Ok(())
    }

    pub fn update(&self, f: impl Fn(&S) -> S + 'static) {
        self.update_state([Reducer::new(f)]);
    }

    pub fn subscribe(&self, subscriber: impl Fn() + Send + Sync + 'static) -> SharedSubscription {
        let subscriber: SharedSubscriber = Arc::new(subscriber);
        {
            let guard = self.cell.lock();
            let mut cell = guard.borrow_mut();
            cell.subscribers = cell.subscribers.append(subscriber.clone());
        }

        let cell: Weak<Guarded<S>> = Arc::downgrade(&self.cell);
        SharedSubscription::new(move || {
            if let Some(cell) = cell.upgrade() {
                let guard = cell.lock();
                let mut cell = guard.borrow_mut();
                cell.subscribers = cell.subscribers.remove(&subscriber);
            }
        })
    }

    pub fn subscriber_count(&self) -> usize {
        self.cell.lock().borrow().subscribers.len()
    }

    /// A handle that does not keep the store alive. See [`Store::downgrade`](crate::Store::downgrade).
    pub fn downgrade(&self) -> WeakSharedStore<S> {
        WeakSharedStore {
            cell: Arc::downgrade(&self.cell),
            logger: self.logger.clone(),
        }
    }

    pub fn focus<F: 'static>(&self, lens: &Lens<S, F>) -> SharedFocusedStore<S, F> {
        SharedFocusedStore {
            root: self.clone(),
            lens: lens.clone(),
        }
    }

    fn apply_locked(&self, cell: &RefCell<SharedCell<S>>, reducer: Reducer<S>) {
        let before = cell.borrow().state.clone();
        let after = Arc::new(reducer.apply(&before));
        cell.borrow_mut().state = after.clone();

        log::trace!(
            target: "focus_store",
            "shared state replaced by {}",
            reducer.label().unwrap_or("unlabeled reducer")
        );
        self.logger.log(&UpdateRecord {
            state_before_update: &before,
            label: reducer.label(),
            state_after_update: &after,
        });

        let subscribers = cell.borrow().subscribers.clone();
        subscribers.for_each(|subscriber| subscriber());
    }
}

impl<S: fmt::Debug> fmt::Debug for SharedStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let guard = self.cell.lock();
        let cell = guard.borrow();
        f.debug_struct("SharedStore")
            .field("state", &cell.state)
            .field("subscribers", &cell.subscribers.len())
            .finish()
    }
}

/// Non-owning handle to a [`SharedStore`].
pub struct WeakSharedStore<S> {
    cell: Weak<Guarded<S>>,
    logger: Logger<S>,
}

impl<S> Clone for WeakSharedStore<S> {
    fn clone(&self) -> Self {
        Self {
            cell: self.cell.clone(),
            logger: self.logger.clone(),
        }
    }
}

impl<S> WeakSharedStore<S> {
    pub fn upgrade(&self) -> Option<SharedStore<S>> {
        self.cell.upgrade().map(|cell| SharedStore {
            cell,
            logger: self.logger.clone(),
        })
    }
}

/// A view of a [`SharedStore`] through a lens. See [`FocusedStore`](crate::FocusedStore).
pub struct SharedFocusedStore<S, F> {
    root: SharedStore<S>,
    lens: Lens<S, F>,
}

impl<S, F> Clone for SharedFocusedStore<S, F> {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            lens: self.lens.clone(),
        }
    }
}

impl<S, F> SharedFocusedStore<S, F>
where
    S: Clone + Send + Sync + 'static,
    F: 'static,
{
    pub fn root(&self) -> &SharedStore<S> {
        &self.root
    }

    pub fn get_state(&self) -> F {
        self.root.select(|state| self.lens.get(state))
    }

    pub fn select<R>(&self, selector: impl FnOnce(&F) -> R) -> R {
        selector(&self.get_state())
    }

    pub fn update_state(&self, reducers: impl IntoIterator<Item = Reducer<F>>) {
        let lens = &self.lens;
        self.root
            .update_state(reducers.into_iter().map(|reducer| lens.reduce(reducer)));
    }

    pub fn try_update_state_for(
        &self,
        timeout: Duration,
        reducers: impl IntoIterator<Item = Reducer<F>>,
    ) -> Result<(), StoreError> {
        let lens = &self.lens;
        self.root.try_update_state_for(
            timeout,
            reducers.into_iter().map(|reducer| lens.reduce(reducer)),
        )
    }

    pub fn update(&self, f: impl Fn(&F) -> F + 'static) {
        self.update_state([Reducer::new(f)]);
    }

    pub fn subscribe(&self, subscriber: impl Fn() + Send + Sync + 'static) -> SharedSubscription {
        self.root.subscribe(subscriber)
    }

    pub fn focus<U: 'static>(&self, lens: &Lens<F, U>) -> SharedFocusedStore<S, U> {
        SharedFocusedStore {
            root: self.root.clone(),
            lens: self.lens.focus(lens),
        }
    }
}

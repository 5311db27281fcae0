use std::borrow::Cow;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use focus_core::{Lens, Reducer, flow};

use crate::{Collection, Logger, Subscription, UpdateRecord};

type Subscriber = Rc<dyn Fn()>;

/// Read/update/subscribe surface shared by a root [`Store`] and its
/// [`FocusedStore`] views, so binding code can take either.
pub trait StateHandle<T: Clone + 'static>: Clone {
    /// State type of the root store this handle writes through to.
    type Root: Clone + 'static;

    fn get_state(&self) -> T;

    fn select<R>(&self, selector: impl FnOnce(&T) -> R) -> R;

    /// Applies all `reducers` as one transition: one log entry, one notification.
    fn update_state<I>(&self, reducers: I)
    where
        I: IntoIterator<Item = Reducer<T>>;

    fn subscribe(&self, subscriber: impl Fn() + 'static) -> Subscription;

    fn focus<U: 'static>(&self, lens: &Lens<T, U>) -> FocusedStore<Self::Root, U>;

    fn update(&self, f: impl Fn(&T) -> T + 'static) {
        self.update_state([Reducer::new(f)]);
    }

    fn batch(&self) -> Batch<'_, Self, T> {
        Batch::new(self)
    }
}

struct StoreCell<S> {
    state: Rc<S>,
    subscribers: Collection<Subscriber>,
}

/// Owns one state cell and one subscriber list.
///
/// `Store` is a cheap handle: clones share the same cell. The state is replaced
/// wholesale on every update and never mutated in place. Reducers, the logger
/// and subscribers run while no borrow of the cell is held, so they may read the
/// store, and a subscriber may itself call `update_state`.
pub struct Store<S> {
    cell: Rc<RefCell<StoreCell<S>>>,
    logger: Logger<S>,
}

impl<S> Clone for Store<S> {
    fn clone(&self) -> Self {
        Self {
            cell: self.cell.clone(),
            logger: self.logger.clone(),
        }
    }
}

impl<S: Clone + 'static> Store<S> {
    pub fn new(initial_state: S) -> Self {
        Self::with_logger(initial_state, Logger::noop())
    }

    pub fn with_logger(initial_state: S, logger: Logger<S>) -> Self {
        Self {
            cell: Rc::new(RefCell::new(StoreCell {
                state: Rc::new(initial_state),
                subscribers: Collection::new(),
            })),
            logger,
        }
    }

    /// The current state without copying it.
    pub fn snapshot(&self) -> Rc<S> {
        self.cell.borrow().state.clone()
    }

    pub fn subscriber_count(&self) -> usize {
        self.cell.borrow().subscribers.len()
    }

    /// A handle that does not keep the store alive.
    ///
    /// A subscriber that reads or updates its own store should capture this
    /// instead of a `Store` clone: the subscriber list owns the subscriber, so a
    /// captured `Store` would keep the cell alive after every other handle is gone.
    pub fn downgrade(&self) -> WeakStore<S> {
        WeakStore {
            cell: Rc::downgrade(&self.cell),
            logger: self.logger.clone(),
        }
    }

    fn apply(&self, reducer: Reducer<S>) {
        let before = self.snapshot();
        let after = Rc::new(reducer.apply(&before));
        self.cell.borrow_mut().state = after.clone();

        log::trace!(
            target: "focus_store",
            "state replaced by {}",
            reducer.label().unwrap_or("unlabeled reducer")
        );
        self.logger.log(&UpdateRecord {
            state_before_update: &before,
            label: reducer.label(),
            state_after_update: &after,
        });

        let subscribers = self.cell.borrow().subscribers.clone();
        subscribers.for_each(|subscriber| subscriber());
    }
}

impl<S: Clone + 'static> StateHandle<S> for Store<S> {
    type Root = S;

    fn get_state(&self) -> S {
        S::clone(&self.snapshot())
    }

    fn select<R>(&self, selector: impl FnOnce(&S) -> R) -> R {
        let state = self.snapshot();
        selector(&state)
    }

    fn update_state<I>(&self, reducers: I)
    where
        I: IntoIterator<Item = Reducer<S>>,
    {
        self.apply(flow(reducers));
    }

    fn subscribe(&self, subscriber: impl Fn() + 'static) -> Subscription {
        let subscriber: Subscriber = Rc::new(subscriber);
        {
            let mut cell = self.cell.borrow_mut();
            cell.subscribers = cell.subscribers.append(subscriber.clone());
            log::trace!(target: "focus_store", "subscribed ({} active)", cell.subscribers.len());
        }

        let cell = Rc::downgrade(&self.cell);
        Subscription::new(move || {
            if let Some(cell) = cell.upgrade() {
                let mut cell = cell.borrow_mut();
                cell.subscribers = cell.subscribers.remove(&subscriber);
                log::trace!(target: "focus_store", "unsubscribed ({} active)", cell.subscribers.len());
            }
        })
    }

    fn focus<U: 'static>(&self, lens: &Lens<S, U>) -> FocusedStore<S, U> {
        FocusedStore {
            root: self.clone(),
            lens: lens.clone(),
        }
    }
}

impl<S: fmt::Debug> fmt::Debug for Store<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cell = self.cell.borrow();
        f.debug_struct("Store")
            .field("state", &cell.state)
            .field("subscribers", &cell.subscribers.len())
            .finish()
    }
}

/// Non-owning handle to a [`Store`], see [`Store::downgrade`].
pub struct WeakStore<S> {
    cell: Weak<RefCell<StoreCell<S>>>,
    logger: Logger<S>,
}

impl<S> Clone for WeakStore<S> {
    fn clone(&self) -> Self {
        Self {
            cell: self.cell.clone(),
            logger: self.logger.clone(),
        }
    }
}

impl<S> WeakStore<S> {
    /// `None` once every `Store` handle has been dropped.
    pub fn upgrade(&self) -> Option<Store<S>> {
        self.cell.upgrade().map(|cell| Store {
            cell,
            logger: self.logger.clone(),
        })
    }
}

/// A view of a root [`Store`] through a lens.
///
/// It has no state of its own: reads go through `lens.get` on the current root
/// state, updates are lifted with `lens.reduce` and run as one root update, and
/// subscriptions are the root's. Every root update notifies every subscriber,
/// whichever part of the state it touched.
pub struct FocusedStore<S, F> {
    root: Store<S>,
    lens: Lens<S, F>,
}

impl<S, F> Clone for FocusedStore<S, F> {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            lens: self.lens.clone(),
        }
    }
}

impl<S, F> FocusedStore<S, F> {
    pub fn root(&self) -> &Store<S> {
        &self.root
    }

    pub fn lens(&self) -> &Lens<S, F> {
        &self.lens
    }
}

impl<S: Clone + 'static, F: Clone + 'static> StateHandle<F> for FocusedStore<S, F> {
    type Root = S;

    fn get_state(&self) -> F {
        self.root.select(|state| self.lens.get(state))
    }

    fn select<R>(&self, selector: impl FnOnce(&F) -> R) -> R {
        selector(&self.get_state())
    }

    fn update_state<I>(&self, reducers: I)
    where
        I: IntoIterator<Item = Reducer<F>>,
    {
        let lens = &self.lens;
        self.root
            .update_state(reducers.into_iter().map(|reducer| lens.reduce(reducer)));
    }

    fn subscribe(&self, subscriber: impl Fn() + 'static) -> Subscription {
        self.root.subscribe(subscriber)
    }

    /// Composes `lens` after this view's lens; the result still writes to the root.
    fn focus<U: 'static>(&self, lens: &Lens<F, U>) -> FocusedStore<S, U> {
        FocusedStore {
            root: self.root.clone(),
            lens: self.lens.focus(lens),
        }
    }
}

/// Collects reducers for a single `update_state` call.
///
/// ```
/// use focus_store::prelude::*;
///
/// let store = Store::new(0_i32);
/// store.batch().then(|n| n + 3).then(|n| n * 2).then(|n| n - 1).commit();
/// assert_eq!(store.get_state(), 5);
/// ```
#[must_use = "a batch does nothing until `commit` is called"]
pub struct Batch<'a, H, T> {
    handle: &'a H,
    reducers: Vec<Reducer<T>>,
    label: Option<Cow<'static, str>>,
}

impl<'a, H, T> Batch<'a, H, T>
where
    H: StateHandle<T>,
    T: Clone + 'static,
{
    pub fn new(handle: &'a H) -> Self {
        Self {
            handle,
            reducers: Vec::new(),
            label: None,
        }
    }

    pub fn then(self, f: impl Fn(&T) -> T + 'static) -> Self {
        self.then_reducer(Reducer::new(f))
    }

    pub fn then_reducer(mut self, reducer: Reducer<T>) -> Self {
        self.reducers.push(reducer);
        self
    }

    /// Label reported for the whole batch, replacing the joined member labels.
    pub fn label(mut self, label: impl Into<Cow<'static, str>>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn len(&self) -> usize {
        self.reducers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reducers.is_empty()
    }

    pub fn commit(self) {
        match self.label {
            Some(label) => self
                .handle
                .update_state([flow(self.reducers).with_label(label)]),
            None => self.handle.update_state(self.reducers),
        }
    }
}

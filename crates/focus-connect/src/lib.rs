//! # Connecting stores to views
//!
//! `connect` creates a store and hands out bindings to it. A binding is what a
//! view holds: it re-renders (publishes a new value to its `Signal`) only when
//! the part of the state it watches actually changed.
//!
//! ```rust
//! use focus_connect::*;
//! use focus_core::Lens;
//! use focus_store::Logger;
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct State {
//!     a: i32,
//!     b: i32,
//! }
//!
//! let app = connect(State { a: 0, b: 0 }, Logger::noop());
//! let a = app.focused_state(&Lens::new(|s: &State| s.a, |s: &State, a| State { a, ..s.clone() }));
//! let b = app.focused_state(&Lens::new(|s: &State| s.b, |s: &State, b| State { b, ..s.clone() }));
//!
//! a.update(|a| a + 1);
//!
//! assert_eq!(a.state(), 1);
//! assert_eq!(a.render_count(), 2);
//! assert_eq!(b.render_count(), 1);
//! ```

pub mod binding;
pub mod signal;

pub use binding::Binding;
pub use signal::{Signal, SubId, signal};

use focus_core::Lens;
use focus_store::{FocusedStore, Logger, StateHandle, Store};

/// A store together with the binding constructors for it.
#[derive(Clone)]
pub struct Connection<S> {
    store: Store<S>,
}

impl<S: Clone + 'static> Connection<S> {
    pub fn store(&self) -> &Store<S> {
        &self.store
    }

    /// Binds to the whole state.
    pub fn global_state(&self) -> Binding<Store<S>, S>
    where
        S: PartialEq,
    {
        Binding::new(self.store.clone())
    }

    /// Binds to the part of the state `lens` points at.
    pub fn focused_state<F>(&self, lens: &Lens<S, F>) -> Binding<FocusedStore<S, F>, F>
    where
        F: Clone + PartialEq + 'static,
    {
        Binding::new(self.store.focus(lens))
    }
}

pub fn connect<S: Clone + 'static>(initial_state: S, logger: Logger<S>) -> Connection<S> {
    log::debug!(target: "focus_connect", "connected new store");
    Connection {
        store: Store::with_logger(initial_state, logger),
    }
}

//! # Stores
//!
//! A `Store<S>` owns one immutable state value and a list of subscribers. State
//! changes only through reducers, and each `update_state` call is a single
//! transition:
//!
//! 1. the reducers of the call are composed with `flow`,
//! 2. the composed reducer is applied to the current state,
//! 3. the logger sees the state before and after the change,
//! 4. every subscriber is called once.
//!
//! ```rust
//! use focus_store::prelude::*;
//!
//! let store = Store::new(0_i32);
//! let sub = store.subscribe(|| println!("changed"));
//!
//! store.update_state([
//!     reducer(|n: &i32| n + 3),
//!     reducer(|n: &i32| n * 2),
//!     reducer(|n: &i32| n - 1),
//! ]);
//! assert_eq!(store.get_state(), 5);
//! sub.unsubscribe();
//! ```
//!
//! ## Focused stores
//!
//! `focus` gives a view of the store through a lens. The view reads and writes
//! its part of the root state, and its subscriptions are the root's:
//!
//! ```rust
//! use focus_store::prelude::*;
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct State {
//!     a: i32,
//!     b: i32,
//! }
//!
//! let store = Store::new(State { a: 1, b: 2 });
//! let b = store.focus(&Lens::new(|s: &State| s.b, |s: &State, b| State { b, ..s.clone() }));
//!
//! b.update(|b| b * 10);
//! assert_eq!(store.get_state(), State { a: 1, b: 20 });
//! ```
//!
//! `Store` is single-threaded. `SharedStore` has the same semantics behind a
//! lock and can be cloned across threads.

pub mod collection;
pub mod error;
pub mod logger;
pub mod prelude;
pub mod shared;
pub mod store;
pub mod subscription;

pub use collection::{Collection, Identity};
pub use error::StoreError;
pub use logger::{Logger, UpdateRecord};
pub use shared::{SharedFocusedStore, SharedStore, WeakSharedStore};
pub use store::{Batch, FocusedStore, StateHandle, Store, WeakStore};
pub use subscription::{SharedSubscription, Subscription};

pub use focus_core::{Lens, Reducer, flow, reducer};

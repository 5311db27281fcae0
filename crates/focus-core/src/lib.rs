//! # Lenses and reducers
//!
//! Focus keeps application state in immutable values and changes it by
//! replacing them. Two small pieces make that practical:
//!
//! - `Reducer<S>`: a state transition `&S -> S`, optionally labelled.
//! - `Lens<O, I>`: a pure `get`/`set` pair that reads or replaces one part `I`
//!   of a larger value `O`.
//!
//! ## Reducers and flow
//!
//! ```rust
//! use focus_core::*;
//!
//! let step = flow([
//!     reducer(|n: &i32| n + 3),
//!     reducer(|n: &i32| n * 2),
//!     reducer(|n: &i32| n - 1),
//! ]);
//! assert_eq!(step.apply(&0), 5);
//! ```
//!
//! ## Lenses
//!
//! A lens composes with a deeper lens through `focus`, and lifts a reducer that
//! only knows about the part into one over the whole value through `reduce`:
//!
//! ```rust
//! use focus_core::*;
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct State {
//!     a: i32,
//!     b: i32,
//! }
//!
//! let a = Lens::new(|s: &State| s.a, |s: &State, a| State { a, ..s.clone() });
//! let state = State { a: 1, b: 2 };
//!
//! assert_eq!(a.get(&state), 1);
//! assert_eq!(a.set(&state, 5), State { a: 5, b: 2 });
//! assert_eq!(a.reduce(reducer(|n: &i32| n + 1)).apply(&state), State { a: 2, b: 2 });
//! ```
//!
//! `lenses` has constructors for sequence slots, keyed maps and identifier
//! fields; `attribute_lens!` covers named struct fields.

pub mod lens;
pub mod lenses;
pub mod reducer;

pub use lens::Lens;
pub use lenses::{HasId, KeyedMap, id_lens, index_lens, key_lens};
pub use reducer::{Reducer, flow, reducer};

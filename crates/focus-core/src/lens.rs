use std::fmt;
use std::sync::Arc;

use crate::Reducer;

type Getter<O, I> = Arc<dyn Fn(&O) -> I + Send + Sync>;
type Setter<O, I> = Arc<dyn Fn(&O, I) -> O + Send + Sync>;

/// A reified accessor for some "inner" part `I` of an "outer" value `O`.
///
/// `get` reads the part, `set` returns a copy of the outer value with the part
/// replaced. Neither touches the value it is given. Lenses are expected to follow
/// the usual laws (not checked at runtime):
///
/// - `get(&set(o, i)) == i`
/// - `set(o, get(o)) == o`
/// - `set(&set(o, i1), i2) == set(o, i2)`
///
/// A lens owns no state; cloning one is cheap and clones can be shared freely
/// between stores and threads.
pub struct Lens<O, I> {
    get: Getter<O, I>,
    set: Setter<O, I>,
}

impl<O, I> Clone for Lens<O, I> {
    fn clone(&self) -> Self {
        Self {
            get: self.get.clone(),
            set: self.set.clone(),
        }
    }
}

impl<O: 'static, I: 'static> Lens<O, I> {
    pub fn new(
        get: impl Fn(&O) -> I + Send + Sync + 'static,
        set: impl Fn(&O, I) -> O + Send + Sync + 'static,
    ) -> Self {
        Self {
            get: Arc::new(get),
            set: Arc::new(set),
        }
    }

    /// Lens over a field reachable through a pair of accessors.
    ///
    /// `set` clones the outer value and assigns through `get_mut`.
    pub fn from_field<G, M>(get_ref: G, get_mut: M) -> Self
    where
        O: Clone,
        I: Clone,
        G: Fn(&O) -> &I + Send + Sync + 'static,
        M: Fn(&mut O) -> &mut I + Send + Sync + 'static,
    {
        Self::new(
            move |outer| get_ref(outer).clone(),
            move |outer, inner| {
                let mut next = outer.clone();
                *get_mut(&mut next) = inner;
                next
            },
        )
    }

    pub fn get(&self, outer: &O) -> I {
        (self.get)(outer)
    }

    pub fn set(&self, outer: &O, inner: I) -> O {
        (self.set)(outer, inner)
    }

    /// Replaces the inner part with `f` applied to its current value.
    pub fn update(&self, outer: &O, f: impl FnOnce(&I) -> I) -> O {
        self.set(outer, f(&self.get(outer)))
    }

    /// Lens composition: combines `Lens<O, I>` and `Lens<I, J>` into `Lens<O, J>`.
    ///
    /// Composition is associative: `a.focus(&b).focus(&c)` reads and writes the same
    /// part as `a.focus(&b.focus(&c))`.
    pub fn focus<J: 'static>(&self, inner: &Lens<I, J>) -> Lens<O, J> {
        let outer_get = self.get.clone();
        let inner_get = inner.get.clone();
        let get = move |outer: &O| inner_get(&outer_get(outer));

        let outer_get = self.get.clone();
        let outer_set = self.set.clone();
        let inner_set = inner.set.clone();
        let set = move |outer: &O, j: J| outer_set(outer, inner_set(&outer_get(outer), j));

        Lens::new(get, set)
    }

    /// Lifts a reducer over the inner part into a reducer over the outer value.
    ///
    /// The label of `reducer`, if any, is kept.
    pub fn reduce(&self, reducer: Reducer<I>) -> Reducer<O> {
        let label = reducer.label.clone();
        let lens = self.clone();
        let mut lifted = Reducer::new(move |outer: &O| lens.set(outer, reducer.apply(&lens.get(outer))));
        lifted.label = label;
        lifted
    }
}

impl<O: Clone + 'static> Lens<O, O> {
    /// The lens that sees the whole value. Neutral element of [`Lens::focus`].
    pub fn identity() -> Self {
        Self::new(O::clone, |_, inner| inner)
    }
}

impl<O, I> fmt::Debug for Lens<O, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lens").finish_non_exhaustive()
    }
}

/// Builds a lens over a named field of a struct.
///
/// ```
/// use focus_core::{attribute_lens, Lens};
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Speed {
///     value: f64,
///     unit: &'static str,
/// }
///
/// let value: Lens<Speed, f64> = attribute_lens!(Speed, value);
/// let speed = Speed { value: 17.0, unit: "km/h" };
/// assert_eq!(value.get(&speed), 17.0);
/// assert_eq!(value.set(&speed, 17.5), Speed { value: 17.5, unit: "km/h" });
/// ```
#[macro_export]
macro_rules! attribute_lens {
    ($outer:ty, $field:ident) => {
        $crate::Lens::<$outer, _>::from_field(
            |outer: &$outer| &outer.$field,
            |outer: &mut $outer| &mut outer.$field,
        )
    };
}

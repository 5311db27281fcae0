use std::borrow::Cow;
use std::fmt;
use std::rc::Rc;

/// A state transition: maps the current state to the next one.
///
/// Reducers read the previous value by reference and return a fresh value, so the
/// previous state is never mutated in place. A reducer may carry a label, which is
/// what a store reports to its logger for the update it takes part in.
pub struct Reducer<S> {
    pub(crate) label: Option<Cow<'static, str>>,
    f: Rc<dyn Fn(&S) -> S>,
}

impl<S> Clone for Reducer<S> {
    fn clone(&self) -> Self {
        Self {
            label: self.label.clone(),
            f: self.f.clone(),
        }
    }
}

impl<S: 'static> Reducer<S> {
    pub fn new(f: impl Fn(&S) -> S + 'static) -> Self {
        Self {
            label: None,
            f: Rc::new(f),
        }
    }

    pub fn labeled(label: impl Into<Cow<'static, str>>, f: impl Fn(&S) -> S + 'static) -> Self {
        Self::new(f).with_label(label)
    }

    /// Identity transition. Returns a copy of the state it is given.
    pub fn identity() -> Self
    where
        S: Clone,
    {
        Self::new(S::clone)
    }

    pub fn with_label(mut self, label: impl Into<Cow<'static, str>>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn apply(&self, state: &S) -> S {
        (self.f)(state)
    }

    /// Runs `self` then `next`. Shorthand for a two-element [`flow`].
    pub fn then(self, next: Reducer<S>) -> Reducer<S>
    where
        S: Clone,
    {
        flow([self, next])
    }
}

impl<S, F> From<F> for Reducer<S>
where
    S: 'static,
    F: Fn(&S) -> S + 'static,
{
    fn from(f: F) -> Self {
        Reducer::new(f)
    }
}

impl<S> fmt::Debug for Reducer<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reducer")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Boxes a closure into a [`Reducer`].
pub fn reducer<S: 'static>(f: impl Fn(&S) -> S + 'static) -> Reducer<S> {
    Reducer::new(f)
}

/// Composes reducers into one, applied strictly left to right.
///
/// `flow([r1, r2, r3])` behaves like `|s| r3(r2(r1(s)))`. An empty sequence yields
/// the identity reducer. The labels of the labelled members are joined with `" > "`.
pub fn flow<S>(reducers: impl IntoIterator<Item = Reducer<S>>) -> Reducer<S>
where
    S: Clone + 'static,
{
    let mut reducers: Vec<Reducer<S>> = reducers.into_iter().collect();
    match reducers.len() {
        0 => Reducer::identity(),
        1 => reducers.remove(0),
        _ => {
            let labels: Vec<&str> = reducers.iter().filter_map(Reducer::label).collect();
            let label = (!labels.is_empty()).then(|| Cow::Owned(labels.join(" > ")));
            let first = reducers.remove(0);
            let rest: Rc<[Reducer<S>]> = reducers.into();
            Reducer {
                label,
                f: Rc::new(move |state: &S| {
                    rest.iter()
                        .fold(first.apply(state), |acc, step| step.apply(&acc))
                }),
            }
        }
    }
}

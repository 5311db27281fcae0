//! Ready-made lenses for common shapes: sequence slots, keyed maps and identifiers.
//!
//! Lookups that can miss focus an `Option`: `None` is the "absent" value, returned
//! instead of failing.

use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

use crate::Lens;

/// A lens that looks at the slot `index` of a `Vec<T>`.
///
/// - `get` is `None` when `index` is out of bounds.
/// - `set(v, Some(x))` replaces the slot in bounds and appends when `index == len`.
///   When `index > len` the gap is filled with `T::default()`.
/// - `set(v, None)` truncates the sequence to `index` elements; a no-op when the
///   slot is already absent.
///
/// The lens laws hold for `Some` writes at `index <= len`. Gap filling and `None`
/// writes do not satisfy set-set: truncation drops the tail and padding stays.
pub fn index_lens<T>(index: usize) -> Lens<Vec<T>, Option<T>>
where
    T: Clone + Default + 'static,
{
    Lens::new(
        move |items: &Vec<T>| items.get(index).cloned(),
        move |items: &Vec<T>, value: Option<T>| {
            let mut next = items.clone();
            match value {
                Some(value) if index < next.len() => next[index] = value,
                Some(value) => {
                    next.resize_with(index, T::default);
                    next.push(value);
                }
                None => next.truncate(index),
            }
            next
        },
    )
}

/// Associative containers that [`key_lens`] can look into.
pub trait KeyedMap: Clone {
    type Key;
    type Value;

    fn lookup(&self, key: &Self::Key) -> Option<&Self::Value>;
    fn bind(&mut self, key: Self::Key, value: Self::Value);
    fn unbind(&mut self, key: &Self::Key);
}

impl<K, V, H> KeyedMap for HashMap<K, V, H>
where
    K: Eq + Hash + Clone,
    V: Clone,
    H: BuildHasher + Clone,
{
    type Key = K;
    type Value = V;

    fn lookup(&self, key: &K) -> Option<&V> {
        self.get(key)
    }

    fn bind(&mut self, key: K, value: V) {
        self.insert(key, value);
    }

    fn unbind(&mut self, key: &K) {
        self.remove(key);
    }
}

impl<K, V> KeyedMap for BTreeMap<K, V>
where
    K: Ord + Clone,
    V: Clone,
{
    type Key = K;
    type Value = V;

    fn lookup(&self, key: &K) -> Option<&V> {
        self.get(key)
    }

    fn bind(&mut self, key: K, value: V) {
        self.insert(key, value);
    }

    fn unbind(&mut self, key: &K) {
        self.remove(key);
    }
}

/// A lens that looks at the value bound to `key`.
///
/// `set(m, Some(v))` binds the key (added if absent, replaced if present) and
/// `set(m, None)` removes it.
pub fn key_lens<M>(key: M::Key) -> Lens<M, Option<M::Value>>
where
    M: KeyedMap + 'static,
    M::Key: Clone + Send + Sync + 'static,
    M::Value: Clone + 'static,
{
    let lookup_key = key.clone();
    Lens::new(
        move |map: &M| map.lookup(&lookup_key).cloned(),
        move |map: &M, value: Option<M::Value>| {
            let mut next = map.clone();
            match value {
                Some(value) => next.bind(key.clone(), value),
                None => next.unbind(&key),
            }
            next
        },
    )
}

/// Structures that expose an identifier field.
pub trait HasId {
    type Id: Clone;

    fn id(&self) -> &Self::Id;
    fn id_mut(&mut self) -> &mut Self::Id;
}

/// Attribute lens fixed to the identifier field of any [`HasId`] structure.
pub fn id_lens<T>() -> Lens<T, T::Id>
where
    T: HasId + Clone + 'static,
    T::Id: 'static,
{
    Lens::from_field(T::id, T::id_mut)
}

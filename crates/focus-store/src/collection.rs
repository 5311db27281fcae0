use std::rc::Rc;
use std::slice;
use std::sync::Arc;

use smallvec::SmallVec;

/// Pointer identity, used by [`Collection::remove`].
pub trait Identity {
    fn same(&self, other: &Self) -> bool;
}

impl<T: ?Sized> Identity for Rc<T> {
    fn same(&self, other: &Self) -> bool {
        Rc::ptr_eq(self, other)
    }
}

impl<T: ?Sized> Identity for Arc<T> {
    fn same(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }
}

/// Immutable, insertion-ordered sequence.
///
/// `append` and `remove` return a new collection and leave `self` untouched, so a
/// clone taken before iterating is a stable snapshot: entries added or removed
/// while iterating are not seen by that iteration.
pub struct Collection<T> {
    items: Arc<SmallVec<[T; 4]>>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
        }
    }
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Collection<T> {
    pub fn new() -> Self {
        Self {
            items: Arc::new(SmallVec::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Calls `f` once per entry, in insertion order, over the entries present now.
    pub fn for_each(&self, mut f: impl FnMut(&T)) {
        let snapshot = self.clone();
        for item in snapshot.iter() {
            f(item);
        }
    }
}

impl<T: Clone> Collection<T> {
    pub fn append(&self, item: T) -> Self {
        let mut items = (*self.items).clone();
        items.push(item);
        Self {
            items: Arc::new(items),
        }
    }

    /// Removes the first entry identical to `item`. Without a match, the result has
    /// the same entries as `self`.
    pub fn remove(&self, item: &T) -> Self
    where
        T: Identity,
    {
        match self.items.iter().position(|entry| entry.same(item)) {
            Some(index) => {
                let mut items = (*self.items).clone();
                items.remove(index);
                Self {
                    items: Arc::new(items),
                }
            }
            None => self.clone(),
        }
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_preserves_order_and_source() {
        let empty = Collection::<Rc<str>>::new();
        let one = empty.append("a".into());
        let two = one.append("b".into());

        assert!(empty.is_empty());
        assert_eq!(one.len(), 1);
        let items: Vec<&str> = two.iter().map(|s| &**s).collect();
        assert_eq!(items, ["a", "b"]);
    }

    #[test]
    fn remove_matches_identity_not_equality() {
        let first: Rc<str> = "same".into();
        let second: Rc<str> = "same".into();
        let c = Collection::new().append(first.clone()).append(second.clone());

        let removed = c.remove(&second);
        assert_eq!(removed.len(), 1);
        assert!(removed.iter().next().is_some_and(|s| s.same(&first)));
    }

    #[test]
    fn remove_takes_only_the_first_duplicate() {
        let item: Rc<u8> = Rc::new(1);
        let c = Collection::new().append(item.clone()).append(item.clone());
        assert_eq!(c.remove(&item).len(), 1);
        assert_eq!(c.remove(&item).remove(&item).len(), 0);
    }

    #[test]
    fn remove_without_match_keeps_entries() {
        let c = Collection::new().append(Rc::new(1)).append(Rc::new(2));
        let stranger = Rc::new(1);
        let same = c.remove(&stranger);
        assert_eq!(same.iter().map(|n| **n).collect::<Vec<_>>(), [1, 2]);
    }

    #[test]
    fn for_each_iterates_a_snapshot() {
        let c = Collection::new().append(Rc::new(1)).append(Rc::new(2));
        let mut current = c.clone();
        let mut seen = Vec::new();
        c.for_each(|n| {
            seen.push(**n);
            current = current.append(Rc::new(99));
        });
        assert_eq!(seen, [1, 2]);
        assert_eq!(current.len(), 4);
    }
}

use std::iter::FusedIterator;

use crate::slot::Slot;

/// Iterator over live entries of a `ProbeMap`, in bucket order.
///
/// Holds its own cursor and a shared borrow of the bucket array, so the map
/// cannot be mutated while the iterator is alive. Once every bucket up to the
/// last one has been examined the iterator stays exhausted; a new traversal
/// needs a fresh `iter()`.
#[derive(Debug, Clone)]
pub struct Iter<'a, V> {
    buckets: &'a [Slot<V>],
    current_index: usize,
    remaining: usize,
}

impl<'a, V> Iter<'a, V> {
    pub(crate) fn new(buckets: &'a [Slot<V>], len: usize) -> Self {
        Self {
            buckets,
            current_index: 0,
            remaining: len,
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        while self.current_index < self.buckets.len() {
            let slot = &self.buckets[self.current_index];
            self.current_index += 1;

            if let Some(entry) = slot.entry() {
                self.remaining -= 1;
                return Some(entry);
            }
        }

        // live count and buckets disagree; never yield past the end
        self.remaining = 0;
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<V> FusedIterator for Iter<'_, V> {}

/// Iterator over keys of a `ProbeMap`
#[derive(Debug, Clone)]
pub struct Keys<'a, V> {
    inner: Iter<'a, V>,
}

impl<'a, V> Keys<'a, V> {
    pub(crate) fn new(inner: Iter<'a, V>) -> Self {
        Self { inner }
    }
}

impl<'a, V> Iterator for Keys<'a, V> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for Keys<'_, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<V> FusedIterator for Keys<'_, V> {}

/// Iterator over values of a `ProbeMap`
#[derive(Debug, Clone)]
pub struct Values<'a, V> {
    inner: Iter<'a, V>,
}

impl<'a, V> Values<'a, V> {
    pub(crate) fn new(inner: Iter<'a, V>) -> Self {
        Self { inner }
    }
}

impl<'a, V> Iterator for Values<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for Values<'_, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<V> FusedIterator for Values<'_, V> {}

/// Owning iterator over the live entries of a `ProbeMap`, in bucket order
#[derive(Debug)]
pub struct IntoIter<V> {
    buckets: std::vec::IntoIter<Slot<V>>,
    remaining: usize,
}

impl<V> IntoIter<V> {
    pub(crate) fn new(buckets: Vec<Slot<V>>, len: usize) -> Self {
        Self {
            buckets: buckets.into_iter(),
            remaining: len,
        }
    }
}

impl<V> Iterator for IntoIter<V> {
    type Item = (String, V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        for slot in self.buckets.by_ref() {
            if let Some(entry) = slot.into_entry() {
                self.remaining -= 1;
                return Some(entry);
            }
        }

        self.remaining = 0;
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for IntoIter<V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<V> FusedIterator for IntoIter<V> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Slot<u32>> {
        vec![
            Slot::Empty,
            Slot::Occupied("a".into(), 1),
            Slot::Tombstone("x".into()),
            Slot::Empty,
            Slot::Occupied("b".into(), 2),
            Slot::Tombstone("y".into()),
            Slot::Occupied("c".into(), 3),
        ]
    }

    #[test]
    fn test_iter_skips_empty_and_tombstones() {
        let buckets = sample();
        let items: Vec<_> = Iter::new(&buckets, 3).collect();
        assert_eq!(items, vec![("a", &1), ("b", &2), ("c", &3)]);
    }

    #[test]
    fn test_iter_reaches_last_bucket() {
        let buckets = vec![
            Slot::Tombstone("x".into()),
            Slot::Empty,
            Slot::Empty,
            Slot::Occupied("last".into(), 9),
        ];
        let mut iter = Iter::new(&buckets, 1);
        assert_eq!(iter.next(), Some(("last", &9)));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_iter_exact_size() {
        let buckets = sample();
        let mut iter = Iter::new(&buckets, 3);
        assert_eq!(iter.len(), 3);
        iter.next();
        assert_eq!(iter.len(), 2);
        assert_eq!(iter.size_hint(), (2, Some(2)));
    }

    #[test]
    fn test_keys_and_values() {
        let buckets = sample();
        let keys: Vec<_> = Keys::new(Iter::new(&buckets, 3)).collect();
        let values: Vec<_> = Values::new(Iter::new(&buckets, 3)).copied().collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
        assert_eq!(values, vec![1, 2, 3]);
    }

    #[test]
    fn test_into_iter() {
        let items: Vec<_> = IntoIter::new(sample(), 3).collect();
        assert_eq!(
            items,
            vec![("a".to_string(), 1), ("b".to_string(), 2), ("c".to_string(), 3)]
        );
    }

    #[test]
    fn test_empty_buckets() {
        let buckets: Vec<Slot<u32>> = vec![Slot::Empty; 5];
        assert_eq!(Iter::new(&buckets, 0).next(), None);
    }
}

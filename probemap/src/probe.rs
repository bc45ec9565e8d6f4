// Quadratic probe sequence over a prime-sized bucket array.
//
// Yields `(home + i * i) % capacity` for `i = 0, 1, 2, ...`, each index
// derived from `home` and `i` alone. For a prime capacity the first
// `(capacity + 1) / 2` indices are distinct and later ones repeat them, so
// the sequence stops after `capacity` steps without missing a reachable slot.
#[derive(Debug, Clone)]
pub(crate) struct ProbeSeq {
    home: usize,
    capacity: usize,
    i: usize,
}

impl ProbeSeq {
    pub(crate) fn new(hash: u64, capacity: usize) -> Self {
        debug_assert!(capacity > 0);
        let home = (hash % capacity as u64) as usize;
        Self {
            home,
            capacity,
            i: 0,
        }
    }
}

impl Iterator for ProbeSeq {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.i >= self.capacity {
            return None;
        }
        let offset = (self.i * self.i) % self.capacity;
        self.i += 1;
        Some((self.home + offset) % self.capacity)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.capacity - self.i;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ProbeSeq {}

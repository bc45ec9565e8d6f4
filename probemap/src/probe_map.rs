use std::fmt;

use log::{debug, trace};

use crate::capacity::{
    DEFAULT_CAPACITY, MIN_CAPACITY, grown_capacity, min_capacity_for, needs_growth, prime_at_least,
};
use crate::error::{ProbeMapError, Result};
use crate::hash::{FxKeyHasher, KeyHasher};
use crate::iter::{IntoIter, Iter, Keys, Values};
use crate::probe::ProbeSeq;
use crate::slot::Slot;

/// Where an insertion for a given key lands
enum InsertSlot {
    /// the key is live here, overwrite the value
    Live(usize),
    /// the key was removed from here, revive it in place
    Buried(usize),
    /// first empty slot on the probe path
    Vacant(usize),
    /// every slot on the probe path holds another key or a tombstone
    Saturated,
}

/// This is an open address hash map with string keys,
/// resolving collisions by quadratic probing over a prime number of buckets.
/// Removed entries leave a tombstone behind so probe paths that ran through
/// them keep working; tombstones are dropped whenever the table is rebuilt.
/// The table grows before an insertion could take the load factor to 0.5,
/// which together with the prime capacity guarantees a free slot on every
/// probe path.
/// The hash function is supplied by the caller through `KeyHasher`.
#[derive(Clone)]
pub struct ProbeMap<V, H = FxKeyHasher> {
    buckets: Vec<Slot<V>>,
    capacity: usize,
    size: usize,
    hasher: H,
}

impl<V, H: KeyHasher + Default> Default for ProbeMap<V, H> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, H::default())
    }
}

impl<V> ProbeMap<V, FxKeyHasher> {
    /// Creates a map with the default hasher and at least `capacity` buckets
    pub fn with_capacity(capacity: usize) -> Self {
        Self::new(capacity, FxKeyHasher)
    }
}

impl<V, H: KeyHasher> ProbeMap<V, H> {
    /// Creates a new map using `hasher` for keys.
    ///
    /// The bucket count is `initial_capacity` rounded up to a prime, and never
    /// less than `MIN_CAPACITY`.
    pub fn new(initial_capacity: usize, hasher: H) -> Self {
        let capacity = prime_at_least(initial_capacity.max(MIN_CAPACITY));
        Self {
            buckets: empty_buckets(capacity),
            capacity,
            size: 0,
            hasher,
        }
    }

    /// Returns the number of key-value pairs in the map
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the map contains no elements
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of buckets, always a prime
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the load factor of the map (size / capacity)
    pub fn load_factor(&self) -> f64 {
        self.size as f64 / self.capacity as f64
    }

    /// Number of buckets that have never held an entry since the last rebuild.
    /// Tombstones are not counted.
    pub fn empty_slot_count(&self) -> usize {
        self.buckets.iter().filter(|slot| slot.is_empty()).count()
    }

    pub fn tombstone_count(&self) -> usize {
        self.buckets.iter().filter(|slot| slot.is_tombstone()).count()
    }

    /// Read-only view of the bucket array
    pub fn buckets(&self) -> &[Slot<V>] {
        &self.buckets
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Walks the probe path for a live `key`.
    /// Tombstones never stop the walk, whatever key they carry; the first
    /// empty slot does.
    fn find_slot(&self, key: &str) -> Option<usize> {
        let hash = self.hasher.hash_key(key);

        for index in ProbeSeq::new(hash, self.capacity) {
            match &self.buckets[index] {
                Slot::Empty => return None,
                Slot::Occupied(stored, _) if stored == key => return Some(index),
                _ => {}
            }
        }

        None
    }

    fn find_insert_slot(&self, key: &str) -> InsertSlot {
        let hash = self.hasher.hash_key(key);

        for index in ProbeSeq::new(hash, self.capacity) {
            match &self.buckets[index] {
                Slot::Empty => return InsertSlot::Vacant(index),
                Slot::Occupied(stored, _) if stored == key => return InsertSlot::Live(index),
                Slot::Tombstone(stored) if stored == key => return InsertSlot::Buried(index),
                _ => {}
            }
        }

        InsertSlot::Saturated
    }

    /// Insert a key-value pair into the map, returning the previous value if it existed.
    ///
    /// The growth check runs first on every call, updates included.
    pub fn put(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        if needs_growth(self.size, self.capacity) {
            trace!(
                "growth trigger: {} live entries in {} buckets",
                self.size, self.capacity
            );
            self.rebuild(grown_capacity(self.capacity));
        }

        self.insert_unchecked(key.into(), value)
    }

    /// Insertion without the growth check; also used to refill the table on rebuild.
    fn insert_unchecked(&mut self, key: String, value: V) -> Option<V> {
        loop {
            match self.find_insert_slot(&key) {
                InsertSlot::Live(index) => {
                    return self.buckets[index]
                        .value_mut()
                        .map(|old| std::mem::replace(old, value));
                }
                InsertSlot::Buried(index) => {
                    self.buckets[index].revive(value);
                    self.size += 1;
                    return None;
                }
                InsertSlot::Vacant(index) => {
                    self.buckets[index] = Slot::Occupied(key, value);
                    self.size += 1;
                    return None;
                }
                InsertSlot::Saturated => {
                    // only tombstones can use up every slot on a probe path,
                    // a rebuild at the same size clears them
                    let tombstones = self.tombstone_count();
                    debug!(
                        "probe path saturated with {} tombstones in {} buckets, rebuilding",
                        tombstones, self.capacity
                    );
                    let target = if tombstones > 0 {
                        self.capacity
                    } else {
                        grown_capacity(self.capacity)
                    };
                    self.rebuild(target);
                }
            }
        }
    }

    /// Get a value by key
    pub fn get(&self, key: &str) -> Option<&V> {
        let index = self.find_slot(key)?;
        self.buckets[index].entry().map(|(_, value)| value)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let index = self.find_slot(key)?;
        self.buckets[index].value_mut()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.find_slot(key).is_some()
    }

    /// Removes `key`, leaving a tombstone in its slot, and returns its value.
    /// Removing an absent key does nothing.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let index = self.find_slot(key)?;
        let value = self.buckets[index].bury()?;
        self.size -= 1;
        Some(value)
    }

    /// Empties every bucket, keeping the current capacity
    pub fn clear(&mut self) {
        self.buckets.fill_with(Slot::default);
        self.size = 0;
    }

    /// Rebuilds the table with at least `new_capacity` buckets.
    ///
    /// Requests below `len()` are ignored. See `try_resize`.
    pub fn resize(&mut self, new_capacity: usize) {
        // rejection is already logged
        let _ = self.try_resize(new_capacity);
    }

    /// Rebuilds the table with at least `new_capacity` buckets, dropping all tombstones.
    ///
    /// The bucket count is raised if needed so the live entries stay below the
    /// maximum load factor, then rounded up to a prime.
    /// Fails, leaving the map untouched, if `new_capacity < len()`.
    pub fn try_resize(&mut self, new_capacity: usize) -> Result<()> {
        if new_capacity < self.size {
            debug!(
                "rejected resize to {} buckets with {} live entries",
                new_capacity, self.size
            );
            return Err(ProbeMapError::CapacityBelowLen {
                requested: new_capacity,
                len: self.size,
            });
        }

        self.rebuild(new_capacity);
        Ok(())
    }

    /// Rebuilds at the smallest capacity that keeps the load below the maximum
    pub fn shrink_to_fit(&mut self) {
        self.rebuild(min_capacity_for(self.size));
    }

    fn rebuild(&mut self, requested: usize) {
        let new_capacity = prime_at_least(
            requested
                .max(min_capacity_for(self.size))
                .max(MIN_CAPACITY),
        );
        let old_buckets = std::mem::replace(&mut self.buckets, empty_buckets(new_capacity));

        debug!(
            "resizing from {} to {} buckets ({} live entries, {} tombstones dropped)",
            self.capacity,
            new_capacity,
            self.size,
            old_buckets.iter().filter(|slot| slot.is_tombstone()).count()
        );

        self.capacity = new_capacity;
        self.size = 0;

        // the fresh table has no tombstones and stays below load 0.5,
        // so none of these insertions can saturate a probe path
        for (key, value) in old_buckets.into_iter().filter_map(Slot::into_entry) {
            self.insert_unchecked(key, value);
        }
    }

    /// Live entries in ascending bucket order
    pub fn entries(&self) -> Vec<(&str, &V)> {
        self.iter().collect()
    }

    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(&self.buckets, self.size)
    }

    pub fn keys(&self) -> Keys<'_, V> {
        Keys::new(self.iter())
    }

    pub fn values(&self) -> Values<'_, V> {
        Values::new(self.iter())
    }
}

fn empty_buckets<V>(capacity: usize) -> Vec<Slot<V>> {
    std::iter::repeat_with(Slot::default).take(capacity).collect()
}

impl<'a, V, H: KeyHasher> IntoIterator for &'a ProbeMap<V, H> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V, H> IntoIterator for ProbeMap<V, H> {
    type Item = (String, V);
    type IntoIter = IntoIter<V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.buckets, self.size)
    }
}

impl<K: Into<String>, V, H: KeyHasher> Extend<(K, V)> for ProbeMap<V, H> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for ProbeMap<V, FxKeyHasher> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

/// One `index: slot` line per bucket, tombstones and empty slots included
impl<V: fmt::Display, H> fmt::Display for ProbeMap<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, slot) in self.buckets.iter().enumerate() {
            writeln!(f, "{index}: {slot}")?;
        }
        Ok(())
    }
}

impl<V: fmt::Debug, H> fmt::Debug for ProbeMap<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.buckets.iter().filter_map(Slot::entry))
            .finish()
    }
}

use std::fmt;

/// State of a single bucket in a `ProbeMap`.
///
/// A `Tombstone` keeps the key of the removed entry so that probe sequences
/// which passed over it stay resolvable, and so the same key can be revived
/// in place if it is inserted again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot<V> {
    Empty,
    Tombstone(String),
    Occupied(String, V),
}

impl<V> Default for Slot<V> {
    fn default() -> Self {
        Slot::Empty
    }
}

impl<V> Slot<V> {
    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    pub fn is_occupied(&self) -> bool {
        matches!(self, Slot::Occupied(..))
    }

    pub fn is_tombstone(&self) -> bool {
        matches!(self, Slot::Tombstone(_))
    }

    /// The key held by this slot, live or tombstoned
    pub fn key(&self) -> Option<&str> {
        match self {
            Slot::Empty => None,
            Slot::Tombstone(key) | Slot::Occupied(key, _) => Some(key.as_str()),
        }
    }

    /// Key and value of a live entry
    pub fn entry(&self) -> Option<(&str, &V)> {
        match self {
            Slot::Occupied(key, value) => Some((key.as_str(), value)),
            _ => None,
        }
    }

    pub(crate) fn value_mut(&mut self) -> Option<&mut V> {
        match self {
            Slot::Occupied(_, value) => Some(value),
            _ => None,
        }
    }

    /// Turns a live entry into a tombstone, handing back its value.
    /// Any other state is left untouched.
    pub(crate) fn bury(&mut self) -> Option<V> {
        match std::mem::take(self) {
            Slot::Occupied(key, value) => {
                *self = Slot::Tombstone(key);
                Some(value)
            }
            other => {
                *self = other;
                None
            }
        }
    }

    /// Brings a tombstone back to life with a new value, keeping the stored key.
    pub(crate) fn revive(&mut self, value: V) {
        if let Slot::Tombstone(key) = std::mem::take(self) {
            *self = Slot::Occupied(key, value);
        }
    }

    pub(crate) fn into_entry(self) -> Option<(String, V)> {
        match self {
            Slot::Occupied(key, value) => Some((key, value)),
            _ => None,
        }
    }
}

impl<V: fmt::Display> fmt::Display for Slot<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Empty => write!(f, "None"),
            Slot::Tombstone(key) => write!(f, "K: {key} TS"),
            Slot::Occupied(key, value) => write!(f, "K: {key} V: {value}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        let slot: Slot<u32> = Slot::default();
        assert!(slot.is_empty());
        assert!(!slot.is_occupied());
        assert!(!slot.is_tombstone());
        assert_eq!(slot.key(), None);
    }

    #[test]
    fn test_bury_and_revive() {
        let mut slot = Slot::Occupied("key".to_string(), 10);
        assert_eq!(slot.entry(), Some(("key", &10)));

        assert_eq!(slot.bury(), Some(10));
        assert_eq!(slot, Slot::Tombstone("key".to_string()));
        assert_eq!(slot.key(), Some("key"));
        assert_eq!(slot.entry(), None);

        // burying a tombstone again is a no-op
        assert_eq!(slot.bury(), None);
        assert!(slot.is_tombstone());

        slot.revive(20);
        assert_eq!(slot, Slot::Occupied("key".to_string(), 20));
    }

    #[test]
    fn test_bury_empty_is_noop() {
        let mut slot: Slot<u32> = Slot::Empty;
        assert_eq!(slot.bury(), None);
        assert!(slot.is_empty());
    }

    #[test]
    fn test_display() {
        assert_eq!(Slot::<u32>::Empty.to_string(), "None");
        assert_eq!(Slot::<u32>::Tombstone("a".into()).to_string(), "K: a TS");
        assert_eq!(Slot::Occupied("a".into(), 7).to_string(), "K: a V: 7");
    }
}

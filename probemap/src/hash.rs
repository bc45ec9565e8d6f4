use std::hash::BuildHasher;

use rustc_hash::FxBuildHasher;

/// Maps a key to a bucket-independent hash value.
///
/// The map never inspects the hasher beyond calling it; it must be
/// deterministic for the map to find what it stored. Any `Fn(&str) -> u64`
/// is a `KeyHasher`.
pub trait KeyHasher {
    fn hash_key(&self, key: &str) -> u64;
}

impl<F> KeyHasher for F
where
    F: Fn(&str) -> u64,
{
    fn hash_key(&self, key: &str) -> u64 {
        self(key)
    }
}

/// Default hasher, backed by `rustc_hash`
#[derive(Debug, Clone, Copy, Default)]
pub struct FxKeyHasher;

impl KeyHasher for FxKeyHasher {
    fn hash_key(&self, key: &str) -> u64 {
        FxBuildHasher.hash_one(key)
    }
}

/// Sum of the key's code points.
///
/// Anagrams collide, which makes it handy for exercising probe paths.
pub fn char_sum(key: &str) -> u64 {
    key.chars().map(|c| c as u64).sum()
}

/// Sum of code points weighted by their 1-based position
pub fn weighted_char_sum(key: &str) -> u64 {
    key.chars()
        .zip(1u64..)
        .map(|(c, weight)| weight.wrapping_mul(c as u64))
        .fold(0u64, u64::wrapping_add)
}

//! Capacity policy for `ProbeMap`: bucket counts are always prime and the
//! table grows before an insertion could take the load factor to 0.5.

/// Smallest bucket count a map is ever built with
pub const MIN_CAPACITY: usize = 2;

/// Bucket count used by `ProbeMap::default`
pub const DEFAULT_CAPACITY: usize = 11;

/// Load factor the table is never allowed to reach after an insertion
pub const MAX_LOAD_FACTOR: f64 = 0.5;

/// Trial division over odd factors.
pub fn is_prime(n: usize) -> bool {
    if n == 2 || n == 3 {
        return true;
    }

    if n < 2 || n % 2 == 0 {
        return false;
    }

    let mut factor = 3;
    while factor * factor <= n {
        if n % factor == 0 {
            return false;
        }
        factor += 2;
    }

    true
}

/// First prime reached by bumping `n` to odd and stepping by 2.
///
/// Even inputs never map to themselves, so `next_prime(2) == 3`.
pub fn next_prime(n: usize) -> usize {
    let mut candidate = if n % 2 == 0 { n + 1 } else { n };

    while !is_prime(candidate) {
        candidate += 2;
    }

    candidate
}

/// `n` itself when prime, otherwise the next prime above it
pub fn prime_at_least(n: usize) -> usize {
    if is_prime(n) { n } else { next_prime(n) }
}

/// Fewest buckets that hold `len` entries below `MAX_LOAD_FACTOR`
pub fn min_capacity_for(len: usize) -> usize {
    len.saturating_mul(2).saturating_add(1)
}

/// Growth trigger, checked before every insertion.
///
/// Fires when one more entry would take the load to 0.5 or above, so a new
/// key can always be placed without crossing it. Integer arithmetic keeps the
/// comparison exact: `(len + 1) / capacity >= 0.5` iff `2 * (len + 1) >= capacity`.
pub fn needs_growth(len: usize, capacity: usize) -> bool {
    len.saturating_add(1).saturating_mul(2) >= capacity
}

/// Bucket count requested on growth, before prime rounding
pub fn grown_capacity(capacity: usize) -> usize {
    capacity.saturating_mul(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_is_prime_small_values() {
        let primes: Vec<usize> = (0..40).filter(|&n| is_prime(n)).collect();
        assert_eq!(primes, vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37]);
    }

    #[test]
    fn test_is_prime_squares_of_primes() {
        assert!(!is_prime(9));
        assert!(!is_prime(25));
        assert!(!is_prime(49));
        assert!(!is_prime(121));
        assert!(!is_prime(169));
    }

    #[test]
    fn test_next_prime() {
        assert_eq!(next_prime(0), 3);
        assert_eq!(next_prime(1), 3);
        assert_eq!(next_prime(2), 3);
        assert_eq!(next_prime(7), 7);
        assert_eq!(next_prime(8), 11);
        assert_eq!(next_prime(22), 23);
        assert_eq!(next_prime(24), 29);
        assert_eq!(next_prime(106), 107);
    }

    #[test]
    fn test_prime_at_least_keeps_primes() {
        assert_eq!(prime_at_least(2), 2);
        assert_eq!(prime_at_least(3), 3);
        assert_eq!(prime_at_least(4), 5);
        assert_eq!(prime_at_least(53), 53);
        assert_eq!(prime_at_least(100), 101);
    }

    #[test]
    fn test_needs_growth_threshold() {
        // capacity 11: the 6th insertion (len 5) must grow first
        assert!(!needs_growth(4, 11));
        assert!(needs_growth(5, 11));

        // capacity 7: three entries fit, the fourth grows
        assert!(!needs_growth(2, 7));
        assert!(needs_growth(3, 7));

        // capacity 2 cannot take a single entry below 0.5
        assert!(needs_growth(0, 2));
        assert!(!needs_growth(0, 3));
    }

    #[test]
    fn test_min_capacity_for() {
        assert_eq!(min_capacity_for(0), 1);
        assert_eq!(min_capacity_for(5), 11);
        assert!((5_f64 / min_capacity_for(5) as f64) < MAX_LOAD_FACTOR);
    }

    #[test]
    fn prime_at_least_is_prime_and_not_smaller() {
        proptest!(|(n in 0usize..100_000)| {
            let p = prime_at_least(n);
            prop_assert!(p >= n);
            prop_assert!(is_prime(p));
            prop_assert!((n..p).all(|m| !is_prime(m)));
        });
    }

    #[test]
    fn growth_target_leaves_room_for_one_more() {
        proptest!(|(capacity in MIN_CAPACITY..10_000usize)| {
            let capacity = prime_at_least(capacity);
            // largest len the invariant allows before the trigger fires
            let len = (capacity - 1) / 2;
            let grown = prime_at_least(grown_capacity(capacity));
            prop_assert!(!needs_growth(len, grown));
        });
    }
}

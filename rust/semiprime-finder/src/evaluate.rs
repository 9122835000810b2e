//! Derived statistics over a finished search.

use std::collections::BTreeMap;

use crate::sequence::SemiprimeMap;
use crate::sieve::Sieve;

/// Primes that are allowed without any factorization.
pub const SEED_ALLOWED: [u64; 2] = [2, 3];

/// Rank every recorded target as allowed or not.
///
/// 2 and 3 are allowed outright. Visiting targets in ascending order, a
/// target is allowed iff every factor of its recorded tuple has already been
/// marked allowed. Factors are always smaller than their target, so each
/// lookup sees a settled value.
pub fn allowed_map(semiprimes: &SemiprimeMap) -> BTreeMap<u64, bool> {
    let mut allowed: BTreeMap<u64, bool> = SEED_ALLOWED.iter().map(|&p| (p, true)).collect();
    for (target, sequence) in semiprimes.iter() {
        let is_allowed = sequence
            .factors()
            .iter()
            .all(|f| allowed.get(f).copied().unwrap_or(false));
        allowed.insert(target, is_allowed);
    }
    allowed
}

/// Primes in the sieve for which the search recorded no factorization.
pub fn missing_primes(sieve: &Sieve, semiprimes: &SemiprimeMap) -> Vec<u64> {
    sieve.primes().filter(|&p| !semiprimes.contains(p)).collect()
}

/// How often each prime appears as a factor across all records.
pub fn factor_occurrences(semiprimes: &SemiprimeMap) -> BTreeMap<u64, usize> {
    let mut counts = BTreeMap::new();
    for sequence in semiprimes.sequences() {
        for &factor in sequence.factors() {
            *counts.entry(factor).or_insert(0) += 1;
        }
    }
    counts
}

/// Histogram of the last decimal digit of every recorded factor.
pub fn last_digit_counts(semiprimes: &SemiprimeMap) -> [usize; 10] {
    let mut counts = [0usize; 10];
    for sequence in semiprimes.sequences() {
        for &factor in sequence.factors() {
            counts[(factor % 10) as usize] += 1;
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::SemiprimeFinder;
    use crate::sequence::{Sequence, Sign};

    #[test]
    fn test_allowed_seeds_and_chain() {
        let mut map = SemiprimeMap::new();
        map.insert(Sequence::new(Sign::Minus, vec![2, 3]).unwrap());
        map.insert(Sequence::new(Sign::Minus, vec![2, 3, 5]).unwrap());
        map.insert(Sequence::new(Sign::Minus, vec![2, 2, 2, 3, 3]).unwrap());
        map.insert(Sequence::new(Sign::Minus, vec![2, 2, 11]).unwrap());

        let allowed = allowed_map(&map);
        assert_eq!(allowed.get(&2), Some(&true));
        assert_eq!(allowed.get(&3), Some(&true));
        assert_eq!(allowed.get(&5), Some(&true));
        assert_eq!(allowed.get(&29), Some(&true), "5 is allowed before 29 is visited");
        assert_eq!(allowed.get(&71), Some(&true));
        assert_eq!(allowed.get(&43), Some(&false), "11 has no record");
    }

    #[test]
    fn test_allowed_map_on_search() {
        let finder = SemiprimeFinder::new(10).unwrap();
        let allowed = allowed_map(finder.semiprimes());
        // 3 = 2*2-1 is recomputed from factors of 2.
        assert_eq!(allowed.get(&3), Some(&true));
        assert_eq!(allowed.get(&5), Some(&true));
        assert_eq!(allowed.get(&7), Some(&true));
    }

    #[test]
    fn test_missing_primes() {
        let finder = SemiprimeFinder::new(10).unwrap();
        assert_eq!(missing_primes(finder.sieve(), finder.semiprimes()), vec![2]);
    }

    #[test]
    fn test_factor_occurrences_and_digits() {
        let mut map = SemiprimeMap::new();
        map.insert(Sequence::new(Sign::Minus, vec![2, 3]).unwrap());
        map.insert(Sequence::new(Sign::Minus, vec![2, 3, 5]).unwrap());
        map.insert(Sequence::new(Sign::Plus, vec![2, 11]).unwrap());

        let counts = factor_occurrences(&map);
        assert_eq!(counts.get(&2), Some(&3));
        assert_eq!(counts.get(&3), Some(&2));
        assert_eq!(counts.get(&5), Some(&1));
        assert_eq!(counts.get(&11), Some(&1));

        let digits = last_digit_counts(&map);
        assert_eq!(digits, [0, 1, 3, 2, 0, 1, 0, 0, 0, 0]);
    }
}

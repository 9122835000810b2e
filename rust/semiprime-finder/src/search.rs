//! Combination search: enumerate non-decreasing prime tuples whose product
//! stays within the limit and record the prime neighbours of each product.
//!
//! For every starting prime `p <= isqrt(N)` the driver tries tuple lengths
//! 2, 3, 4, ... until a length produces nothing. Within one recursion level
//! primes are tried in increasing order from the previous factor, and the
//! level stops at the first prime whose cheapest completion exceeds N.

use num_integer::Roots;
use serde::Serialize;

use crate::sequence::{Insertion, SemiprimeMap, Sequence, Sign};
use crate::sieve::{Sieve, SieveError};

/// Upper bound on the number of factors in a tuple whose product fits in `u64`.
const MAX_TUPLE_LEN: usize = 64;

/// Counters collected during one search run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Complete tuples whose product stayed within the limit.
    pub tuples_enumerated: u64,
    /// Records registered with sign +1.
    pub plus_hits: u64,
    /// Records registered with sign -1.
    pub minus_hits: u64,
    /// Records that overwrote a different factorization of the same target.
    pub replaced: u64,
    /// Records identical to one already stored. Each tuple is enumerated
    /// once, so a complete run always leaves this at zero; repeated
    /// `search_length` calls for the same start can raise it.
    pub duplicates: u64,
    /// Longest tuple enumerated.
    pub longest_tuple: usize,
}

/// Search state for a single limit. Borrows the sieve read-only.
pub struct CombinationSearch<'a> {
    sieve: &'a Sieve,
    limit: u64,
    results: SemiprimeMap,
    stats: SearchStats,
}

impl<'a> CombinationSearch<'a> {
    pub fn new(sieve: &'a Sieve) -> Self {
        CombinationSearch {
            sieve,
            limit: sieve.limit(),
            results: SemiprimeMap::new(),
            stats: SearchStats::default(),
        }
    }

    /// Run the outer driver over every admissible starting prime.
    pub fn run(&mut self) {
        let root = self.limit.sqrt();
        let mut start = self.sieve.next_prime(1);
        while let Some(p) = start.filter(|&p| p <= root) {
            let mut length = 2;
            while self.search_length(p, length) {
                length += 1;
            }
            log::trace!("Start prime {}: stopped at length {}", p, length);
            start = self.sieve.next_prime(p);
        }
        log::debug!(
            "Search up to {}: {} tuples, {} targets ({} replaced)",
            self.limit,
            self.stats.tuples_enumerated,
            self.results.len(),
            self.stats.replaced
        );
    }

    /// Enumerate every tuple of exactly `length` primes whose smallest factor
    /// is `start`.
    ///
    /// Returns true iff at least one such tuple had a product within the
    /// limit. A false return means no longer tuple starting at `start` can
    /// fit either. Lengths below 2 and non-prime starts never produce a
    /// record and return false.
    pub fn search_length(&mut self, start: u64, length: usize) -> bool {
        if length < 2 || !self.sieve.is_prime(start) {
            return false;
        }
        // 2^64 exceeds any limit, so no tuple holds more than 63 factors.
        let mut history = Vec::with_capacity(length.min(MAX_TUPLE_LEN));
        history.push(start);
        self.extend(&mut history, start, start, length - 1)
    }

    /// Append `remaining` more factors, each at least `min_factor`, to the
    /// tuple in `history` whose product is `product`.
    fn extend(&mut self, history: &mut Vec<u64>, product: u64, min_factor: u64, remaining: usize) -> bool {
        if remaining == 0 {
            self.register(product, history);
            return true;
        }

        let mut produced_any = false;
        let mut factor = Some(min_factor);
        while let Some(p) = factor {
            let next = match product.checked_mul(p) {
                Some(next) if next <= self.limit => next,
                _ => break,
            };
            history.push(p);
            let produced = self.extend(history, next, p, remaining - 1);
            history.pop();
            // The cheapest completion with this factor already overflowed;
            // every larger factor will too.
            if !produced {
                break;
            }
            produced_any = true;
            factor = self.sieve.next_prime(p);
        }
        produced_any
    }

    /// Test both neighbours of `product` and record the prime ones.
    fn register(&mut self, product: u64, factors: &[u64]) {
        self.stats.tuples_enumerated += 1;
        self.stats.longest_tuple = self.stats.longest_tuple.max(factors.len());

        for sign in [Sign::Plus, Sign::Minus] {
            let target = match sign.apply(product) {
                Some(t) if t <= self.limit && self.sieve.is_prime(t) => t,
                _ => continue,
            };
            match sign {
                Sign::Plus => self.stats.plus_hits += 1,
                Sign::Minus => self.stats.minus_hits += 1,
            }
            match self.results.insert(Sequence::from_search(sign, factors.to_vec(), target)) {
                Insertion::New => {}
                Insertion::Replaced(_) => self.stats.replaced += 1,
                Insertion::Duplicate => self.stats.duplicates += 1,
            }
        }
    }

    pub fn results(&self) -> &SemiprimeMap {
        &self.results
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    pub fn into_results(self) -> (SemiprimeMap, SearchStats) {
        (self.results, self.stats)
    }
}

/// Owns the sieve and the results of one complete run.
#[derive(Debug, Clone)]
pub struct SemiprimeFinder {
    sieve: Sieve,
    semiprimes: SemiprimeMap,
    stats: SearchStats,
}

impl SemiprimeFinder {
    /// Build a fresh sieve for `limit` and run the search to completion.
    pub fn new(limit: u64) -> Result<Self, SieveError> {
        let sieve = Sieve::new(limit)?;
        let (semiprimes, stats) = {
            let mut search = CombinationSearch::new(&sieve);
            search.run();
            search.into_results()
        };
        Ok(SemiprimeFinder {
            sieve,
            semiprimes,
            stats,
        })
    }

    pub fn limit(&self) -> u64 {
        self.sieve.limit()
    }

    pub fn sieve(&self) -> &Sieve {
        &self.sieve
    }

    pub fn semiprimes(&self) -> &SemiprimeMap {
        &self.semiprimes
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    pub fn into_semiprimes(self) -> SemiprimeMap {
        self.semiprimes
    }
}

/// Find every prime target up to `limit` with its recorded factorization.
pub fn find_semiprimes(limit: u64) -> Result<SemiprimeMap, SieveError> {
    Ok(SemiprimeFinder::new(limit)?.into_semiprimes())
}

/// Run the search against an existing sieve.
pub fn find_semiprimes_in(sieve: &Sieve) -> SemiprimeMap {
    let mut search = CombinationSearch::new(sieve);
    search.run();
    search.into_results().0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(sign: Sign, factors: &[u64]) -> Sequence {
        Sequence::new(sign, factors.to_vec()).unwrap()
    }

    #[test]
    fn test_limit_ten() {
        // Tuples within 10: [2,2]=4, [2,3]=6, [2,5]=10, [2,2,2]=8, [3,3]=9.
        let map = find_semiprimes(10).unwrap();
        assert_eq!(map.targets().collect::<Vec<_>>(), vec![3, 5, 7]);
        assert_eq!(map.get(3), Some(&seq(Sign::Minus, &[2, 2])));
        // 5 = 2*2+1 is overwritten by the later 5 = 2*3-1.
        assert_eq!(map.get(5), Some(&seq(Sign::Minus, &[2, 3])));
        // 7 = 2*3+1 is overwritten by the later 7 = 2*2*2-1.
        assert_eq!(map.get(7), Some(&seq(Sign::Minus, &[2, 2, 2])));
        // 11 = 2*5+1 is prime but lies above the limit.
        assert!(!map.contains(11));
    }

    #[test]
    fn test_limit_six() {
        let map = find_semiprimes(6).unwrap();
        assert_eq!(map.get(5), Some(&seq(Sign::Minus, &[2, 3])));
        assert!(!map.contains(7), "7 = 2*3+1 exceeds the limit");
        assert_eq!(map.get(3), Some(&seq(Sign::Minus, &[2, 2])));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_degenerate_limits_are_empty() {
        for limit in [0u64, 1, 2, 3] {
            assert!(find_semiprimes(limit).unwrap().is_empty(), "limit {}", limit);
        }
    }

    #[test]
    fn test_length_below_two_records_nothing() {
        let sieve = Sieve::new(100).unwrap();
        let mut search = CombinationSearch::new(&sieve);
        assert!(!search.search_length(2, 0));
        assert!(!search.search_length(2, 1));
        assert!(search.results().is_empty());
        assert_eq!(search.stats().tuples_enumerated, 0);
    }

    #[test]
    fn test_non_prime_start_records_nothing() {
        let sieve = Sieve::new(100).unwrap();
        let mut search = CombinationSearch::new(&sieve);
        for start in [0u64, 1, 4, 9, 100, 101] {
            assert!(!search.search_length(start, 2), "start {}", start);
            assert!(!search.search_length(start, 3), "start {}", start);
        }
        assert!(search.results().is_empty());
        assert_eq!(search.stats().tuples_enumerated, 0);
    }

    #[test]
    fn test_huge_length_returns_false() {
        let sieve = Sieve::new(100).unwrap();
        let mut search = CombinationSearch::new(&sieve);
        assert!(!search.search_length(2, usize::MAX));
        assert!(!search.search_length(2, 7), "2^7 = 128 exceeds 100");
        assert!(search.search_length(2, 6));
    }

    #[test]
    fn test_repeated_length_counts_duplicates() {
        let sieve = Sieve::new(10).unwrap();
        let mut search = CombinationSearch::new(&sieve);
        assert!(search.search_length(2, 2));
        assert_eq!(search.stats().duplicates, 0);
        let before = search.results().clone();
        assert!(search.search_length(2, 2));
        assert_eq!(search.results(), &before);
        // On the second pass 3 and 7 are identical; 5 flips to +[2,2] and
        // back to -[2,3].
        assert_eq!(search.stats().duplicates, 2);
    }

    #[test]
    fn test_start_above_root_produces_nothing() {
        // 11 * 11 = 121 > 100, so no pair can start at 11.
        let sieve = Sieve::new(100).unwrap();
        let mut search = CombinationSearch::new(&sieve);
        assert!(!search.search_length(11, 2));
        assert!(search.results().is_empty());
        // 7 * 7 = 49 fits; 7 * 7 * 7 does not.
        assert!(search.search_length(7, 2));
        assert!(!search.search_length(7, 3));
    }

    #[test]
    fn test_start_squared_equal_to_limit() {
        let sieve = Sieve::new(49).unwrap();
        let mut search = CombinationSearch::new(&sieve);
        assert!(search.search_length(7, 2));
        assert_eq!(search.stats().tuples_enumerated, 1, "only [7, 7] fits");
    }

    #[test]
    fn test_search_length_enumerates_non_decreasing_tuples() {
        let sieve = Sieve::new(30).unwrap();
        let mut search = CombinationSearch::new(&sieve);
        // Pairs starting at 3: [3,3]=9, [3,5]=15, [3,7]=21; [3,11]=33 overflows.
        assert!(search.search_length(3, 2));
        assert_eq!(search.stats().tuples_enumerated, 3);
        assert_eq!(search.stats().longest_tuple, 2);
    }

    #[test]
    fn test_driver_stops_at_first_empty_length() {
        // 2^6 = 64 <= 100 < 2^7, so the longest tuple is six factors of 2.
        let finder = SemiprimeFinder::new(100).unwrap();
        assert_eq!(finder.stats().longest_tuple, 6);
        // 2^6 - 1 = 63 is composite, 2^6 + 1 = 65 is composite.
        assert!(!finder.semiprimes().contains(63));
    }

    #[test]
    fn test_records_satisfy_invariants() {
        let finder = SemiprimeFinder::new(5000).unwrap();
        let sieve = finder.sieve();
        for (target, sequence) in finder.semiprimes().iter() {
            assert!(target <= 5000);
            assert!(sieve.is_prime(target), "{} is not prime", target);
            assert_eq!(sequence.target(), target);
            assert!(sequence.factor_count() >= 2);
            assert!(sequence.factors().windows(2).all(|w| w[0] <= w[1]));
            assert!(sequence.factors().iter().all(|&f| sieve.is_prime(f)));
        }
    }

    #[test]
    fn test_stats_count_hits() {
        let finder = SemiprimeFinder::new(10).unwrap();
        let stats = finder.stats();
        // 4: 3,5  6: 5,7  8: 7  9: none  10: none
        assert_eq!(stats.tuples_enumerated, 5);
        assert_eq!(stats.plus_hits, 2);
        assert_eq!(stats.minus_hits, 3);
        assert_eq!(stats.replaced, 2);
        assert_eq!(stats.duplicates, 0);
    }

    #[test]
    fn test_find_semiprimes_in_matches_owned_run() {
        let sieve = Sieve::new(2000).unwrap();
        assert_eq!(find_semiprimes_in(&sieve), find_semiprimes(2000).unwrap());
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(find_semiprimes(10_000).unwrap(), find_semiprimes(10_000).unwrap());
    }
}

//! Runs of consecutive primes that share their last decimal digit.

use std::collections::BTreeMap;

/// Shortest run worth reporting by default.
pub const MIN_CONSECUTIVE_ENDINGS: usize = 3;

/// Group maximal runs of consecutive primes with equal last digit.
///
/// Runs shorter than `min_run` are discarded; the rest are keyed by their
/// length, each bucket keeping runs in the order they were found.
pub fn consecutive_endings<I>(primes: I, min_run: usize) -> BTreeMap<usize, Vec<Vec<u64>>>
where
    I: IntoIterator<Item = u64>,
{
    let mut runs: BTreeMap<usize, Vec<Vec<u64>>> = BTreeMap::new();
    let mut current: Vec<u64> = Vec::new();

    for prime in primes {
        let same_digit = current.last().map_or(false, |last| last % 10 == prime % 10);
        if !same_digit {
            save_run(&mut current, min_run, &mut runs);
        }
        current.push(prime);
    }
    save_run(&mut current, min_run, &mut runs);
    runs
}

fn save_run(current: &mut Vec<u64>, min_run: usize, runs: &mut BTreeMap<usize, Vec<Vec<u64>>>) {
    let run = std::mem::take(current);
    if !run.is_empty() && run.len() >= min_run {
        runs.entry(run.len()).or_default().push(run);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sieve::Sieve;

    #[test]
    fn test_finds_run_of_three() {
        // 1627, 1637 and 1657 are consecutive primes ending in 7.
        let primes = vec![1621u64, 1627, 1637, 1657, 1663];
        let runs = consecutive_endings(primes, 3);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[&3], vec![vec![1627, 1637, 1657]]);
    }

    #[test]
    fn test_short_runs_dropped() {
        let runs = consecutive_endings(vec![139u64, 149, 151], 3);
        assert!(runs.is_empty());
        let runs = consecutive_endings(vec![139u64, 149, 151], 2);
        assert_eq!(runs[&2], vec![vec![139, 149]]);
    }

    #[test]
    fn test_run_at_end_is_kept() {
        let runs = consecutive_endings(vec![2u64, 3, 13, 23], 3);
        assert_eq!(runs[&3], vec![vec![3, 13, 23]]);
    }

    #[test]
    fn test_on_sieve() {
        let sieve = Sieve::new(2000).unwrap();
        let runs = consecutive_endings(sieve.primes(), MIN_CONSECUTIVE_ENDINGS);
        for (&len, bucket) in &runs {
            for run in bucket {
                assert_eq!(run.len(), len);
                let digit = run[0] % 10;
                assert!(run.iter().all(|p| p % 10 == digit));
            }
        }
        assert!(runs[&3].contains(&vec![1627, 1637, 1657]));
    }

    #[test]
    fn test_empty_input() {
        assert!(consecutive_endings(Vec::new(), 1).is_empty());
    }
}

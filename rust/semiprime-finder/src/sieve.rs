//! Sieve of Eratosthenes over a fixed range [0, limit].
//!
//! The sieve is built once per run and then only queried: `is_prime` is a
//! table lookup and `next_prime` walks forward over odd candidates.

use num_integer::Roots;

/// Largest limit accepted by [`Sieve::new`].
pub const MAX_LIMIT: u64 = u32::MAX as u64;

/// Errors raised when a sieve limit is not usable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SieveError {
    #[error("invalid sieve limit {0}: must not be negative")]
    Negative(i64),

    #[error("invalid sieve limit {0}: exceeds maximum of {}", MAX_LIMIT)]
    TooLarge(u64),
}

/// Precomputed primality table for every integer in [0, limit].
#[derive(Debug, Clone)]
pub struct Sieve {
    /// `composite[i]` is true iff `i` is not prime.
    composite: Vec<bool>,
    limit: u64,
}

/// Build a sieve from a signed limit, rejecting negative values.
pub fn build_sieve(limit: i64) -> Result<Sieve, SieveError> {
    let limit = u64::try_from(limit).map_err(|_| SieveError::Negative(limit))?;
    Sieve::new(limit)
}

impl Sieve {
    /// Sieve all integers up to and including `limit`.
    ///
    /// Limits of 0 and 1 produce a sieve containing no primes.
    pub fn new(limit: u64) -> Result<Self, SieveError> {
        if limit > MAX_LIMIT {
            return Err(SieveError::TooLarge(limit));
        }
        let size = usize::try_from(limit + 1).map_err(|_| SieveError::TooLarge(limit))?;

        let mut composite = vec![false; size];
        composite[0] = true;
        if size > 1 {
            composite[1] = true;
        }

        let root = limit.sqrt() as usize;
        if root >= 2 {
            strike_multiples(&mut composite, 2);
        }
        let mut i = 3usize;
        while i <= root {
            if !composite[i] {
                strike_multiples(&mut composite, i);
            }
            i += 2;
        }

        let sieve = Sieve { composite, limit };
        if log::log_enabled!(log::Level::Debug) {
            log::debug!("Sieved [0, {}]: {} primes", limit, sieve.prime_count());
        }
        Ok(sieve)
    }

    /// The highest integer covered by this sieve.
    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// True iff `0 < n <= limit` and `n` is prime.
    ///
    /// Values above the limit are reported as not prime rather than as an
    /// error; callers that care must keep `n` within range themselves.
    pub fn is_prime(&self, n: u64) -> bool {
        n > 0 && n <= self.limit && !self.composite[n as usize]
    }

    /// Smallest prime strictly greater than `start` and no larger than the
    /// limit, or `None` once the range is exhausted.
    pub fn next_prime(&self, start: u64) -> Option<u64> {
        if start < 2 {
            return if self.limit >= 2 { Some(2) } else { None };
        }
        if start >= self.limit {
            return None;
        }
        // First odd number above `start`.
        let mut candidate = if start % 2 == 0 { start + 1 } else { start + 2 };
        while candidate <= self.limit {
            if !self.composite[candidate as usize] {
                return Some(candidate);
            }
            candidate += 2;
        }
        None
    }

    /// All primes in the sieve, in ascending order.
    pub fn primes(&self) -> impl Iterator<Item = u64> + '_ {
        self.composite
            .iter()
            .enumerate()
            .filter(|(_, &c)| !c)
            .map(|(i, _)| i as u64)
    }

    pub fn prime_count(&self) -> usize {
        self.composite.iter().filter(|&&c| !c).count()
    }
}

/// Mark every multiple of the prime `p` from `p * p` upwards as composite.
/// Smaller multiples carry a smaller prime factor and are already marked.
fn strike_multiples(composite: &mut [bool], p: usize) {
    let mut multiple = p * p;
    while multiple < composite.len() {
        composite[multiple] = true;
        multiple += p;
    }
}

//! semiprime-finder: primes that neighbour a product of two or more primes.
//!
//! For a limit N, every non-decreasing tuple of primes whose product P stays
//! within N is enumerated once; P - 1 and P + 1 are then checked against a
//! sieve and recorded when prime and no larger than N. Within this crate such
//! a prime is called a "semiprime" for brevity, and P the "real semiprime".
//!
//! ```
//! use semiprime_finder::{find_semiprimes, Sign};
//!
//! let found = find_semiprimes(10).unwrap();
//! let five = found.get(5).unwrap();
//! assert_eq!(five.sign(), Sign::Minus);
//! assert_eq!(five.factors(), &[2, 3]);
//! ```

pub mod config;
pub mod endings;
pub mod evaluate;
pub mod report;
pub mod search;
pub mod sequence;
pub mod sieve;

pub use search::{find_semiprimes, find_semiprimes_in, CombinationSearch, SearchStats, SemiprimeFinder};
pub use sequence::{Insertion, SemiprimeMap, Sequence, SequenceError, Sign};
pub use sieve::{build_sieve, Sieve, SieveError, MAX_LIMIT};

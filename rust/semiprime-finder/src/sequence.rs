//! Result records: a prime target together with the factor tuple it neighbours.

use std::collections::btree_map::{self, BTreeMap};
use std::fmt;

use serde::Serialize;

/// Which side of the product the prime target lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "i8")]
pub enum Sign {
    /// target = product + 1
    Plus,
    /// target = product - 1
    Minus,
}

impl Sign {
    pub fn offset(self) -> i64 {
        match self {
            Sign::Plus => 1,
            Sign::Minus => -1,
        }
    }

    /// Apply the offset to `base`, or `None` if the result leaves `u64`.
    pub fn apply(self, base: u64) -> Option<u64> {
        match self {
            Sign::Plus => base.checked_add(1),
            Sign::Minus => base.checked_sub(1),
        }
    }
}

impl From<Sign> for i8 {
    fn from(sign: Sign) -> i8 {
        match sign {
            Sign::Plus => 1,
            Sign::Minus => -1,
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.offset())
    }
}

/// Reasons a factor tuple cannot form a [`Sequence`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SequenceError {
    #[error("a sequence needs at least two factors, got {0}")]
    TooFewFactors(usize),

    #[error("factor {0} is below 2")]
    FactorTooSmall(u64),

    #[error("factors must be non-decreasing: {0:?}")]
    NotNonDecreasing(Vec<u64>),

    #[error("target of {0:?} does not fit in u64")]
    Overflow(Vec<u64>),
}

/// A non-decreasing tuple of primes and the sign applied to their product.
///
/// Immutable once built; two sequences are equal when both sign and factors
/// match. The target is computed once, at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Sequence {
    sign: Sign,
    factors: Vec<u64>,
    #[serde(skip)]
    target: u64,
}

impl Sequence {
    /// Build a sequence, checking the tuple shape and that `product + sign`
    /// fits in `u64`. Primality of the factors is the caller's concern.
    pub fn new(sign: Sign, factors: Vec<u64>) -> Result<Self, SequenceError> {
        if factors.len() < 2 {
            return Err(SequenceError::TooFewFactors(factors.len()));
        }
        if let Some(&small) = factors.iter().find(|&&f| f < 2) {
            return Err(SequenceError::FactorTooSmall(small));
        }
        if !factors.windows(2).all(|w| w[0] <= w[1]) {
            return Err(SequenceError::NotNonDecreasing(factors));
        }
        let target = factors
            .iter()
            .try_fold(1u64, |acc, &f| acc.checked_mul(f))
            .and_then(|product| sign.apply(product));
        match target {
            Some(target) => Ok(Sequence { sign, factors, target }),
            None => Err(SequenceError::Overflow(factors)),
        }
    }

    /// Used by the search, whose tuples are valid and bounded by the limit.
    pub(crate) fn from_search(sign: Sign, factors: Vec<u64>, target: u64) -> Self {
        debug_assert_eq!(sign.apply(factors.iter().product()), Some(target));
        Sequence { sign, factors, target }
    }

    pub fn sign(&self) -> Sign {
        self.sign
    }

    pub fn factors(&self) -> &[u64] {
        &self.factors
    }

    pub fn factor_count(&self) -> usize {
        self.factors.len()
    }

    /// Product of all factors (the "real semiprime").
    pub fn product(&self) -> u64 {
        match self.sign {
            Sign::Plus => self.target - 1,
            Sign::Minus => self.target + 1,
        }
    }

    /// The value this sequence describes: `product + sign`.
    pub fn target(&self) -> u64 {
        self.target
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let factors: Vec<String> = self.factors.iter().map(|p| p.to_string()).collect();
        match self.sign {
            Sign::Plus => write!(f, "{} + 1", factors.join(" * ")),
            Sign::Minus => write!(f, "{} - 1", factors.join(" * ")),
        }
    }
}

/// Outcome of inserting a record into a [`SemiprimeMap`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Insertion {
    /// No record existed for the target.
    New,
    /// A different record was stored; it has been overwritten.
    Replaced(Sequence),
    /// An identical record was already stored; nothing changed.
    Duplicate,
}

/// Discovered targets, one record per target, iterated in ascending order.
///
/// Records are keyed by their own target. Collisions are resolved
/// last-write-wins: a later, different factorization of the same target
/// replaces the stored one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SemiprimeMap {
    entries: BTreeMap<u64, Sequence>,
}

impl SemiprimeMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, sequence: Sequence) -> Insertion {
        match self.entries.entry(sequence.target()) {
            btree_map::Entry::Vacant(slot) => {
                slot.insert(sequence);
                Insertion::New
            }
            btree_map::Entry::Occupied(mut slot) => {
                if *slot.get() == sequence {
                    Insertion::Duplicate
                } else {
                    Insertion::Replaced(slot.insert(sequence))
                }
            }
        }
    }

    pub fn get(&self, target: u64) -> Option<&Sequence> {
        self.entries.get(&target)
    }

    pub fn contains(&self, target: u64) -> bool {
        self.entries.contains_key(&target)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u64, &Sequence)> {
        self.entries.iter().map(|(&t, s)| (t, s))
    }

    pub fn targets(&self) -> impl Iterator<Item = u64> + '_ {
        self.entries.keys().copied()
    }

    pub fn sequences(&self) -> impl Iterator<Item = &Sequence> {
        self.entries.values()
    }

    /// Length of the longest recorded factor tuple (0 when empty).
    pub fn max_factor_count(&self) -> usize {
        self.entries
            .values()
            .map(Sequence::factor_count)
            .max()
            .unwrap_or(0)
    }
}

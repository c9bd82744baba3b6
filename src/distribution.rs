use collections::{HashKind, HashTable};

use crate::config::DEFAULT_DISTRIBUTION_CAPACITY;
use crate::error::MarkovError;

/// Observed successors of one state and how often each was seen.
///
/// Every count is at least 1: a successor only enters the table through
/// [`TransitionDistribution::observe`], which stores 1 on first sight.
#[derive(Debug)]
pub struct TransitionDistribution {
    counts: HashTable<u64, HashKind>,
}

impl TransitionDistribution {
    pub fn new() -> Result<Self, MarkovError> {
        Self::with_capacity(DEFAULT_DISTRIBUTION_CAPACITY, HashKind::default())
    }

    pub fn with_capacity(cap: usize, hash: HashKind) -> Result<Self, MarkovError> {
        Ok(Self {
            counts: HashTable::with_capacity_and_hasher(cap, hash)?,
        })
    }

    /// Records one more transition into `next_state`, returning its new count
    pub fn observe(&mut self, next_state: &str) -> Result<u64, MarkovError> {
        match self.counts.get_mut(next_state) {
            Some(count) => {
                *count = count.saturating_add(1);
                Ok(*count)
            }
            None => {
                self.counts.set(next_state, 1)?;
                Ok(1)
            }
        }
    }

    pub fn count(&self, next_state: &str) -> Option<u64> {
        self.counts.get(next_state).copied()
    }

    /// Sum of every count, in one pass over all buckets and chains
    pub fn total(&self) -> u64 {
        self.counts.values().fold(0u64, |acc, n| acc.saturating_add(*n))
    }

    /// Number of distinct successors
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Successors in table layout order, which is also the order sampling
    /// accumulates weights in
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.counts.iter().map(|(state, n)| (state, *n))
    }
}

#[cfg(test)]
mod test {
    use collections::HashKind;

    use super::TransitionDistribution;

    #[test]
    fn first_observation_counts_one() {
        let mut d = TransitionDistribution::new().unwrap();
        assert_eq!(d.count("cat"), None);

        assert_eq!(d.observe("cat").unwrap(), 1);
        assert_eq!(d.count("cat"), Some(1));
        assert_eq!(d.len(), 1);
    }

    #[test]
    fn repeats_increment() {
        let mut d = TransitionDistribution::new().unwrap();
        d.observe("sat").unwrap();
        d.observe("ran").unwrap();
        assert_eq!(d.observe("sat").unwrap(), 2);
        assert_eq!(d.observe("sat").unwrap(), 3);

        assert_eq!(d.count("sat"), Some(3));
        assert_eq!(d.count("ran"), Some(1));
        assert_eq!(d.total(), 4);
        assert_eq!(d.len(), 2);
    }

    #[test]
    fn total_is_at_least_len() {
        let mut d = TransitionDistribution::with_capacity(2, HashKind::Crc32b).unwrap();
        for (i, w) in ["a", "b", "c", "d", "e", "f", "g"].iter().enumerate() {
            for _ in 0..=i {
                d.observe(w).unwrap();
            }
        }

        assert_eq!(d.len(), 7);
        assert_eq!(d.total(), (1..=7).sum::<u64>());
        assert!(d.iter().all(|(_, n)| n >= 1));
    }

    #[test]
    fn empty() {
        let d = TransitionDistribution::new().unwrap();
        assert!(d.is_empty());
        assert_eq!(d.total(), 0);
        assert_eq!(d.iter().count(), 0);
    }

    #[test]
    fn zero_capacity_is_an_error() {
        assert!(TransitionDistribution::with_capacity(0, HashKind::Djb2).is_err());
    }
}

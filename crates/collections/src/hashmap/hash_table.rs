use log::trace;

use super::TableError;
use super::hasher::{Djb2, KeyHasher};
use crate::List;

/// Bucket count used by [`HashTable::new`]
pub const DEFAULT_CAPACITY: usize = 1024;

/// What [`HashTable::set`] did with the key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOutcome {
    Inserted,
    Updated,
}

/// String keyed map resolving collisions by separate chaining.
///
/// Every key lives in exactly one chain, the one at
/// `hasher.hash(key) % capacity`. The bucket array doubles once the number of
/// entries reaches three quarters of the bucket count.
#[derive(Debug)]
pub struct HashTable<V, H = Djb2> {
    buckets: Vec<List<V>>,
    size: usize,
    hasher: H,
}

pub struct Iter<'a, V> {
    buckets: std::slice::Iter<'a, List<V>>,
    chain: Option<crate::linked_list::Iter<'a, V>>,
    remaining: usize,
}

impl<V> HashTable<V> {
    /// Creates a table with [`DEFAULT_CAPACITY`] buckets hashed with [`Djb2`]
    pub fn new() -> Result<Self, TableError> {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a table with `cap` many buckets hashed with [`Djb2`]
    pub fn with_capacity(cap: usize) -> Result<Self, TableError> {
        Self::with_capacity_and_hasher(cap, Djb2)
    }
}

impl<V, H> HashTable<V, H> {
    /// Returns the number of entries in the table
    pub fn len(&self) -> usize {
        self.size
    }

    /// Shorthand for `self.len() == 0`
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of buckets, or "slots" of the table
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    pub fn load_factor(&self) -> f64 {
        self.size as f64 / self.capacity() as f64
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Length of every chain, in bucket order
    pub fn chain_lengths(&self) -> impl Iterator<Item = usize> + '_ {
        self.buckets.iter().map(List::len)
    }

    /// Entries sharing a bucket with an earlier one
    pub fn collisions(&self) -> usize {
        self.chain_lengths().map(|len| len.saturating_sub(1)).sum()
    }

    pub fn longest_chain(&self) -> usize {
        self.chain_lengths().max().unwrap_or(0)
    }

    // [adapters]

    /// Visits every entry, bucket by bucket and head first within a chain.
    ///
    /// The order only depends on the table layout, so two walks over an
    /// unmodified table always agree.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            buckets: self.buckets.iter(),
            chain: None,
            remaining: self.size,
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.iter().map(|(key, _)| key)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, value)| value)
    }

    // [private]

    fn alloc_buckets(cap: usize) -> Result<Vec<List<V>>, TableError> {
        let mut buckets = Vec::new();
        buckets
            .try_reserve_exact(cap)
            .map_err(|_| TableError::AllocationFailed { buckets: cap })?;
        buckets.extend((0..cap).map(|_| List::new()));
        Ok(buckets)
    }

    fn doubled(cap: usize) -> Result<usize, TableError> {
        cap.checked_mul(2)
            .ok_or(TableError::CapacityOverflow { capacity: cap })
    }

    /// Entry count at which the next new key triggers a rehash
    fn threshold(&self) -> usize {
        self.capacity() * 3 / 4
    }
}

impl<V, H: KeyHasher> HashTable<V, H> {
    /// Creates a table with `cap` many buckets and the given hash strategy.
    ///
    /// # Errors
    ///
    /// [`TableError::InvalidCapacity`] if `cap` is 0,
    /// [`TableError::AllocationFailed`] if the bucket array cannot be allocated.
    pub fn with_capacity_and_hasher(cap: usize, hasher: H) -> Result<Self, TableError> {
        if cap == 0 {
            return Err(TableError::InvalidCapacity);
        }

        Ok(Self {
            buckets: Self::alloc_buckets(cap)?,
            size: 0,
            hasher,
        })
    }

    /// Inserts `key` or replaces the value it already maps to.
    ///
    /// A new key is pushed at the head of its chain. If the table already
    /// holds `floor(capacity * 0.75)` entries it is rehashed first.
    pub fn set(&mut self, key: &str, value: V) -> Result<SetOutcome, TableError> {
        let i = self.idx(key);
        if let Some(node) = self.buckets[i].find_mut(key) {
            node.value = value;
            return Ok(SetOutcome::Updated);
        }

        if self.size >= self.threshold() {
            self.rehash()?;
        }

        let i = self.idx(key);
        self.buckets[i].push(key, value);
        self.size += 1;

        Ok(SetOutcome::Inserted)
    }

    /// Replaces the value of an existing key.
    ///
    /// Returns `false` and leaves the table untouched when `key` is absent;
    /// use [`HashTable::set`] to insert.
    pub fn update(&mut self, key: &str, value: V) -> bool {
        match self.get_mut(key) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub fn search(&self, key: &str) -> bool {
        self.buckets[self.idx(key)].contains(key)
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.buckets[self.idx(key)].find(key).map(|node| &node.value)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let i = self.idx(key);
        self.buckets[i].find_mut(key).map(|node| &mut node.value)
    }

    /// Doubles the bucket count and relinks every entry under the new modulus.
    ///
    /// Nodes are moved between chains, never copied. `len()` is unchanged.
    pub fn rehash(&mut self) -> Result<(), TableError> {
        let old_cap = self.capacity();
        let new_cap = Self::doubled(old_cap)?;

        let new_buckets = Self::alloc_buckets(new_cap)?;
        let old_buckets = std::mem::replace(&mut self.buckets, new_buckets);
        self.relink(old_buckets);

        trace!(target: "rehash", "grew table from {} to {} buckets ({} entries)", old_cap, new_cap, self.size);
        Ok(())
    }

    /// Rebuilds the table under another hash strategy, keeping its capacity.
    ///
    /// This is the only way to change the function a table hashes with:
    /// swapping it in place would strand every entry in its old bucket.
    pub fn rehash_with<H2: KeyHasher>(self, hasher: H2) -> Result<HashTable<V, H2>, TableError> {
        let mut table = HashTable {
            buckets: HashTable::<V, H2>::alloc_buckets(self.capacity())?,
            size: self.size,
            hasher,
        };
        table.relink(self.buckets);

        trace!(target: "rehash", "relinked {} entries under a new hash function", table.size);
        Ok(table)
    }

    // [private]

    fn idx(&self, key: &str) -> usize {
        (self.hasher.hash(key) % self.capacity() as u64) as usize
    }

    fn relink(&mut self, old_buckets: Vec<List<V>>) {
        for mut chain in old_buckets {
            while let Some(node) = chain.pop_node() {
                let i = self.idx(&node.key);
                self.buckets[i].push_node(node);
            }
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(node) = self.chain.as_mut().and_then(Iterator::next) {
                self.remaining -= 1;
                return Some((node.key.as_str(), &node.value));
            }
            self.chain = Some(self.buckets.next()?.iter());
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, V, H> IntoIterator for &'a HashTable<V, H> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

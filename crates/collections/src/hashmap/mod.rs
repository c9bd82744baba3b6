use thiserror::Error;

mod hash_table;
pub mod hasher;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("A table needs at least one bucket, got a capacity of 0")]
    InvalidCapacity,
    #[error("Couldnt allocate a bucket array of {buckets} buckets")]
    AllocationFailed { buckets: usize },
    #[error("Doubling a capacity of {capacity} buckets overflows usize")]
    CapacityOverflow { capacity: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown hash function {0:?}, expected one of: djb2, crc32b, murmur")]
pub struct ParseHashKindError(pub String);

pub use hash_table::{DEFAULT_CAPACITY, HashTable, Iter, SetOutcome};
pub use hasher::{Crc32b, Djb2, HashKind, KeyHasher, MurmurOaat64};

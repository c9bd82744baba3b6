//! String hash strategies a [`HashTable`](super::HashTable) can be built with.
//!
//! A table holds exactly one strategy for its whole lifetime. Switching to
//! another one goes through [`HashTable::rehash_with`](super::HashTable::rehash_with),
//! which relinks every entry under the new function.

use std::{fmt, str::FromStr};

use super::ParseHashKindError;

/// A pure function from a key to an unsigned integer.
///
/// The table reduces the result modulo its bucket count, so implementations
/// only need to spread keys well, not fit any range.
pub trait KeyHasher {
    fn hash(&self, key: &str) -> u64;
}

impl<F> KeyHasher for F
where
    F: Fn(&str) -> u64,
{
    fn hash(&self, key: &str) -> u64 {
        self(key)
    }
}

/// Key bytes widened the way a C `char` is: sign extended, so bytes from
/// `0x80` up become the top of the `u64` range.
fn widen(b: u8) -> u64 {
    b as i8 as u64
}

/// Bernstein's `h * 33 + c`, seeded with 5381
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Djb2;

impl KeyHasher for Djb2 {
    fn hash(&self, key: &str) -> u64 {
        key.bytes()
            .fold(5381u64, |h, b| (h << 5).wrapping_add(h).wrapping_add(widen(b)))
    }
}

/// Bitwise reflected CRC-32 (polynomial `0xEDB88320`) run in a 64 bit
/// register.
///
/// The final complement covers all 64 bits, so for ASCII keys the upper half
/// is all ones and the lower half is the standard CRC-32.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Crc32b;

impl KeyHasher for Crc32b {
    fn hash(&self, key: &str) -> u64 {
        let mut crc = u64::from(u32::MAX);
        for b in key.bytes() {
            crc ^= widen(b);
            for _ in 0..8 {
                let mask = (crc & 1).wrapping_neg();
                crc = (crc >> 1) ^ (0xEDB8_8320 & mask);
            }
        }
        !crc
    }
}

/// Murmur-inspired one-at-a-time 64 bit hash
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MurmurOaat64;

impl KeyHasher for MurmurOaat64 {
    fn hash(&self, key: &str) -> u64 {
        key.bytes().fold(525_201_411_107_845_655u64, |mut h, b| {
            h ^= widen(b);
            h = h.wrapping_mul(0x5bd1_e995_5bd1_e995);
            h ^ (h >> 47)
        })
    }
}

/// Names one of the built-in strategies, so it can be picked at runtime
/// (from a config value or a command line flag).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashKind {
    #[default]
    Djb2,
    Crc32b,
    Murmur,
}

impl HashKind {
    pub const ALL: [HashKind; 3] = [HashKind::Djb2, HashKind::Crc32b, HashKind::Murmur];

    pub fn name(&self) -> &'static str {
        match self {
            HashKind::Djb2 => "djb2",
            HashKind::Crc32b => "crc32b",
            HashKind::Murmur => "murmur",
        }
    }
}

impl KeyHasher for HashKind {
    fn hash(&self, key: &str) -> u64 {
        match self {
            HashKind::Djb2 => Djb2.hash(key),
            HashKind::Crc32b => Crc32b.hash(key),
            HashKind::Murmur => MurmurOaat64.hash(key),
        }
    }
}

impl fmt::Display for HashKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashKind {
    type Err = ParseHashKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HashKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseHashKindError(s.to_owned()))
    }
}

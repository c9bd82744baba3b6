//! Owned linked chains and the separately chained, string keyed hash table
//! built on top of them.

mod macros;

pub mod hashmap;
pub mod linked_list;

pub use hashmap::{HashKind, HashTable, KeyHasher, SetOutcome, TableError};
pub use linked_list::{List, Node};

use std::path::PathBuf;

use collections::TableError;
use thiserror::{self, Error};

#[derive(Debug, Error)]
pub enum MarkovError {
    /// A hash table under the model could not be built or grown
    #[error("Table error: {0}")]
    Table(#[from] TableError),

    /// Reading training text failed
    #[error("Couldnt read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// n-gram tokenizers need at least one word per state
    #[error("Invalid n-gram order {0}, expected at least 1")]
    InvalidOrder(usize),
}

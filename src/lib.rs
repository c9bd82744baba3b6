//! Markov chain text models stored in separately chained hash tables.
//!
//! A [`MarkovModel`] maps every state (a character, word or n-gram) to a
//! [`TransitionDistribution`] of the states observed right after it. Models
//! are built with [`fit`] from a token stream and walked with [`sample`] and
//! [`generate`].

pub mod byte_matrix;
pub mod config;
pub mod distribution;
pub mod error;
pub mod model;
pub mod sampler;
pub mod tokenize;

pub use collections::HashKind;
pub use config::ModelConfig;
pub use distribution::TransitionDistribution;
pub use error::MarkovError;
pub use model::{MarkovModel, State, fit};
pub use sampler::{JoinPolicy, generate, generate_joined, sample};
pub use tokenize::Tokenizer;

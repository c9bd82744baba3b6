use std::fs;
use std::path::Path;

use crate::error::MarkovError;
use crate::sampler::JoinPolicy;

/// Turns raw text into the states a model is fitted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tokenizer {
    /// Every `char`, whitespace included
    Chars,
    /// Whitespace separated words
    Words,
    /// Consecutive groups of `n` words, joined by a single space
    NGrams(usize),
}

impl Tokenizer {
    /// Word n-grams of order `n`; order 1 is plain [`Tokenizer::Words`]
    pub fn ngrams(n: usize) -> Result<Self, MarkovError> {
        match n {
            0 => Err(MarkovError::InvalidOrder(n)),
            1 => Ok(Tokenizer::Words),
            n => Ok(Tokenizer::NGrams(n)),
        }
    }

    /// Splits `text` into states.
    ///
    /// n-grams do not overlap: `a b c d e` with `n = 2` gives `a b`, `c d`,
    /// and the trailing partial group `e` is dropped.
    pub fn tokens(&self, text: &str) -> Result<Vec<String>, MarkovError> {
        let tokens: Vec<String> = match *self {
            Tokenizer::Chars => text.chars().map(String::from).collect(),
            Tokenizer::Words => text.split_whitespace().map(str::to_owned).collect(),
            Tokenizer::NGrams(0) => return Err(MarkovError::InvalidOrder(0)),
            Tokenizer::NGrams(n) => text
                .split_whitespace()
                .collect::<Vec<_>>()
                .chunks_exact(n)
                .map(|group| group.join(" "))
                .collect(),
        };
        Ok(tokens)
    }

    /// Reads a whole file and tokenizes it
    pub fn tokens_from_file<P: AsRef<Path>>(&self, path: P) -> Result<Vec<String>, MarkovError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| MarkovError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        self.tokens(&text)
    }

    /// The join policy that turns generated states of this kind back into text
    pub fn join_policy(&self) -> JoinPolicy {
        match self {
            Tokenizer::Chars => JoinPolicy::chars(),
            Tokenizer::Words | Tokenizer::NGrams(_) => JoinPolicy::words(),
        }
    }
}

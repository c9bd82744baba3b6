use collections::HashKind;

use crate::error::MarkovError;

/// Buckets in the state table of a fresh model
pub const DEFAULT_MODEL_CAPACITY: usize = collections::hashmap::DEFAULT_CAPACITY;

/// Buckets in each per-state successor table
pub const DEFAULT_DISTRIBUTION_CAPACITY: usize = 16;

/// Sizing and hashing knobs for a [`MarkovModel`](crate::MarkovModel).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelConfig {
    pub model_capacity: usize,
    pub distribution_capacity: usize,
    pub hash: HashKind,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_capacity: DEFAULT_MODEL_CAPACITY,
            distribution_capacity: DEFAULT_DISTRIBUTION_CAPACITY,
            hash: HashKind::Djb2,
        }
    }
}

impl ModelConfig {
    pub fn with_model_capacity(mut self, cap: usize) -> Self {
        self.model_capacity = cap;
        self
    }

    pub fn with_distribution_capacity(mut self, cap: usize) -> Self {
        self.distribution_capacity = cap;
        self
    }

    pub fn with_hash(mut self, hash: HashKind) -> Self {
        self.hash = hash;
        self
    }

    /// Rejects zero capacities before any table is allocated
    pub fn validate(&self) -> Result<(), MarkovError> {
        if self.model_capacity == 0 || self.distribution_capacity == 0 {
            return Err(collections::TableError::InvalidCapacity.into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use collections::HashKind;

    use super::ModelConfig;
    use crate::error::MarkovError;

    #[test]
    fn defaults() {
        let c = ModelConfig::default();
        assert_eq!(c.model_capacity, 1024);
        assert_eq!(c.distribution_capacity, 16);
        assert_eq!(c.hash, HashKind::Djb2);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn builder() {
        let c = ModelConfig::default()
            .with_model_capacity(64)
            .with_distribution_capacity(4)
            .with_hash(HashKind::Murmur);
        assert_eq!(c.model_capacity, 64);
        assert_eq!(c.distribution_capacity, 4);
        assert_eq!(c.hash, HashKind::Murmur);
    }

    #[test]
    fn zero_capacities_are_rejected() {
        let c = ModelConfig::default().with_distribution_capacity(0);
        assert!(matches!(c.validate(), Err(MarkovError::Table(_))));
        let c = ModelConfig::default().with_model_capacity(0);
        assert!(matches!(c.validate(), Err(MarkovError::Table(_))));
    }
}

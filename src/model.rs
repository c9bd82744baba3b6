use collections::{HashKind, HashTable};
use log::debug;

use crate::config::ModelConfig;
use crate::distribution::TransitionDistribution;
use crate::error::MarkovError;

/// A node of the chain as seen by lookups.
///
/// `Start` is the state every token stream begins in. It is not a string,
/// so no token can ever be mistaken for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State<'a> {
    Start,
    Token(&'a str),
}

impl<'a> From<&'a str> for State<'a> {
    fn from(token: &'a str) -> Self {
        State::Token(token)
    }
}

impl<'a> From<Option<&'a str>> for State<'a> {
    fn from(token: Option<&'a str>) -> Self {
        token.map_or(State::Start, State::Token)
    }
}

/// Two level table: state -> successor -> number of times observed.
///
/// Only states that were followed by something own a distribution; a state
/// seen solely at the end of a stream has none and ends generation.
#[derive(Debug)]
pub struct MarkovModel {
    start: Option<TransitionDistribution>,
    states: HashTable<TransitionDistribution, HashKind>,
    config: ModelConfig,
}

/// Builds a model with the default configuration from one token stream
pub fn fit<I, S>(tokens: I) -> Result<MarkovModel, MarkovError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    MarkovModel::fit_with(ModelConfig::default(), tokens)
}

impl MarkovModel {
    pub fn new() -> Result<Self, MarkovError> {
        Self::with_config(ModelConfig::default())
    }

    pub fn with_config(config: ModelConfig) -> Result<Self, MarkovError> {
        config.validate()?;
        Ok(Self {
            start: None,
            states: HashTable::with_capacity_and_hasher(config.model_capacity, config.hash)?,
            config,
        })
    }

    pub fn fit_with<I, S>(config: ModelConfig, tokens: I) -> Result<Self, MarkovError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut model = Self::with_config(config)?;
        model.fit_more(tokens)?;
        Ok(model)
    }

    /// Feeds another token stream into the model.
    ///
    /// The stream starts over from [`State::Start`], so the last token of a
    /// previous stream is never linked to the first token of this one.
    /// Returns the number of tokens consumed.
    pub fn fit_more<I, S>(&mut self, tokens: I) -> Result<usize, MarkovError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut previous: Option<S> = None;
        let mut consumed = 0;

        for next in tokens {
            let prev = match &previous {
                Some(token) => State::Token(token.as_ref()),
                None => State::Start,
            };
            self.record(prev, next.as_ref())?;
            previous = Some(next);
            consumed += 1;
        }

        debug!(target: "fit", "consumed {} tokens, {} states, {} buckets", consumed, self.states.len(), self.states.capacity());
        Ok(consumed)
    }

    /// Records a single `prev -> next` transition
    pub fn record(&mut self, prev: State<'_>, next: &str) -> Result<u64, MarkovError> {
        let dist_cap = self.config.distribution_capacity;
        let hash = self.config.hash;

        let key = match prev {
            State::Start => {
                let dist = match self.start.as_mut() {
                    Some(dist) => dist,
                    None => self
                        .start
                        .insert(TransitionDistribution::with_capacity(dist_cap, hash)?),
                };
                return dist.observe(next);
            }
            State::Token(key) => key,
        };

        match self.states.get_mut(key) {
            Some(dist) => dist.observe(next),
            None => {
                let mut dist = TransitionDistribution::with_capacity(dist_cap, hash)?;
                dist.observe(next)?;
                self.states.set(key, dist)?;
                Ok(1)
            }
        }
    }

    pub fn distribution(&self, state: State<'_>) -> Option<&TransitionDistribution> {
        match state {
            State::Start => self.start.as_ref(),
            State::Token(key) => self.states.get(key),
        }
    }

    /// True if `state` has at least one outgoing transition
    pub fn contains(&self, state: State<'_>) -> bool {
        self.distribution(state).is_some()
    }

    /// Number of token states with outgoing transitions (the start state is
    /// not counted)
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.states.is_empty()
    }

    /// Every token state with outgoing transitions, in table layout order
    pub fn states(&self) -> impl Iterator<Item = &str> + '_ {
        self.states.keys()
    }

    /// Sum of all recorded transitions, the start state included
    pub fn transition_count(&self) -> u64 {
        self.start
            .iter()
            .chain(self.states.values())
            .map(TransitionDistribution::total)
            .sum()
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    pub fn capacity(&self) -> usize {
        self.states.capacity()
    }

    /// States that share a bucket with another state
    pub fn collisions(&self) -> usize {
        self.states.collisions()
    }

    pub fn longest_chain(&self) -> usize {
        self.states.longest_chain()
    }
}

#[cfg(test)]
mod test {
    use collections::HashKind;

    use super::{MarkovModel, State, fit};
    use crate::config::ModelConfig;

    const CORPUS: [&str; 6] = ["the", "cat", "sat", "the", "cat", "ran"];

    #[test]
    fn counts_word_transitions() {
        let model = fit(CORPUS).unwrap();

        let the = model.distribution(State::Token("the")).unwrap();
        assert_eq!(the.count("cat"), Some(2));
        assert_eq!(the.len(), 1);

        let cat = model.distribution("cat".into()).unwrap();
        assert_eq!(cat.count("sat"), Some(1));
        assert_eq!(cat.count("ran"), Some(1));
        assert_eq!(cat.len(), 2);

        let sat = model.distribution("sat".into()).unwrap();
        assert_eq!(sat.count("the"), Some(1));
        assert_eq!(sat.len(), 1);

        assert!(model.distribution("ran".into()).is_none());
        assert!(!model.contains("ran".into()));
        assert_eq!(model.len(), 3);
    }

    #[test]
    fn stream_begins_at_start() {
        let model = fit(CORPUS).unwrap();

        let start = model.distribution(State::Start).unwrap();
        assert_eq!(start.count("the"), Some(1));
        assert_eq!(start.total(), 1);
        // one transition per token
        assert_eq!(model.transition_count(), CORPUS.len() as u64);
    }

    #[test]
    fn start_never_collides_with_a_token() {
        // tokens that look like classic sentinel strings
        let model = fit(["", "<start>", "\0"]).unwrap();

        assert_eq!(model.distribution(State::Start).unwrap().count(""), Some(1));
        assert_eq!(model.distribution(State::Token("")).unwrap().count("<start>"), Some(1));
        assert_eq!(model.distribution(State::Token("<start>")).unwrap().count("\0"), Some(1));
    }

    #[test]
    fn fit_more_restarts_each_stream() {
        let mut model = MarkovModel::new().unwrap();
        assert!(model.is_empty());

        assert_eq!(model.fit_more(["a", "b"]).unwrap(), 2);
        assert_eq!(model.fit_more(vec!["c".to_owned(), "d".to_owned()]).unwrap(), 2);

        // "b" ended the first stream and was never linked to "c"
        assert!(!model.contains("b".into()));
        let start = model.distribution(State::Start).unwrap();
        assert_eq!(start.count("a"), Some(1));
        assert_eq!(start.count("c"), Some(1));
    }

    #[test]
    fn empty_stream_builds_an_empty_model() {
        let model = fit(Vec::<String>::new()).unwrap();
        assert!(model.is_empty());
        assert_eq!(model.transition_count(), 0);
        assert!(model.distribution(State::Start).is_none());
    }

    #[test]
    fn small_tables_grow_while_fitting() {
        let config = ModelConfig::default()
            .with_model_capacity(2)
            .with_distribution_capacity(1)
            .with_hash(HashKind::Murmur);
        let tokens: Vec<String> = (0..500).map(|i| format!("w{}", i % 50)).collect();

        let model = MarkovModel::fit_with(config, &tokens).unwrap();

        assert_eq!(model.len(), 50);
        assert!(model.capacity() >= 64);
        assert_eq!(model.transition_count(), 500);
        for i in 0..49 {
            let dist = model.distribution(State::Token(&format!("w{i}"))).unwrap();
            assert_eq!(dist.count(&format!("w{}", i + 1)), Some(10));
        }
        assert_eq!(model.config().hash, HashKind::Murmur);
    }

    #[test]
    fn record_reports_running_count() {
        let mut model = MarkovModel::new().unwrap();
        assert_eq!(model.record(State::Token("x"), "y").unwrap(), 1);
        assert_eq!(model.record(State::Token("x"), "y").unwrap(), 2);
        assert_eq!(model.record(State::Start, "x").unwrap(), 1);
        assert_eq!(model.states().collect::<Vec<_>>(), ["x"]);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = ModelConfig::default().with_model_capacity(0);
        assert!(MarkovModel::with_config(config).is_err());
    }
}

use log::debug;
use rand::Rng;

use crate::model::{MarkovModel, State};

/// How [`generate_joined`] glues generated states into one string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinPolicy {
    pub separator: String,
    /// Emit the initial state in front of the generated ones (ignored when
    /// starting from [`State::Start`])
    pub include_initial: bool,
}

impl JoinPolicy {
    /// Space separated, for word and n-gram states
    pub fn words() -> Self {
        Self {
            separator: " ".to_owned(),
            include_initial: true,
        }
    }

    /// No separator, for character states
    pub fn chars() -> Self {
        Self {
            separator: String::new(),
            include_initial: true,
        }
    }

    pub fn without_initial(mut self) -> Self {
        self.include_initial = false;
        self
    }
}

/// Picks a successor of `state` with probability proportional to its count.
///
/// Returns `None` when the state has no distribution or a zero total, which
/// both mean the chain cannot continue from here.
///
/// The distribution is walked twice in the same bucket and chain order: once
/// for the total, once accumulating counts until the running sum exceeds a
/// draw `r` in `[0, total)`.
pub fn sample<'m, R: Rng>(model: &'m MarkovModel, state: State<'_>, rng: &mut R) -> Option<&'m str> {
    let dist = model.distribution(state)?;

    let total = dist.total();
    if total == 0 {
        return None;
    }

    let r = rng.random_range(0..total);
    let mut acc = 0u64;
    for (next, count) in dist.iter() {
        acc += count;
        if acc > r {
            return Some(next);
        }
    }

    None
}

/// Walks the chain from `initial` for at most `length` steps.
///
/// The initial state itself is not part of the output. Generation stops
/// early, without error, as soon as a state has no outgoing transition.
pub fn generate<'m, R: Rng>(
    model: &'m MarkovModel,
    initial: State<'_>,
    length: usize,
    rng: &mut R,
) -> Vec<&'m str> {
    let mut out = Vec::new();
    let mut current = initial;

    while out.len() < length {
        match sample(model, current, rng) {
            Some(next) => {
                out.push(next);
                current = State::Token(next);
            }
            None => {
                debug!(target: "generate", "reached a terminal state after {} of {} steps", out.len(), length);
                break;
            }
        }
    }

    out
}

/// [`generate`], then joins the states according to `policy`
pub fn generate_joined<R: Rng>(
    model: &MarkovModel,
    initial: State<'_>,
    length: usize,
    policy: &JoinPolicy,
    rng: &mut R,
) -> String {
    let generated = generate(model, initial, length, rng);

    let head = match initial {
        State::Token(token) if policy.include_initial => Some(token),
        _ => None,
    };

    head.into_iter()
        .chain(generated)
        .collect::<Vec<_>>()
        .join(policy.separator.as_str())
}

use rand::Rng;

const ALPHABET: usize = 256;

/// Dense transition counts between bytes.
///
/// A cheaper stand-in for [`MarkovModel`](crate::MarkovModel) when states are
/// single bytes: no hashing, one `u32` counter per `(prev, cur)` pair.
pub struct ByteMatrix {
    counts: Box<[[u32; ALPHABET]]>,
}

impl Default for ByteMatrix {
    fn default() -> Self {
        Self::new()
    }
}

impl ByteMatrix {
    pub fn new() -> Self {
        Self {
            counts: vec![[0u32; ALPHABET]; ALPHABET].into_boxed_slice(),
        }
    }

    /// Counts every adjacent pair of `bytes`. Counters saturate at `u32::MAX`.
    pub fn fit(&mut self, bytes: &[u8]) {
        for pair in bytes.windows(2) {
            let cell = &mut self.counts[usize::from(pair[0])][usize::from(pair[1])];
            *cell = cell.saturating_add(1);
        }
    }

    pub fn count(&self, prev: u8, cur: u8) -> u32 {
        self.counts[usize::from(prev)][usize::from(cur)]
    }

    /// Number of transitions out of `prev`
    pub fn row_total(&self, prev: u8) -> u64 {
        self.counts[usize::from(prev)].iter().map(|n| u64::from(*n)).sum()
    }

    /// Weighted pick of a successor of `prev`, `None` if it has none
    pub fn sample<R: Rng>(&self, prev: u8, rng: &mut R) -> Option<u8> {
        let total = self.row_total(prev);
        if total == 0 {
            return None;
        }

        let r = rng.random_range(0..total);
        let mut acc = 0u64;
        for (cur, n) in (0..=u8::MAX).zip(self.counts[usize::from(prev)].iter()) {
            acc += u64::from(*n);
            if acc > r {
                return Some(cur);
            }
        }
        None
    }

    /// Walks at most `length` bytes from `start`, `start` itself excluded
    pub fn generate<R: Rng>(&self, start: u8, length: usize, rng: &mut R) -> Vec<u8> {
        let mut out = Vec::new();
        let mut current = start;
        while out.len() < length {
            match self.sample(current, rng) {
                Some(next) => {
                    out.push(next);
                    current = next;
                }
                None => break,
            }
        }
        out
    }
}

impl std::fmt::Debug for ByteMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let nonzero = self.counts.iter().flatten().filter(|n| **n > 0).count();
        f.debug_struct("ByteMatrix").field("nonzero", &nonzero).finish()
    }
}

#[cfg(test)]
mod test {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::ByteMatrix;

    #[test]
    fn counts_adjacent_pairs() {
        let mut m = ByteMatrix::new();
        m.fit(b"abab");

        assert_eq!(m.count(b'a', b'b'), 2);
        assert_eq!(m.count(b'b', b'a'), 1);
        assert_eq!(m.count(b'b', b'b'), 0);
        assert_eq!(m.row_total(b'a'), 2);
        assert_eq!(m.row_total(b'z'), 0);
    }

    #[test]
    fn short_inputs_count_nothing() {
        let mut m = ByteMatrix::default();
        m.fit(b"");
        m.fit(b"x");
        assert_eq!(m.row_total(b'x'), 0);
    }

    #[test]
    fn generation_follows_observed_pairs() {
        let mut m = ByteMatrix::new();
        m.fit(b"hello world");
        let mut rng = StdRng::seed_from_u64(7);

        assert_eq!(m.sample(b'h', &mut rng), Some(b'e'));
        assert_eq!(m.sample(b'd', &mut rng), None);

        let out = m.generate(b'w', 20, &mut rng);
        let mut prev = b'w';
        for b in out {
            assert!(m.count(prev, b) > 0);
            prev = b;
        }
    }

    #[test]
    fn huge_length_from_a_dead_end() {
        let mut m = ByteMatrix::new();
        m.fit(b"ab");
        let out = m.generate(b'b', usize::MAX, &mut StdRng::seed_from_u64(1));
        assert!(out.is_empty());
    }

    #[test]
    fn self_loop() {
        let mut m = ByteMatrix::new();
        m.fit(&[0xff, 0xff]);
        let out = m.generate(0xff, 5, &mut StdRng::seed_from_u64(1));
        assert_eq!(out, [0xff; 5]);
    }
}

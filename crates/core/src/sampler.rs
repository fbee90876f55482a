//! Deterministic "variety" sampling for generated copy.
//!
//! Pages sample their FAQ, advantage and related-link subsets so near-by
//! pages do not all read the same, but the choice must be a pure function
//! of the page keyword: regenerating a page must reproduce it byte for
//! byte. The generator is the classic sine-fraction trick seeded from the
//! keyword's character codes; the shuffle is an insertion sort ordered by
//! a `rand() - 0.5` comparator. Both are intentionally biased and
//! intentionally frozen; changing either changes every generated page.

/// Sine-fraction pseudo-random stream seeded from a keyword.
#[derive(Debug, Clone)]
pub struct SeededRng {
    seed: f64,
}

impl SeededRng {
    /// Seed is the sum of the key's char code points plus a per-call-site
    /// offset, so different sections of one page draw different streams.
    pub fn from_key(key: &str, offset: u32) -> SeededRng {
        let sum: u64 = key.chars().map(|c| c as u64).sum();
        SeededRng {
            seed: (sum + u64::from(offset)) as f64,
        }
    }

    /// Next value in `[0, 1)`.
    pub fn next(&mut self) -> f64 {
        let x = self.seed.sin() * 10000.0;
        self.seed += 1.0;
        x - x.floor()
    }
}

/// Shuffle in place with an insertion sort whose comparisons are
/// `rand() - 0.5`. Biased, but fully determined by the stream.
pub fn biased_shuffle<T>(items: &mut [T], rng: &mut SeededRng) {
    for i in 1..items.len() {
        let mut j = i;
        while j > 0 && rng.next() - 0.5 > 0.0 {
            items.swap(j - 1, j);
            j -= 1;
        }
    }
}

/// Shuffle a copy of `items` and keep a prefix whose length is drawn from
/// the same stream (after the shuffle) via `count`. The count is clamped
/// to the pool size.
pub fn seeded_sample<T: Clone>(
    items: &[T],
    key: &str,
    offset: u32,
    count: impl FnOnce(f64) -> usize,
) -> Vec<T> {
    let mut rng = SeededRng::from_key(key, offset);
    let mut pool: Vec<T> = items.to_vec();
    biased_shuffle(&mut pool, &mut rng);
    let n = count(rng.next()).min(pool.len());
    pool.truncate(n);
    pool
}

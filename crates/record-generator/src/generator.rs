//! Seeded generator producing one record per call.

use crate::pattern::expand_pattern;
use rand::rngs::StdRng;
use rand::SeedableRng;
use write_core::{Record, RecordSource};

/// Email-like description used when no pattern is configured.
pub const DEFAULT_PATTERN: &str = "{first}.{last}{rand:2}@{domain}";

/// Width of the `description` column; longer expansions are cut to fit.
pub const MAX_DESCRIPTION_LEN: usize = 255;

/// Record generator backed by a seeded RNG.
///
/// Two generators built with the same seed and pattern yield the same
/// sequence of records.
pub struct RecordGenerator {
    seed: u64,
    rng: StdRng,
    pattern: String,
    /// Index of the next record
    index: u64,
}

impl RecordGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
            pattern: DEFAULT_PATTERN.to_string(),
            index: 0,
        }
    }

    /// Generator with a random seed. The seed is available via [`Self::seed`]
    /// so the run can be reproduced.
    pub fn from_random_seed() -> Self {
        Self::new(rand::random())
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn next_record(&mut self) -> Record {
        let mut description = expand_pattern(&self.pattern, &mut self.rng, self.index);
        truncate_to_char_boundary(&mut description, MAX_DESCRIPTION_LEN);
        self.index += 1;
        Record::idle(description)
    }
}

impl RecordSource for RecordGenerator {
    fn next_record(&mut self) -> Record {
        RecordGenerator::next_record(self)
    }
}

fn truncate_to_char_boundary(s: &mut String, max_len: usize) {
    if s.len() <= max_len {
        return;
    }
    let mut cut = max_len;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    s.truncate(cut);
}

use std::ops::RangeInclusive;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

/// Source of randomness for the generator. Any implementation is acceptable
/// as long as the same seed yields the same sequence of draws.
pub trait Sampler {
    fn int_range(&mut self, range: RangeInclusive<i64>) -> i64;

    fn float_range(&mut self, range: RangeInclusive<f64>) -> f64;

    fn chance(&mut self, probability: f64) -> bool;

    /// `amount` distinct indices from `0..len`, in draw order.
    fn sample_indices(&mut self, len: usize, amount: usize) -> Vec<usize>;

    fn uuid(&mut self) -> Uuid;

    /// Uniform index into a non-empty collection of length `len`.
    fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.int_range(0..=len as i64 - 1) as usize
    }

    fn choose<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.index(items.len())]
    }

    fn weighted_index(&mut self, weights: &[u32]) -> usize {
        let total = weights.iter().map(|w| *w as i64).sum::<i64>();
        if total == 0 {
            return 0;
        }
        let draw = self.int_range(1..=total);
        pick_weighted(weights, draw)
    }

    fn timestamp_between(&mut self, from: DateTime<Utc>, to: DateTime<Utc>) -> DateTime<Utc> {
        if to <= from {
            return from;
        }
        let secs = self.int_range(from.timestamp()..=to.timestamp());
        DateTime::from_timestamp(secs, 0).unwrap_or(from)
    }
}

/// Maps a draw in `1..=total` to the first index whose cumulative weight
/// reaches it. Draws past the last bucket fall back to index 0.
pub fn pick_weighted(weights: &[u32], draw: i64) -> usize {
    let mut current = 0i64;
    for (i, weight) in weights.iter().enumerate() {
        current += *weight as i64;
        if draw <= current {
            return i;
        }
    }
    0
}

pub struct SeededSampler {
    rng: StdRng,
}

impl SeededSampler {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Sampler for SeededSampler {
    fn int_range(&mut self, range: RangeInclusive<i64>) -> i64 {
        self.rng.random_range(range)
    }

    fn float_range(&mut self, range: RangeInclusive<f64>) -> f64 {
        self.rng.random_range(range)
    }

    fn chance(&mut self, probability: f64) -> bool {
        if probability.is_nan() {
            return false;
        }
        self.rng.random_bool(probability.clamp(0.0, 1.0))
    }

    fn sample_indices(&mut self, len: usize, amount: usize) -> Vec<usize> {
        rand::seq::index::sample(&mut self.rng, len, amount.min(len)).into_vec()
    }

    fn uuid(&mut self) -> Uuid {
        uuid::Builder::from_random_bytes(self.rng.random()).into_uuid()
    }
}

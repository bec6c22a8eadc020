//! Rank-based truncation selection.
//!
//! 1. Rank individuals by fitness, best first (stable: equal fitness keeps input order)
//! 2. Keep the top `N/2` as survivors
//! 3. Refill by drawing `N/2` more uniformly, with replacement, from the survivors
//!
//! Selection pressure depends only on rank, not on fitness magnitude: a survivor with a
//! hit and one with a near miss are equally likely to be drawn again.

use std::cmp::Ordering;

use intercept_engine::Candidate;
use rand::{Rng, seq::IndexedRandom};
use serde::{Deserialize, Serialize};

/// A candidate together with its fitness in the current generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Individual {
    pub candidate: Candidate,
    pub fitness: f64,
}

impl Individual {
    /// Pairs a candidate with its fitness.
    #[must_use]
    pub const fn new(candidate: Candidate, fitness: f64) -> Self {
        Self { candidate, fitness }
    }

    /// Orders individuals best first. NaN fitness ranks below everything else.
    #[must_use]
    pub fn cmp_best_first(&self, other: &Self) -> Ordering {
        let key = |f: f64| if f.is_nan() { f64::NEG_INFINITY } else { f };
        key(other.fitness).total_cmp(&key(self.fitness))
    }
}

/// Selects `2·(target_size/2)` candidates from `individuals`.
///
/// `target_size` is the configured population size, not the length of `individuals`: a
/// half-sized generation is brought back to full size here. When fewer than
/// `target_size/2` individuals are given, all of them survive and the result is shorter.
///
/// Every returned candidate is one of the input candidates.
pub fn truncation_select<R>(
    individuals: &[Individual],
    target_size: usize,
    rng: &mut R,
) -> Vec<Candidate>
where
    R: Rng + ?Sized,
{
    let half = target_size / 2;
    let mut ranked = individuals.iter().collect::<Vec<_>>();
    ranked.sort_by(|a, b| a.cmp_best_first(b));
    ranked.truncate(half);

    let mut selected = Vec::with_capacity(ranked.len() + half);
    selected.extend(ranked.iter().map(|ind| ind.candidate));
    selected.extend(
        (0..half)
            .filter_map(|_| ranked.choose(rng))
            .map(|ind| ind.candidate),
    );
    selected
}

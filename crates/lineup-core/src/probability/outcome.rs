//! Exact win-count distribution over independent sub-matches.
//!
//! Sub-match probabilities generally differ, so every subset of winners is
//! enumerated explicitly instead of using binomial coefficients.

use crate::combinatorics::SubsetCombinations;

/// Sub-matches in one competition.
pub const SUB_MATCHES: usize = 5;

/// Sub-match wins needed to take the competition.
pub const MAJORITY: usize = 3;

/// Probability of winning exactly `k` of the given sub-matches.
pub fn exactly_k_wins(probabilities: &[f64], k: usize) -> f64 {
    SubsetCombinations::new(probabilities.len(), k)
        .iter()
        .fold(0.0, |total, winners| {
            total + subset_probability(probabilities, winners)
        })
}

/// Probability of winning at least `m` of the given sub-matches.
pub fn at_least_m_wins(probabilities: &[f64], m: usize) -> f64 {
    (m..=probabilities.len()).fold(0.0, |total, k| total + exactly_k_wins(probabilities, k))
}

/// Exact-k probabilities for k = 0..=n.
pub fn win_distribution(probabilities: &[f64]) -> Vec<f64> {
    (0..=probabilities.len())
        .map(|k| exactly_k_wins(probabilities, k))
        .collect()
}

/// Probability of taking a best-of-[`SUB_MATCHES`] competition.
pub fn competition_win_probability(probabilities: &[f64; SUB_MATCHES]) -> f64 {
    at_least_m_wins(probabilities, MAJORITY)
}

fn subset_probability(probabilities: &[f64], winners: &[usize]) -> f64 {
    probabilities
        .iter()
        .enumerate()
        .fold(1.0, |product, (index, &p)| {
            if winners.contains(&index) {
                product * p
            } else {
                product * (1.0 - p)
            }
        })
}

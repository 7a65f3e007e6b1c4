use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::{ComparisonMatrix, Error, Normalized};

/// Maximum absolute component change at which the power iteration is
/// considered converged.
pub const CONVERGENCE_TOLERANCE: f64 = 1e-10;

/// Iteration cap for the power iteration.
pub const MAX_ITERATIONS: usize = 1000;

/// Relative weights over a set of items, summing to 1.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PriorityVector(BTreeMap<String, Normalized>);

impl PriorityVector {
    /// Normalizes raw non-negative scores into shares of their sum. Callers
    /// guarantee at least one score is positive when the map is non-empty.
    pub(crate) fn from_raw(scores: BTreeMap<String, f64>) -> Self {
        if scores.is_empty() {
            return Self(BTreeMap::new());
        }
        let total: f64 = scores.values().sum();
        Self(
            scores
                .into_iter()
                .map(|(item, score)| (item, Normalized::new(score / total).unwrap()))
                .collect(),
        )
    }

    /// The weight assigned to `item`, if present.
    pub fn weight(&self, item: &str) -> Option<Normalized> {
        self.0.get(item).copied()
    }

    /// Item names in lexicographic order.
    pub fn items(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Normalized)> {
        self.0.iter().map(|(item, weight)| (item.as_str(), *weight))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Weights rounded to `digits` decimal places, for display only. The
    /// stored weights keep full precision.
    pub fn rounded(&self, digits: u32) -> BTreeMap<String, f64> {
        let scale = 10f64.powi(digits as i32);
        self.0
            .iter()
            .map(|(item, weight)| (item.clone(), (weight.as_f64() * scale).round() / scale))
            .collect()
    }
}

/// A priority vector together with the dominant eigenvalue of the matrix it
/// was extracted from.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Priorities {
    pub weights: PriorityVector,
    pub lambda_max: f64,
}

/// Extracts the priority vector of a comparison matrix: its principal
/// eigenvector, normalized to sum to 1, along with the dominant eigenvalue.
///
/// The matrix is positive and reciprocal, so it has a unique dominant
/// positive eigenvalue with a positive eigenvector (Perron-Frobenius). Power
/// iteration from the uniform vector converges to that eigenvector and is
/// bit-for-bit reproducible for a fixed matrix.
pub fn extract_priorities(matrix: &ComparisonMatrix) -> Result<Priorities, Error> {
    power_iterate(matrix, CONVERGENCE_TOLERANCE, MAX_ITERATIONS)
}

pub(crate) fn power_iterate(
    matrix: &ComparisonMatrix,
    tolerance: f64,
    max_iterations: usize,
) -> Result<Priorities, Error> {
    let n = matrix.len();
    let mut vector = vec![1.0 / n as f64; n];
    let mut converged = None;
    for iteration in 1..=max_iterations {
        let product = matrix.multiply(&vector);
        let sum: f64 = product.iter().sum();
        let next: Vec<f64> = product.iter().map(|component| component / sum).collect();
        let delta = vector
            .iter()
            .zip(&next)
            .map(|(previous, current)| (previous - current).abs())
            .fold(0.0, f64::max);
        vector = next;
        if delta < tolerance {
            converged = Some(iteration);
            break;
        }
    }
    let Some(iterations) = converged else {
        return Err(Error::EigenvectorDidNotConverge {
            iterations: max_iterations,
        });
    };

    let product = matrix.multiply(&vector);
    let lambda_max = product
        .iter()
        .zip(&vector)
        .map(|(mapped, component)| mapped / component)
        .sum::<f64>()
        / n as f64;
    debug!(iterations, lambda_max, "power iteration converged");

    let weights = PriorityVector::from_raw(
        matrix
            .items()
            .iter()
            .cloned()
            .zip(vector.iter().copied())
            .collect(),
    );
    Ok(Priorities {
        weights,
        lambda_max,
    })
}

#[cfg(test)]
mod test {
    use super::{extract_priorities, power_iterate, CONVERGENCE_TOLERANCE};
    use crate::num::assert_within;
    use crate::{ComparisonMatrix, Error, Judgment};

    fn two_item_matrix() -> ComparisonMatrix {
        let judgments = vec![Judgment::new("Safety", "Price", 3.0)];
        ComparisonMatrix::from_judgments(["Safety", "Price"], &judgments).unwrap()
    }

    #[test]
    fn two_item_weights_follow_the_ratio() {
        let priorities = extract_priorities(&two_item_matrix()).unwrap();
        assert_within(priorities.weights.weight("Safety").unwrap().as_f64(), 0.75, 1e-12);
        assert_within(priorities.weights.weight("Price").unwrap().as_f64(), 0.25, 1e-12);
        assert_within(priorities.lambda_max, 2.0, 1e-12);
    }

    #[test]
    fn single_item_gets_full_weight() {
        let matrix = ComparisonMatrix::from_judgments(["Safety"], &[]).unwrap();
        let priorities = extract_priorities(&matrix).unwrap();
        assert_eq!(priorities.weights.weight("Safety").unwrap().as_f64(), 1.0);
        assert_within(priorities.lambda_max, 1.0, 1e-12);
    }

    #[test]
    fn starved_iteration_cap_reports_non_convergence() {
        let result = power_iterate(&two_item_matrix(), CONVERGENCE_TOLERANCE, 1);
        assert_eq!(
            result.unwrap_err(),
            Error::EigenvectorDidNotConverge { iterations: 1 }
        );
    }

    #[test]
    fn rounding_is_display_only() {
        let priorities = extract_priorities(&two_item_matrix()).unwrap();
        let rounded = priorities.weights.rounded(1);
        assert_eq!(rounded["Safety"], 0.8);
        assert_eq!(rounded["Price"], 0.3);
        // The stored weights are untouched.
        assert_within(priorities.weights.weight("Safety").unwrap().as_f64(), 0.75, 1e-12);
    }
}

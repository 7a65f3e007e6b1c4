//! Priority derivation for multi-criteria decisions using the
//! [analytic hierarchy process](https://en.wikipedia.org/wiki/Analytic_hierarchy_process).
//!
//! Sparse pairwise judgments are completed into reciprocal
//! [`ComparisonMatrix`] values, relative weights are extracted as the
//! principal eigenvector of each matrix ([`extract_priorities`]), judgment
//! coherence is measured by Saaty's consistency ratio
//! ([`consistency_ratio`]), and per-criterion local priorities (judged
//! pairwise, or normalized directly from measurements with
//! [`normalize_direct`]) are combined into one ranked score per option
//! ([`global_scores`]).
//!
//! Every operation is a pure function over immutable value types: it either
//! returns a result satisfying its invariants (weights non-negative and
//! summing to 1) or fails atomically with an [`Error`].

mod consistency;
mod error;
mod matrix;
mod num;
mod priority;

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

pub use crate::consistency::{consistency_ratio, CR_ACCEPTANCE_THRESHOLD, RANDOM_INDEX};
pub use crate::error::Error;
pub use crate::matrix::{ComparisonMatrix, Judgment};
pub use crate::num::Normalized;
pub use crate::priority::{
    extract_priorities, Priorities, PriorityVector, CONVERGENCE_TOLERANCE, MAX_ITERATIONS,
};

/// Derives a local priority vector from directly measured values instead of
/// pairwise judgments. With `lower_is_better`, scores are proportional to
/// the reciprocal of each value; otherwise to the value itself.
pub fn normalize_direct(
    values: &BTreeMap<String, f64>,
    lower_is_better: bool,
) -> Result<PriorityVector, Error> {
    let mut scores = BTreeMap::new();
    for (item, &value) in values {
        if !(value.is_finite() && value > 0.0) {
            return Err(Error::InvalidMeasurement {
                item: item.clone(),
                value,
            });
        }
        let score = if lower_is_better { value.recip() } else { value };
        scores.insert(item.clone(), score);
    }
    Ok(PriorityVector::from_raw(scores))
}

/// Combines criteria weights with one local priority vector per criterion
/// into a single score per option:
/// `score(option) = sum over criteria of weight(criterion) * local(option)`,
/// renormalized afterward so residual floating-point drift cannot break the
/// sum-to-1 invariant.
///
/// The criteria covered by `weights` must exactly match the keys of
/// `locals`, and every local vector must cover the same option set.
pub fn global_scores(
    weights: &PriorityVector,
    locals: &BTreeMap<String, PriorityVector>,
) -> Result<GlobalScores, Error> {
    let weighted: Vec<String> = weights.items().map(str::to_owned).collect();
    let supplied: Vec<String> = locals.keys().cloned().collect();
    if weighted != supplied {
        return Err(Error::CriteriaMismatch { weighted, supplied });
    }

    let mut options: Option<Vec<String>> = None;
    for (criterion, local) in locals {
        let found: Vec<String> = local.items().map(str::to_owned).collect();
        match &options {
            None => options = Some(found),
            Some(expected) if *expected != found => {
                return Err(Error::OptionMismatch {
                    criterion: criterion.clone(),
                    expected: expected.clone(),
                    found,
                });
            }
            Some(_) => {}
        }
    }

    let mut scores: BTreeMap<String, f64> = options
        .unwrap_or_default()
        .into_iter()
        .map(|option| (option, 0.0))
        .collect();
    for (criterion, local) in locals {
        let weight = weights.weight(criterion).unwrap().as_f64();
        for (option, share) in local.iter() {
            *scores.get_mut(option).unwrap() += weight * share.as_f64();
        }
    }
    debug!(
        criteria = locals.len(),
        options = scores.len(),
        "aggregated global scores"
    );
    Ok(GlobalScores(PriorityVector::from_raw(scores)))
}

/// Final option scores across all criteria, summing to 1.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct GlobalScores(PriorityVector);

impl GlobalScores {
    /// The aggregate score of `option`, if present.
    pub fn score(&self, option: &str) -> Option<Normalized> {
        self.0.weight(option)
    }

    /// The underlying option-to-score vector.
    pub fn as_priorities(&self) -> &PriorityVector {
        &self.0
    }

    /// Options ordered by descending score. Equal scores are ordered
    /// lexicographically by option name, so rankings are deterministic.
    pub fn ranked(&self) -> Vec<(String, Normalized)> {
        let mut entries: Vec<(String, Normalized)> = self
            .0
            .iter()
            .map(|(option, score)| (option.to_owned(), score))
            .collect();
        entries.sort_by(|(a_name, a_score), (b_name, b_score)| {
            b_score.cmp(a_score).then_with(|| a_name.cmp(b_name))
        });
        entries
    }
}

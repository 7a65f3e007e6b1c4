use std::collections::BTreeMap;

use ordered_float::NotNan;
use serde::{Deserialize, Serialize};

use crate::Error;

/// Relative tolerance within which a restated cell value is considered to
/// agree with the value already determined for it.
const RESTATEMENT_TOLERANCE: f64 = 1e-9;

/// A single ratio-scale preference statement: `a` is judged `ratio` times as
/// important (or preferable) as `b`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Judgment {
    pub a: String,
    pub b: String,
    pub ratio: f64,
}

impl Judgment {
    pub fn new(a: impl Into<String>, b: impl Into<String>, ratio: f64) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
            ratio,
        }
    }
}

/// A complete reciprocal pairwise comparison matrix over a fixed item set.
///
/// Invariants: every diagonal cell is 1 and `ratio(a, b) * ratio(b, a) == 1`.
/// Built once from judgments, read-only afterward.
#[derive(Clone, Debug, PartialEq)]
pub struct ComparisonMatrix {
    items: Vec<String>,
    cells: Vec<NotNan<f64>>, // row-major, items.len() ^ 2 entries
}

impl ComparisonMatrix {
    /// Completes a sparse judgment set into a full reciprocal matrix.
    ///
    /// Reflexivity fills the diagonal and reciprocity fills the transpose of
    /// every supplied cell; every remaining cell must be covered by a
    /// judgment. Restating a determined cell is rejected unless the supplied
    /// value agrees with the existing one.
    pub fn from_judgments<I, S>(items: I, judgments: &[Judgment]) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items: Vec<String> = items.into_iter().map(Into::into).collect();
        if items.is_empty() {
            return Err(Error::UnsupportedMatrixSize { size: 0 });
        }
        let mut index: BTreeMap<&str, usize> = BTreeMap::new();
        for (i, item) in items.iter().enumerate() {
            if index.insert(item.as_str(), i).is_some() {
                return Err(Error::DuplicateItem { name: item.clone() });
            }
        }

        let n = items.len();
        let mut cells: Vec<Option<f64>> = vec![None; n * n];
        for i in 0..n {
            cells[i * n + i] = Some(1.0);
        }

        for judgment in judgments {
            if !(judgment.ratio.is_finite() && judgment.ratio > 0.0) {
                return Err(Error::InvalidRatio {
                    a: judgment.a.clone(),
                    b: judgment.b.clone(),
                    ratio: judgment.ratio,
                });
            }
            let row = *index
                .get(judgment.a.as_str())
                .ok_or_else(|| Error::UnknownItem {
                    name: judgment.a.clone(),
                })?;
            let col = *index
                .get(judgment.b.as_str())
                .ok_or_else(|| Error::UnknownItem {
                    name: judgment.b.clone(),
                })?;
            let supplied = judgment.ratio;
            for (r, c, value) in [(row, col, supplied), (col, row, supplied.recip())] {
                let slot = &mut cells[r * n + c];
                match *slot {
                    None => *slot = Some(value),
                    Some(existing) => {
                        if (existing - value).abs() > RESTATEMENT_TOLERANCE * existing.max(value) {
                            // Report the existing value in the judgment's own
                            // (a, b) orientation.
                            let existing = if r == row { existing } else { existing.recip() };
                            return Err(Error::DuplicateJudgment {
                                a: judgment.a.clone(),
                                b: judgment.b.clone(),
                                existing,
                                supplied,
                            });
                        }
                    }
                }
            }
        }

        for i in 0..n {
            for j in 0..n {
                if cells[i * n + j].is_none() {
                    return Err(Error::IncompleteJudgmentSet {
                        a: items[i].clone(),
                        b: items[j].clone(),
                    });
                }
            }
        }
        let cells = cells
            .into_iter()
            .map(|cell| NotNan::new(cell.unwrap()).unwrap())
            .collect();
        Ok(Self { items, cells })
    }

    /// Number of items being compared.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item names, in row/column order.
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// The judged ratio of `a` over `b`, if both items are present.
    pub fn ratio(&self, a: &str, b: &str) -> Option<f64> {
        let row = self.items.iter().position(|item| item == a)?;
        let col = self.items.iter().position(|item| item == b)?;
        Some(self.cells[row * self.items.len() + col].into_inner())
    }

    pub(crate) fn cell(&self, row: usize, col: usize) -> f64 {
        self.cells[row * self.items.len() + col].into_inner()
    }

    /// Matrix-vector product, the inner step of the power iteration.
    pub(crate) fn multiply(&self, vector: &[f64]) -> Vec<f64> {
        let n = self.items.len();
        (0..n)
            .map(|row| (0..n).map(|col| self.cell(row, col) * vector[col]).sum())
            .collect()
    }
}

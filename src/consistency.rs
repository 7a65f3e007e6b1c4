use crate::{ComparisonMatrix, Error};

/// Saaty's random-index constants for matrix sizes 1 through 10: the mean
/// consistency index of randomly generated reciprocal matrices of each size.
pub const RANDOM_INDEX: [f64; 10] = [0.0, 0.0, 0.58, 0.90, 1.12, 1.24, 1.32, 1.41, 1.45, 1.49];

/// The conventional acceptability threshold for a consistency ratio.
/// Interpretation is the caller's policy; nothing in this crate enforces it.
pub const CR_ACCEPTANCE_THRESHOLD: f64 = 0.10;

/// Computes the consistency ratio CR = CI / RI(n) of a comparison matrix,
/// where CI = (lambda_max - n) / (n - 1) and RI is [`RANDOM_INDEX`].
///
/// `lambda_max` is the dominant eigenvalue reported by
/// [`extract_priorities`](crate::extract_priorities) for the same matrix.
/// Matrices of one or two items cannot be inconsistent and always yield 0.
pub fn consistency_ratio(matrix: &ComparisonMatrix, lambda_max: f64) -> Result<f64, Error> {
    let n = matrix.len();
    if n <= 2 {
        return Ok(0.0);
    }
    if n > RANDOM_INDEX.len() {
        return Err(Error::UnsupportedMatrixSize { size: n });
    }
    let consistency_index = (lambda_max - n as f64) / (n as f64 - 1.0);
    // Floating point can put lambda_max marginally below n on perfectly
    // consistent matrices; the ratio itself is never negative.
    Ok((consistency_index / RANDOM_INDEX[n - 1]).max(0.0))
}

#[cfg(test)]
mod test {
    use super::consistency_ratio;
    use crate::{ComparisonMatrix, Error, Judgment};

    #[test]
    fn two_item_matrices_are_always_consistent() {
        for ratio in [1.0, 3.0, 7.5, 9.0] {
            let judgments = vec![Judgment::new("Safety", "Price", ratio)];
            let matrix = ComparisonMatrix::from_judgments(["Safety", "Price"], &judgments).unwrap();
            assert_eq!(consistency_ratio(&matrix, 2.0).unwrap(), 0.0);
        }
    }

    #[test]
    fn lambda_below_n_clamps_to_zero() {
        let judgments = vec![
            Judgment::new("a", "b", 2.0),
            Judgment::new("a", "c", 4.0),
            Judgment::new("b", "c", 2.0),
        ];
        let matrix = ComparisonMatrix::from_judgments(["a", "b", "c"], &judgments).unwrap();
        let ratio = consistency_ratio(&matrix, 3.0 - 1e-14).unwrap();
        assert_eq!(ratio, 0.0);
    }

    #[test]
    fn oversized_matrix_is_rejected() {
        let items: Vec<String> = (0..11).map(|i| format!("item{i:02}")).collect();
        let mut judgments = Vec::new();
        for i in 0..items.len() {
            for j in (i + 1)..items.len() {
                judgments.push(Judgment::new(items[i].clone(), items[j].clone(), 1.0));
            }
        }
        let matrix = ComparisonMatrix::from_judgments(items, &judgments).unwrap();
        assert_eq!(
            consistency_ratio(&matrix, 11.0).unwrap_err(),
            Error::UnsupportedMatrixSize { size: 11 }
        );
    }
}

use thiserror::Error;

/// Everything that can go wrong while deriving priorities. Each failure is
/// detected synchronously and leaves no partial result behind.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A judgment ratio was zero, negative, NaN, or infinite.
    #[error("ratio for ({a}, {b}) must be a positive finite number, got {ratio}")]
    InvalidRatio { a: String, b: String, ratio: f64 },

    /// Reflexivity and reciprocity could not determine every matrix cell.
    #[error("no judgment determines the comparison of {a} against {b}")]
    IncompleteJudgmentSet { a: String, b: String },

    /// A judgment restated an already-determined cell with a different value.
    #[error("conflicting judgments for ({a}, {b}): already {existing}, supplied {supplied}")]
    DuplicateJudgment {
        a: String,
        b: String,
        existing: f64,
        supplied: f64,
    },

    /// A judgment named an item that is not being compared.
    #[error("judgment references unknown item {name:?}")]
    UnknownItem { name: String },

    /// The item list contains the same name twice.
    #[error("item {name:?} appears more than once")]
    DuplicateItem { name: String },

    /// The power iteration hit its iteration cap before converging.
    #[error("eigenvector extraction did not converge within {iterations} iterations")]
    EigenvectorDidNotConverge { iterations: usize },

    /// No random-index constant is defined for this matrix size.
    #[error("no random index is defined for a matrix of size {size}")]
    UnsupportedMatrixSize { size: usize },

    /// A directly-measured value was zero, negative, NaN, or infinite.
    #[error("measurement for {item:?} must be a positive finite number, got {value}")]
    InvalidMeasurement { item: String, value: f64 },

    /// The criteria carrying weights differ from the criteria with local
    /// priority vectors.
    #[error("criteria weights cover {weighted:?} but local vectors cover {supplied:?}")]
    CriteriaMismatch {
        weighted: Vec<String>,
        supplied: Vec<String>,
    },

    /// Local priority vectors do not all cover the same options.
    #[error("options under criterion {criterion:?} are {found:?}, expected {expected:?}")]
    OptionMismatch {
        criterion: String,
        expected: Vec<String>,
        found: Vec<String>,
    },
}

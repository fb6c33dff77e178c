use thiserror::Error;

/// Errors produced by the grid and graph helpers.
///
/// Every operation is a pure function of its input, so none of these are
/// worth retrying.
#[derive(Debug, Error)]
pub enum Error {
    #[error("grid is not rectangular: row {row} has {found} cells, expected {expected}")]
    Shape {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("node `{0}` is not in the graph")]
    MissingNode(String),

    #[error("minimum region size must be at least 1, got {0}")]
    InvalidMinSize(usize),

    #[error("cannot measure an empty region")]
    EmptyRegion,

    #[error("edge {from} -> {to} has invalid weight {weight}")]
    InvalidWeight { from: String, to: String, weight: f64 },

    #[error("cannot parse `{text}` as {target}")]
    Parse { text: String, target: &'static str },

    #[error("invalid pattern: {0}")]
    Regex(#[from] regex::Error),

    #[error("failed to build worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

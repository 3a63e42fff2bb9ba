use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the cohort LTV pipeline.
#[derive(Error, Debug)]
pub enum CohortError {
    /// The input table violates the expected schema: too few columns, an
    /// unparseable purchase date, or a non-numeric sale amount.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// A transaction could not be matched to a cohort, or a cohort with
    /// transactions reported zero members. Signals a defect, not bad input.
    #[error("Unresolved cohort: {0}")]
    UnresolvedCohort(String),

    /// The input table contains a header but no transaction rows.
    #[error("Input contains no transaction rows")]
    EmptyInput,

    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A delimited record could not be read or written.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the cohort crates.
pub type Result<T> = std::result::Result<T, CohortError>;

use thiserror::Error;

/// Application-level error type for collaborator failures.
///
/// The curation/aggregation/extraction/merge core is total over its
/// inputs and never raises; only the edges (GitHub API, filesystem)
/// produce errors. Missing markers, duplicate markers, and unreadable
/// resumes are recoverable conditions logged as warnings, not errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("GitHub API error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

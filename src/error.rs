use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can stop a statistics run.
#[derive(Debug, Error)]
pub enum StatsError {
    #[error("There is no file {}", .path.display())]
    InputNotFound { path: PathBuf },

    #[error("Malformed FASTA input {}: {reason}", .path.display())]
    MalformedInput { path: PathBuf, reason: String },

    /// Zero contigs, or contigs whose combined length is zero.
    #[error("Empty assembly: no bases to compute statistics on")]
    EmptyAssembly,

    #[error("Invalid arguments: {0}")]
    Argument(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to render JSON report: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, StatsError>;

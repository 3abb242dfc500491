//! Error types for the merge engine.

use thiserror::Error;

/// Errors that can occur while fetching and merging rule lists.
#[derive(Error, Debug)]
pub enum RulesError {
    #[error("http error: {0}")]
    Http(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("merge produced no rules; refusing to overwrite previous output")]
    EmptyMerge,

    #[error("merge produced {got} rules, below the configured minimum of {min}")]
    BelowThreshold { got: usize, min: usize },
}

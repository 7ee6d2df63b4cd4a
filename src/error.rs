use thiserror::Error;

/// Errors produced while loading a roadmap dataset.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to parse roadmap json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("node `{name}` has invalid color `{value}`")]
    InvalidColor { name: String, value: String },

    /// `path` lists the child positions leading to the offending node.
    #[error("node at {path:?} has an empty name")]
    EmptyName { path: Vec<usize> },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Failure to load persisted data. Callers recover with a default.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("no entry stored under `{0}`")]
    Missing(String),
    #[error("template `{0}` not found in library")]
    TemplateNotFound(String),
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure to persist data.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("store rejected write to `{key}`: {reason}")]
    Rejected { key: String, reason: String },
    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

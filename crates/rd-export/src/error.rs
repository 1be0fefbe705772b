/// Export failures. None of these leave partial output behind.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("no export backend available")]
    BackendUnavailable,
    #[error("{backend} backend failed: {message}")]
    Backend {
        backend: &'static str,
        message: String,
    },
    #[error("template has no pages to export")]
    EmptyTemplate,
}

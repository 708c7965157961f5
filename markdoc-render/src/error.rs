//! Error types for rendering operations.

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while rendering a document.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
  #[error("Unknown output format '{0}' (expected html, xml or commonmark)")]
  UnknownOutputFormat(String),
  #[error("Failed to serialize document: {0}")]
  Format(#[from] std::fmt::Error),
}

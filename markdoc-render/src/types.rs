//! Types for markdoc-render public API and internal use.
use serde::{Deserialize, Serialize};

/// Result of rendering one document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MarkdownResult {
  /// Rendered output, HTML unless another output format was selected.
  pub html: String,

  /// Title of the document, if found (first H1).
  pub title: Option<String>,

  /// Number of link targets rewritten in the Markdown AST.
  pub links_rewritten: usize,
}

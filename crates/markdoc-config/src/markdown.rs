use markdoc_render::OutputFormat;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Configuration for the Markdown renderer (`[markdown]`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct MarkdownConfig {
  /// Extensions to enable, by name.
  pub extensions: Vec<String>,

  /// Per-extension settings, e.g. `header_ids.prefix`.
  ///
  /// May also be given flat, as `markdown.extension-configs.<ext>.<key>`
  /// keys; those are folded into this map on load.
  pub extension_configs: Map<String, Value>,

  /// Drop raw HTML from rendered documents.
  pub safe_mode: bool,

  /// Serializer for rendered documents (`html`, `xml` or `commonmark`).
  pub output_format: OutputFormat,

  /// Also relativize root-relative anchors written as raw HTML.
  pub relativize_html: bool,
}

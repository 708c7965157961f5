//! Type definitions for the Markdown processor.
//!
//! Contains the core types used by the processor, including:
//! - Configuration options (`MarkdownOptions`) and their builder
//! - The output format selector (`OutputFormat`)
//! - The main processor struct (`MarkdownProcessor`)
//! - The AST transformation trait
//!
//! # Examples
//!
//! ```
//! use markdoc_render::{MarkdownOptions, MarkdownProcessor, PathStyle};
//!
//! let options = MarkdownOptions {
//!   extensions: vec!["table".to_string(), "wikilinks".to_string()],
//!   path_style: PathStyle::Ugly,
//!   ..Default::default()
//! };
//!
//! let processor = MarkdownProcessor::new(options);
//! ```
use std::{fmt, str::FromStr};

use comrak::nodes::AstNode;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{error::RenderError, links::PathStyle};

/// Extension names understood by [`MarkdownOptions::extensions`].
pub const KNOWN_EXTENSIONS: &[&str] = &[
  "autolink",
  "description_lists",
  "footnotes",
  "header_ids",
  "strikethrough",
  "superscript",
  "table",
  "tasklist",
  "wikilinks",
];

/// Options for configuring the Markdown processor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkdownOptions {
  /// Markdown extensions to enable, by name (see [`KNOWN_EXTENSIONS`]).
  pub extensions: Vec<String>,

  /// Per-extension settings, keyed by extension name.
  ///
  /// `{"header_ids": {"prefix": "user-content-"}}` sets the anchor prefix of
  /// the `header_ids` extension.
  pub extension_configs: Map<String, Value>,

  /// Drop raw HTML from the output instead of passing it through.
  pub safe_mode: bool,

  /// Serializer used for the rendered document.
  pub output_format: OutputFormat,

  /// URL convention for rewritten internal links.
  pub path_style: PathStyle,

  /// Also rewrite root-relative `<a href>` found in raw inline HTML.
  /// Only applies to [`OutputFormat::Html`].
  pub relativize_html: bool,
}

impl MarkdownOptions {
  /// Whether the extension called `name` is enabled.
  #[must_use]
  pub fn has_extension(&self, name: &str) -> bool {
    self.extensions.iter().any(|ext| ext == name)
  }

  /// String setting `key` of extension `extension`, if set.
  #[must_use]
  pub fn extension_setting(&self, extension: &str, key: &str) -> Option<&str> {
    self
      .extension_configs
      .get(extension)
      .and_then(|settings| settings.get(key))
      .and_then(Value::as_str)
  }
}

/// Output serializer for rendered documents.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
  /// HTML (XHTML-compatible void elements).
  #[default]
  #[serde(alias = "xhtml", alias = "xhtml1", alias = "html5")]
  Html,
  /// comrak's XML dump of the document tree.
  Xml,
  /// Normalized `CommonMark`.
  #[serde(alias = "markdown")]
  CommonMark,
}

impl FromStr for OutputFormat {
  type Err = RenderError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "html" | "xhtml" | "xhtml1" | "html5" => Ok(Self::Html),
      "xml" => Ok(Self::Xml),
      "commonmark" | "markdown" => Ok(Self::CommonMark),
      other => Err(RenderError::UnknownOutputFormat(other.to_string())),
    }
  }
}

impl fmt::Display for OutputFormat {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      Self::Html => "html",
      Self::Xml => "xml",
      Self::CommonMark => "commonmark",
    };
    f.write_str(name)
  }
}

/// Main Markdown processor.
///
/// Holds only configuration. Everything specific to one document, such as
/// its site path, is passed to [`MarkdownProcessor::render`], so a single
/// processor can be shared between threads rendering different documents.
#[derive(Debug, Clone)]
pub struct MarkdownProcessor {
  pub(crate) options: MarkdownOptions,
}

/// Trait for AST transformations applied between parsing and serialization.
pub trait AstTransformer {
  fn transform<'a>(&self, node: &'a AstNode<'a>);
}

/// Builder for constructing `MarkdownOptions` with method chaining.
#[derive(Debug, Clone, Default)]
pub struct MarkdownOptionsBuilder {
  options: MarkdownOptions,
}

impl MarkdownOptionsBuilder {
  /// Create a new builder with default options.
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Enable a single extension.
  #[must_use]
  pub fn extension<S: Into<String>>(mut self, name: S) -> Self {
    let name = name.into();
    if !self.options.has_extension(&name) {
      self.options.extensions.push(name);
    }
    self
  }

  /// Enable several extensions.
  #[must_use]
  pub fn extensions<I, S>(self, names: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    names.into_iter().fold(self, Self::extension)
  }

  /// Set one extension setting.
  #[must_use]
  pub fn extension_config<V: Into<Value>>(
    mut self,
    extension: &str,
    key: &str,
    value: V,
  ) -> Self {
    let settings = self
      .options
      .extension_configs
      .entry(extension)
      .or_insert_with(|| Value::Object(Map::new()));
    if !settings.is_object() {
      *settings = Value::Object(Map::new());
    }
    if let Value::Object(settings) = settings {
      settings.insert(key.to_string(), value.into());
    }
    self
  }

  /// Replace all extension settings.
  #[must_use]
  pub fn extension_configs(mut self, configs: Map<String, Value>) -> Self {
    self.options.extension_configs = configs;
    self
  }

  /// Drop raw HTML instead of passing it through.
  #[must_use]
  pub const fn safe_mode(mut self, enabled: bool) -> Self {
    self.options.safe_mode = enabled;
    self
  }

  /// Set the output serializer.
  #[must_use]
  pub const fn output_format(mut self, format: OutputFormat) -> Self {
    self.options.output_format = format;
    self
  }

  /// Set the URL convention for rewritten links.
  #[must_use]
  pub const fn path_style(mut self, style: PathStyle) -> Self {
    self.options.path_style = style;
    self
  }

  /// Enable or disable rewriting anchors in raw inline HTML.
  #[must_use]
  pub const fn relativize_html(mut self, enabled: bool) -> Self {
    self.options.relativize_html = enabled;
    self
  }

  /// Build the final `MarkdownOptions`.
  #[must_use]
  pub fn build(self) -> MarkdownOptions {
    self.options
  }
}

//! Core implementation of the Markdown processor.
//!
//! This module contains the main implementation of `MarkdownProcessor`: the
//! parse → transform → serialize pipeline and the mapping from
//! `MarkdownOptions` to comrak options.
use std::{
  collections::BTreeSet,
  path::{Path, PathBuf},
};

use comrak::{
  Arena,
  nodes::{AstNode, NodeHeading, NodeValue},
  options::Options,
  parse_document,
};
use log::{error, trace, warn};
use walkdir::WalkDir;

use super::types::{
  AstTransformer,
  KNOWN_EXTENSIONS,
  MarkdownOptions,
  MarkdownProcessor,
  OutputFormat,
};
use crate::{
  error::RenderResult,
  links::{LinkRewriter, RelativeLinksTransformer, rewrite_html_links},
  types::MarkdownResult,
};

impl MarkdownProcessor {
  /// Create a new `MarkdownProcessor` with the given options.
  ///
  /// Unknown extension names are reported once here and ignored afterwards.
  #[must_use]
  pub fn new(options: MarkdownOptions) -> Self {
    for name in &options.extensions {
      if !KNOWN_EXTENSIONS.contains(&name.as_str()) {
        warn!("Unknown markdown extension '{name}', ignoring");
      }
    }
    Self { options }
  }

  /// Access processor options.
  #[must_use]
  pub const fn options(&self) -> &MarkdownOptions {
    &self.options
  }

  /// Render Markdown for the document at site path `current_path`.
  ///
  /// Serialization failures are logged and produce an empty document; use
  /// [`MarkdownProcessor::try_render`] to handle them.
  #[must_use]
  pub fn render(&self, markdown: &str, current_path: &str) -> MarkdownResult {
    self.try_render(markdown, current_path).unwrap_or_else(|e| {
      error!("Failed to render {current_path}: {e}");
      MarkdownResult {
        html:            String::new(),
        title:           None,
        links_rewritten: 0,
      }
    })
  }

  /// Render Markdown for the document at site path `current_path`.
  ///
  /// Every root-relative link is rewritten relative to `current_path` before
  /// the document is serialized.
  ///
  /// # Errors
  ///
  /// Returns an error if the serializer fails.
  pub fn try_render(
    &self,
    markdown: &str,
    current_path: &str,
  ) -> RenderResult<MarkdownResult> {
    let arena = Arena::new();
    let options = self.comrak_options();
    let root = parse_document(&arena, markdown, &options);

    let rewriter = LinkRewriter::new(self.options.path_style, current_path);
    let links_rewritten = RelativeLinksTransformer::new(rewriter).rewrite(root);
    let title = extract_title(root);

    let mut output = String::new();
    match self.options.output_format {
      OutputFormat::Html => comrak::format_html(root, &options, &mut output)?,
      OutputFormat::Xml => comrak::format_xml(root, &options, &mut output)?,
      OutputFormat::CommonMark => {
        comrak::format_commonmark(root, &options, &mut output)?;
      },
    }

    if self.options.relativize_html
      && self.options.output_format == OutputFormat::Html
    {
      output = rewrite_html_links(&output, &rewriter);
    }

    trace!(
      "Rendered {current_path}: {} bytes, {links_rewritten} links rewritten",
      output.len()
    );

    Ok(MarkdownResult {
      html: output,
      title,
      links_rewritten,
    })
  }

  /// Render with extra AST transformations applied after link rewriting.
  ///
  /// # Errors
  ///
  /// Returns an error if the serializer fails.
  pub fn render_with(
    &self,
    markdown: &str,
    current_path: &str,
    transformers: &[&dyn AstTransformer],
  ) -> RenderResult<String> {
    let arena = Arena::new();
    let options = self.comrak_options();
    let root = parse_document(&arena, markdown, &options);

    let rewriter = LinkRewriter::new(self.options.path_style, current_path);
    RelativeLinksTransformer::new(rewriter).transform(root);
    for transformer in transformers {
      transformer.transform(root);
    }

    let mut html = String::new();
    comrak::format_html(root, &options, &mut html)?;
    Ok(html)
  }

  /// Build comrak options from `MarkdownOptions`.
  fn comrak_options(&self) -> Options<'_> {
    let mut options = Options::default();
    for name in &self.options.extensions {
      match name.as_str() {
        "autolink" => options.extension.autolink = true,
        "description_lists" => options.extension.description_lists = true,
        "footnotes" => options.extension.footnotes = true,
        "header_ids" => {
          let prefix = self
            .options
            .extension_setting("header_ids", "prefix")
            .unwrap_or_default();
          options.extension.header_id_prefix = Some(prefix.to_string());
        },
        "strikethrough" => options.extension.strikethrough = true,
        "superscript" => options.extension.superscript = true,
        "table" => options.extension.table = true,
        "tasklist" => options.extension.tasklist = true,
        "wikilinks" => options.extension.wikilinks_title_after_pipe = true,
        _ => {},
      }
    }
    options.render.r#unsafe = !self.options.safe_mode;
    options
  }
}

/// Text of the first level-1 heading.
fn extract_title<'a>(root: &'a AstNode<'a>) -> Option<String> {
  root.descendants().find_map(|node| {
    match node.data.borrow().value {
      NodeValue::Heading(NodeHeading { level: 1, .. }) => {
        Some(extract_inline_text(node))
      },
      _ => None,
    }
  })
}

/// Extract all inline text from a heading node.
pub fn extract_inline_text<'a>(node: &'a AstNode<'a>) -> String {
  let mut text = String::new();
  for child in node.children() {
    match &child.data.borrow().value {
      NodeValue::Text(t) => text.push_str(t),
      NodeValue::Code(t) => text.push_str(&t.literal),
      NodeValue::Link(..)
      | NodeValue::WikiLink(..)
      | NodeValue::Emph
      | NodeValue::Strong
      | NodeValue::Strikethrough
      | NodeValue::Superscript => text.push_str(&extract_inline_text(child)),
      _ => {},
    }
  }
  text
}

/// Whether `path` has one of `extensions` (written with a leading dot, as in
/// `.md`).
#[must_use]
pub fn is_document(path: &Path, extensions: &BTreeSet<String>) -> bool {
  path
    .extension()
    .and_then(|ext| ext.to_str())
    .is_some_and(|ext| extensions.contains(&format!(".{ext}")))
}

/// Collect all documents under `input_dir`, sorted by path.
pub fn collect_documents(
  input_dir: &Path,
  extensions: &BTreeSet<String>,
) -> Vec<PathBuf> {
  let mut files: Vec<PathBuf> = WalkDir::new(input_dir)
    .follow_links(true)
    .into_iter()
    .filter_map(Result::ok)
    .filter(|entry| entry.file_type().is_file())
    .map(walkdir::DirEntry::into_path)
    .filter(|path| is_document(path, extensions))
    .collect();
  files.sort();

  trace!("Found {} documents to process", files.len());
  files
}

/// Site path of the document at `file`, relative to `input_dir`.
///
/// The extension is dropped and path separators become `/`, so
/// `wiki/guide/install.md` under `wiki` maps to `/guide/install`. Files
/// outside `input_dir` map to their bare stem.
#[must_use]
pub fn site_path(input_dir: &Path, file: &Path) -> String {
  let relative = file.strip_prefix(input_dir).unwrap_or(file);
  let stem = relative.with_extension("");
  let segments: Vec<String> = stem
    .components()
    .filter_map(|component| match component {
      std::path::Component::Normal(part) => {
        Some(part.to_string_lossy().into_owned())
      },
      _ => None,
    })
    .collect();
  format!("/{}", segments.join("/"))
}

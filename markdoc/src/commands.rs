//! Handlers for the markdoc subcommands.
//!
//! Each handler takes the loaded [`Config`] by reference and writes its
//! output to the given writer, so the binary and the tests drive them the
//! same way.
use std::{
  fs,
  io::Write,
  path::{Path, PathBuf},
};

use color_eyre::eyre::{Context, Result, bail};
use log::{debug, info};
use markdoc_config::Config;
use markdoc_render::{
  LinkRewriter,
  MarkdownResult,
  processor::{collect_documents, process_with_recovery, site_path},
};

/// Site path a document is rendered at.
///
/// An explicit `path` wins. Otherwise the path is derived from `file`,
/// relative to `input_dir` when given, or from the bare file name.
#[must_use]
pub fn document_site_path(
  file: &Path,
  path: Option<&str>,
  input_dir: Option<&Path>,
) -> String {
  if let Some(path) = path {
    return if path.starts_with('/') {
      path.to_string()
    } else {
      format!("/{path}")
    };
  }

  match input_dir {
    Some(input_dir) => site_path(input_dir, file),
    None => {
      let name = file.file_name().map_or_else(PathBuf::new, PathBuf::from);
      site_path(Path::new(""), &name)
    },
  }
}

/// Render one document with the configured processor.
///
/// # Errors
///
/// Returns an error if `file` cannot be read.
pub fn render_file(
  config: &Config,
  file: &Path,
  path: Option<&str>,
  input_dir: Option<&Path>,
) -> Result<MarkdownResult> {
  let content = fs::read_to_string(file)
    .wrap_err_with(|| format!("Failed to read {}", file.display()))?;
  let current_path = document_site_path(file, path, input_dir);
  debug!("Rendering {} at {current_path}", file.display());

  let result = process_with_recovery(&config.processor(), &content, &current_path);
  info!(
    "Rendered {} ({} links rewritten)",
    file.display(),
    result.links_rewritten
  );
  Ok(result)
}

/// Write rendered output to `output`, creating parent directories.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub fn write_output(output: &Path, contents: &str) -> Result<()> {
  if let Some(parent) = output.parent() {
    if !parent.as_os_str().is_empty() && !parent.exists() {
      fs::create_dir_all(parent).wrap_err_with(|| {
        format!("Failed to create directory: {}", parent.display())
      })?;
      info!("Created directory: {}", parent.display());
    }
  }

  fs::write(output, contents)
    .wrap_err_with(|| format!("Failed to write {}", output.display()))
}

/// Write `contents` to `out`, terminated by a newline.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn emit<W: Write>(out: &mut W, contents: &str) -> Result<()> {
  if contents.ends_with('\n') {
    out.write_all(contents.as_bytes())?;
  } else {
    writeln!(out, "{contents}")?;
  }
  Ok(())
}

/// Print each href as a link in the document at `from` would carry it.
///
/// Hrefs that are not root-relative are printed unchanged.
///
/// # Errors
///
/// Returns an error if `from` is not a site path or writing fails.
pub fn relativize_hrefs<W: Write>(
  config: &Config,
  from: &str,
  hrefs: &[String],
  out: &mut W,
) -> Result<()> {
  if !from.starts_with('/') {
    bail!("Current document path must start with '/': {from}");
  }

  let rewriter = LinkRewriter::new(config.path_style(), from);
  for href in hrefs {
    let rewritten = rewriter.rewrite_href(href);
    writeln!(out, "{}", rewritten.as_deref().unwrap_or(href))?;
  }
  Ok(())
}

/// Print every document under `dir`, one per line, with its site path.
///
/// # Errors
///
/// Returns an error if `dir` is not a directory or writing fails.
pub fn list_documents<W: Write>(
  config: &Config,
  dir: &Path,
  out: &mut W,
) -> Result<()> {
  if !dir.is_dir() {
    bail!("Not a directory: {}", dir.display());
  }

  let documents = collect_documents(dir, &config.document_extensions);
  info!("Found {} documents in {}", documents.len(), dir.display());
  for document in documents {
    writeln!(
      out,
      "{}\t{}",
      site_path(dir, &document),
      document.display()
    )?;
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, reason = "Fine in tests")]

  use super::*;

  #[test]
  fn test_document_site_path_explicit() {
    let file = Path::new("wiki/guide/install.md");
    assert_eq!(
      document_site_path(file, Some("/docs/install"), None),
      "/docs/install"
    );
    assert_eq!(document_site_path(file, Some("docs/x"), None), "/docs/x");
  }

  #[test]
  fn test_document_site_path_derived() {
    let file = Path::new("wiki/guide/install.md");
    assert_eq!(
      document_site_path(file, None, Some(Path::new("wiki"))),
      "/guide/install"
    );
    assert_eq!(document_site_path(file, None, None), "/install");
  }

  #[test]
  fn test_emit_adds_single_newline() {
    let mut out = Vec::new();
    emit(&mut out, "<p>x</p>").unwrap();
    emit(&mut out, "<p>y</p>\n").unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "<p>x</p>\n<p>y</p>\n");
  }

  #[test]
  fn test_relativize_rejects_relative_origin() {
    let mut out = Vec::new();
    let result = relativize_hrefs(
      &Config::default(),
      "a/b",
      &["/a/c".to_string()],
      &mut out,
    );
    assert!(result.is_err());
  }
}

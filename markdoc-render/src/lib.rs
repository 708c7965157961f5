//! # markdoc-render - Markdown rendering with site-relative links
//!
//! Renders wiki documents with `comrak` and rewrites every internal link
//! written against the site root (`/guide/install`) into a path relative to
//! the document being rendered, optionally in the "ugly" explicit-filename
//! URL convention.
//!
//! ## Quick Start
//!
//! ```rust
//! use markdoc_render::{MarkdownOptions, MarkdownProcessor};
//!
//! let processor = MarkdownProcessor::new(MarkdownOptions::default());
//! let result = processor.render("# Setup\n\nSee [install](/guide/install).", "/guide/setup");
//!
//! assert!(result.html.contains(r#"href="install""#));
//! assert_eq!(result.title.as_deref(), Some("Setup"));
//! ```
//!
//! ## Single links
//!
//! ```rust
//! use markdoc_render::{PathStyle, apply_policy, relativize};
//!
//! assert_eq!(relativize(PathStyle::Pretty, "/a/b/c", "/a/x/y"), "../x/y");
//! assert_eq!(apply_policy(PathStyle::Ugly, "/section/"), "/section/index.html");
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use markdoc_render::{MarkdownOptionsBuilder, MarkdownProcessor, PathStyle};
//!
//! let options = MarkdownOptionsBuilder::new()
//!   .extensions(["table", "wikilinks"])
//!   .path_style(PathStyle::Ugly)
//!   .build();
//!
//! let processor = MarkdownProcessor::new(options);
//! ```

pub mod error;
pub mod links;
pub mod processor;
mod types;

pub use crate::{
  error::{RenderError, RenderResult},
  links::{
    LinkRewriter,
    LinkTarget,
    PathStyle,
    RelativeLinksTransformer,
    apply_policy,
    relativize,
  },
  processor::{
    AstTransformer,
    MarkdownOptions,
    MarkdownOptionsBuilder,
    MarkdownProcessor,
    OutputFormat,
  },
  types::MarkdownResult,
};

//! Markdown processing module.
//!
//! - [`core`]: Main processor implementation and rendering pipeline
//! - [`process`]: High-level processing functions with error recovery
//! - [`types`]: Core type definitions and configuration structures
pub mod core;
pub mod process;
pub mod types;

pub use core::{collect_documents, extract_inline_text, is_document, site_path};

pub use process::process_with_recovery;
pub use types::{
  AstTransformer,
  KNOWN_EXTENSIONS,
  MarkdownOptions,
  MarkdownOptionsBuilder,
  MarkdownProcessor,
  OutputFormat,
};

//! Relative link generation for rendered documents.
//!
//! Authors write internal links against the site root (`/guide/install`).
//! Output is served from arbitrary prefixes and opened straight off disk, so
//! every root-relative link is rewritten relative to the page it appears on.
//!
//! - [`path`]: the pure path algebra ([`relativize`], [`apply_policy`])
//! - [`rewrite`]: the per-document [`LinkRewriter`] and the [`LinkTarget`]
//!   capability it works through
//! - [`ast`]: the Markdown AST pass
//! - [`html`]: the same pass over rendered HTML
pub mod ast;
pub mod html;
pub mod path;
pub mod rewrite;

pub use ast::{AstLink, RelativeLinksTransformer};
pub use html::rewrite_html_links;
pub use path::{PathStyle, apply_policy, is_root_relative, relativize};
pub use rewrite::{LinkRewriter, LinkTarget};

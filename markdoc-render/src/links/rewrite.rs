//! Render-scoped link rewriting over any link-bearing tree.
use log::trace;

use super::path::{PathStyle, apply_policy, is_root_relative, relativize};

/// A node that carries a link target.
///
/// This is the only capability the rewrite pass needs from a document tree,
/// so it works the same over the Markdown AST and a parsed HTML DOM.
pub trait LinkTarget {
  /// Current target, or `None` if the node has none.
  fn href(&self) -> Option<String>;

  /// Replace the target.
  fn set_href(&mut self, href: String);
}

/// Rewrites root-relative links for a single document.
///
/// A rewriter is bound to the path of the document being rendered and must
/// not outlive that render. It holds no other state, so concurrent renders
/// each bind their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkRewriter<'p> {
  style:        PathStyle,
  current_path: &'p str,
}

impl<'p> LinkRewriter<'p> {
  /// Bind a rewriter to the site path of the document being rendered.
  #[must_use]
  pub const fn new(style: PathStyle, current_path: &'p str) -> Self {
    Self {
      style,
      current_path,
    }
  }

  /// The document path links are made relative to.
  #[must_use]
  pub const fn current_path(&self) -> &'p str {
    self.current_path
  }

  /// The URL convention applied to rewritten links.
  #[must_use]
  pub const fn style(&self) -> PathStyle {
    self.style
  }

  /// Rewritten value for `href`, or `None` if it is not root-relative.
  ///
  /// Fragments (`#top`), relative links and anything with a scheme are out
  /// of scope. Because a rewritten link is never root-relative, a second
  /// pass over the same tree changes nothing.
  #[must_use]
  pub fn rewrite_href(&self, href: &str) -> Option<String> {
    is_root_relative(href)
      .then(|| relativize(self.style, self.current_path, href))
  }

  /// Rewritten value for a wiki link target, or `None` if it stays as is.
  ///
  /// Root-relative targets are relativized like any other link. Page names
  /// (`Some Page`) only get the URL policy applied.
  #[must_use]
  pub fn rewrite_wiki_target(&self, target: &str) -> Option<String> {
    let rewritten = self
      .rewrite_href(target)
      .unwrap_or_else(|| apply_policy(self.style, target));
    (rewritten != target).then_some(rewritten)
  }

  /// Rewrite every root-relative link in `links`, returning how many were
  /// changed.
  pub fn rewrite_links<I, L>(&self, links: I) -> usize
  where
    I: IntoIterator<Item = L>,
    L: LinkTarget,
  {
    let mut rewritten = 0;
    for mut link in links {
      let Some(href) = link.href() else {
        continue;
      };
      if let Some(relative) = self.rewrite_href(&href) {
        trace!("Rewriting link {href} -> {relative} (from {})", self.current_path);
        link.set_href(relative);
        rewritten += 1;
      }
    }
    rewritten
  }
}

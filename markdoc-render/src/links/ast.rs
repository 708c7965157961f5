//! Link rewriting over the comrak Markdown AST.
use comrak::nodes::{AstNode, NodeValue};
use log::debug;

use super::rewrite::{LinkRewriter, LinkTarget};
use crate::processor::AstTransformer;

/// A `Link` node in the Markdown AST.
pub struct AstLink<'a> {
  node: &'a AstNode<'a>,
}

impl<'a> AstLink<'a> {
  /// Wrap `node` if it is an inline link.
  #[must_use]
  pub fn new(node: &'a AstNode<'a>) -> Option<Self> {
    matches!(node.data.borrow().value, NodeValue::Link(..))
      .then_some(Self { node })
  }
}

impl LinkTarget for AstLink<'_> {
  fn href(&self) -> Option<String> {
    match &self.node.data.borrow().value {
      NodeValue::Link(link) => Some(link.url.clone()),
      _ => None,
    }
  }

  fn set_href(&mut self, href: String) {
    let mut data = self.node.data.borrow_mut();
    if let NodeValue::Link(ref mut link) = data.value {
      link.url = href;
    }
  }
}

/// AST pass that makes root-relative links relative to the current
/// document.
///
/// Runs once per render, after parsing and before serialization. Only link
/// targets change; node structure, other node kinds and link titles are
/// left alone.
#[derive(Debug, Clone, Copy)]
pub struct RelativeLinksTransformer<'p> {
  rewriter: LinkRewriter<'p>,
}

impl<'p> RelativeLinksTransformer<'p> {
  #[must_use]
  pub const fn new(rewriter: LinkRewriter<'p>) -> Self {
    Self { rewriter }
  }

  /// Rewrite the tree under `root` in place and hand the same tree back.
  pub fn run<'a>(&self, root: &'a AstNode<'a>) -> &'a AstNode<'a> {
    self.rewrite(root);
    root
  }

  /// Rewrite the tree under `root` in place, returning the number of link
  /// and wiki link targets changed.
  pub fn rewrite<'a>(&self, root: &'a AstNode<'a>) -> usize {
    let links = self
      .rewriter
      .rewrite_links(root.descendants().filter_map(AstLink::new));
    let wikilinks = self.rewrite_wikilinks(root);

    if links + wikilinks > 0 {
      debug!(
        "Relativized {links} links and {wikilinks} wiki links for {}",
        self.rewriter.current_path()
      );
    }
    links + wikilinks
  }

  fn rewrite_wikilinks<'a>(&self, root: &'a AstNode<'a>) -> usize {
    let mut rewritten = 0;
    for node in root.descendants() {
      let mut data = node.data.borrow_mut();
      if let NodeValue::WikiLink(ref mut link) = data.value {
        if let Some(target) = self.rewriter.rewrite_wiki_target(&link.url) {
          link.url = target;
          rewritten += 1;
        }
      }
    }
    rewritten
  }
}

impl AstTransformer for RelativeLinksTransformer<'_> {
  fn transform<'a>(&self, node: &'a AstNode<'a>) {
    self.rewrite(node);
  }
}

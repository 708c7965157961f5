//! Link rewriting over rendered HTML.
//!
//! Anchors that reach the output as raw inline HTML never appear as `Link`
//! nodes in the Markdown AST. This pass catches them on the serialized
//! document with the same rules.
use kuchikikiki::{ElementData, NodeDataRef, NodeRef};
use log::error;
use markup5ever::{QualName, local_name, ns};
use tendril::TendrilSink;

use super::rewrite::{LinkRewriter, LinkTarget};

/// An `<a href>` element in a parsed HTML document.
pub struct HtmlLink(NodeDataRef<ElementData>);

impl LinkTarget for HtmlLink {
  fn href(&self) -> Option<String> {
    self
      .0
      .attributes
      .borrow()
      .get(local_name!("href"))
      .map(ToString::to_string)
  }

  fn set_href(&mut self, href: String) {
    self
      .0
      .attributes
      .borrow_mut()
      .insert(local_name!("href"), href);
  }
}

/// Rewrite every root-relative `<a href>` in an HTML fragment.
///
/// The input is returned untouched when nothing needed rewriting, so running
/// this twice with the same rewriter yields the same string as running it
/// once.
#[must_use]
pub fn rewrite_html_links(html: &str, rewriter: &LinkRewriter<'_>) -> String {
  if html.is_empty() {
    return String::new();
  }

  let context = QualName::new(None, ns!(html), local_name!("body"));
  let document = kuchikikiki::parse_fragment(context, Vec::new()).one(html);
  let Ok(anchors) = document.select("a[href]") else {
    error!("Failed to compile anchor selector, leaving HTML untouched");
    return html.to_string();
  };

  if rewriter.rewrite_links(anchors.map(HtmlLink)) == 0 {
    return html.to_string();
  }

  serialize_fragment(&document).unwrap_or_else(|| html.to_string())
}

/// Serialize a parsed fragment without the `<html>` root the fragment parser
/// wraps it in.
fn serialize_fragment(document: &NodeRef) -> Option<String> {
  let root = document.first_child()?;
  let mut out = Vec::new();
  for child in root.children() {
    child.serialize(&mut out).ok()?;
  }
  String::from_utf8(out).ok()
}

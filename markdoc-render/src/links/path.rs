//! Pure path algebra for site links.
//!
//! A site path such as `/guide/install` is split into segments after its
//! leading slashes are dropped. A trailing slash produces a final empty
//! segment, which is what distinguishes a directory (`/guide/`) from a page
//! (`/guide`). Both functions here are total: degenerate input degrades to a
//! best-effort segment list instead of failing.
use serde::{Deserialize, Serialize};

/// URL convention used for generated internal links.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum PathStyle {
  /// Directory-style links (`/section/page/`), left as written.
  #[default]
  Pretty,
  /// Explicit filenames (`/section/page.html`, `/section/index.html`).
  Ugly,
}

impl PathStyle {
  /// Whether links get explicit `.html` filenames.
  #[must_use]
  pub const fn is_ugly(self) -> bool {
    matches!(self, Self::Ugly)
  }
}

impl From<bool> for PathStyle {
  fn from(use_ugly_paths: bool) -> Self {
    if use_ugly_paths { Self::Ugly } else { Self::Pretty }
  }
}

/// Whether `href` is resolved against the site root.
#[must_use]
pub fn is_root_relative(href: &str) -> bool {
  href.starts_with('/')
}

/// Rewrite a root-relative `href` so it resolves the same way from the
/// document at `current_path`.
///
/// The current path names a page, so its last segment is never climbed out
/// of: `/a/b/c` sits in `/a/b/`. The result never starts with `/`, and a
/// link to the current directory collapses to `./`. A `?query` or
/// `#fragment` is split off first and appended again after the URL policy of
/// `style` is applied to the path.
///
/// # Examples
///
/// ```
/// use markdoc_render::links::{PathStyle, relativize};
///
/// assert_eq!(relativize(PathStyle::Pretty, "/a/b/c", "/a/x/y"), "../x/y");
/// assert_eq!(relativize(PathStyle::Pretty, "/a/b/c", "/a/b/"), "./");
/// assert_eq!(relativize(PathStyle::Ugly, "/a/b/c", "/d"), "../../d.html");
/// assert_eq!(relativize(PathStyle::Ugly, "/a/b/c", "/a/b/#top"), "./index.html#top");
/// ```
#[must_use]
pub fn relativize(style: PathStyle, current_path: &str, href: &str) -> String {
  let (path, suffix) = split_suffix(href);
  let current = segments(current_path);
  let target = segments(path);

  let shared = common_prefix_len(&current, &target);
  let climbs = current.len().saturating_sub(shared + 1);

  let mut relative = vec![".."; climbs];
  relative.extend_from_slice(&target[shared..]);

  let relative = if !relative.is_empty() && relative != [""] {
    relative.join("/")
  } else if !suffix.is_empty() && target == current {
    // `/a/b#x` from `/a/b` stays on the current page.
    target.last().copied().unwrap_or_default().to_string()
  } else {
    String::new()
  };

  if relative.is_empty() {
    return format!("{}{suffix}", apply_policy(style, "./"));
  }
  format!("{}{suffix}", apply_policy(style, &relative))
}

/// Apply the pretty/ugly URL convention to a single link.
///
/// In [`PathStyle::Pretty`] every link is returned unchanged. In
/// [`PathStyle::Ugly`] a directory link gets `index.html` and an
/// extensionless page link gets `.html`. Links carrying a scheme (anything
/// with a `:`) and links to files that already have an extension are never
/// touched. A trailing `?query` or `#fragment` stays after the inserted
/// filename.
///
/// # Examples
///
/// ```
/// use markdoc_render::links::{PathStyle, apply_policy};
///
/// assert_eq!(apply_policy(PathStyle::Ugly, "/section/"), "/section/index.html");
/// assert_eq!(apply_policy(PathStyle::Ugly, "/section/page"), "/section/page.html");
/// assert_eq!(apply_policy(PathStyle::Ugly, "/files/report.pdf"), "/files/report.pdf");
/// assert_eq!(apply_policy(PathStyle::Pretty, "/section/page"), "/section/page");
/// ```
#[must_use]
pub fn apply_policy(style: PathStyle, href: &str) -> String {
  if !style.is_ugly() || href.contains(':') {
    return href.to_string();
  }

  let (path, suffix) = split_suffix(href);
  if path.is_empty() {
    return href.to_string();
  }
  if path.ends_with('/') {
    return format!("{path}index.html{suffix}");
  }
  if has_extension(path) {
    return href.to_string();
  }
  format!("{path}.html{suffix}")
}

fn segments(path: &str) -> Vec<&str> {
  path.trim_start_matches('/').split('/').collect()
}

/// Positional prefix: stops at the first differing segment.
fn common_prefix_len(a: &[&str], b: &[&str]) -> usize {
  a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

/// Split `page?query#frag` into `page` and `?query#frag`.
fn split_suffix(href: &str) -> (&str, &str) {
  href
    .find(['?', '#'])
    .map_or((href, ""), |idx| href.split_at(idx))
}

/// Only the final segment can carry an extension, and leading dots on it
/// (`.htaccess`) do not start one.
fn has_extension(path: &str) -> bool {
  let file_name = path.rsplit('/').next().unwrap_or(path);
  file_name.trim_start_matches('.').contains('.')
}

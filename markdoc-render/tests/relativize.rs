use markdoc_render::{PathStyle, apply_policy, relativize};

/// Every site path up to three segments deep over a two-letter alphabet,
/// as a page and as a directory, plus the root.
fn site_paths() -> Vec<String> {
  let mut paths = vec!["/".to_string()];
  let mut frontier = vec![String::new()];
  for _ in 0..3 {
    let mut next = Vec::new();
    for prefix in &frontier {
      for segment in ["a", "b"] {
        let path = format!("{prefix}/{segment}");
        paths.push(path.clone());
        paths.push(format!("{path}/"));
        next.push(path);
      }
    }
    frontier = next;
  }
  paths
}

fn segments(path: &str) -> Vec<&str> {
  path.trim_start_matches('/').split('/').collect()
}

/// Resolve `relative` the way a browser would from the page `current`.
fn resolve(current: &str, relative: &str) -> String {
  let mut dir = segments(current);
  dir.pop();
  for segment in relative.split('/') {
    match segment {
      ".." => {
        dir.pop();
      },
      "." => {},
      other => dir.push(other),
    }
  }
  format!("/{}", dir.join("/"))
}

#[test]
fn test_relative_links_resolve_to_their_target() {
  let paths = site_paths();
  let mut checked = 0;

  for current in &paths {
    for href in &paths {
      // When one path is an ancestor of the other the shorter one names a
      // page and a directory at once; those collapse to `./` or a bare
      // child name and are covered by the unit tests.
      let (from, to) = (segments(current), segments(href));
      if from.starts_with(&to) || to.starts_with(&from) {
        continue;
      }

      let relative = relativize(PathStyle::Pretty, current, href);
      assert_eq!(
        resolve(current, &relative),
        *href,
        "{current} -> {href} gave {relative}"
      );
      checked += 1;
    }
  }

  assert!(checked > 500, "only {checked} pairs checked");
}

#[test]
fn test_relative_links_never_absolute_or_empty() {
  let paths = site_paths();
  for current in &paths {
    for href in &paths {
      for style in [PathStyle::Pretty, PathStyle::Ugly] {
        let relative = relativize(style, current, href);
        assert!(!relative.is_empty(), "{current} -> {href}");
        assert!(!relative.starts_with('/'), "{current} -> {href}: {relative}");
      }
    }
  }
}

#[test]
fn test_ugly_relativize_is_policy_over_pretty() {
  let paths = site_paths();
  for current in &paths {
    for href in &paths {
      assert_eq!(
        relativize(PathStyle::Ugly, current, href),
        apply_policy(PathStyle::Ugly, &relativize(PathStyle::Pretty, current, href)),
      );
    }
  }
}

#[test]
fn test_directory_of_current_page_is_dot_slash() {
  for current in ["/a", "/a/b", "/a/b/c", "/x/y/z/w"] {
    let dir = &current[..=current.rfind('/').unwrap_or(0)];
    assert_eq!(relativize(PathStyle::Pretty, current, dir), "./", "{current}");
    assert_eq!(
      relativize(PathStyle::Ugly, current, dir),
      "./index.html",
      "{current}"
    );
  }
}

#[test]
fn test_documented_examples() {
  let pretty = PathStyle::Pretty;
  assert_eq!(relativize(pretty, "/a/b/c", "/a/b/d"), "d");
  assert_eq!(relativize(pretty, "/a/b/c", "/a/x/y"), "../x/y");
  assert_eq!(relativize(pretty, "/a/b/c", "/d"), "../../d");

  let ugly = PathStyle::Ugly;
  assert_eq!(apply_policy(ugly, "/section/"), "/section/index.html");
  assert_eq!(apply_policy(ugly, "/section/page"), "/section/page.html");
  assert_eq!(apply_policy(ugly, "/section/page.pdf"), "/section/page.pdf");
  assert_eq!(apply_policy(ugly, "mailto:a@b.com"), "mailto:a@b.com");
}

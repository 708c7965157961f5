//! High-level processing functions with error recovery.
use log::error;

use super::types::MarkdownProcessor;
use crate::types::MarkdownResult;

/// Render one document, containing any panic raised while doing so.
///
/// # Arguments
///
/// * `processor` - The configured markdown processor
/// * `content` - The raw markdown content to process
/// * `current_path` - Site path of the document, used as link origin
///
/// # Returns
///
/// A `MarkdownResult`, or an error block if rendering panicked
#[must_use]
pub fn process_with_recovery(
  processor: &MarkdownProcessor,
  content: &str,
  current_path: &str,
) -> MarkdownResult {
  match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
    processor.render(content, current_path)
  })) {
    Ok(result) => result,
    Err(panic_err) => {
      error!("Panic while rendering {current_path}: {panic_err:?}");
      MarkdownResult {
        html:            "<div class=\"error\">Critical error processing \
                          markdown content</div>"
          .to_string(),
        title:           None,
        links_rewritten: 0,
      }
    },
  }
}

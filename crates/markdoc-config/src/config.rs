use std::{
  collections::BTreeSet,
  fs,
  path::{Path, PathBuf},
};

use markdoc_render::{
  MarkdownOptions,
  MarkdownProcessor,
  OutputFormat,
  PathStyle,
  processor::is_document,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
  error::ConfigError,
  flatten::{
    expand_dotted_keys,
    merge_values,
    parse_scalar,
    unflatten_extension_configs,
  },
  markdown::MarkdownConfig,
};

/// File names searched for in the wiki root when no config file is given.
const CONFIG_FILENAMES: &[&str] =
  &["markdoc.toml", "markdoc.json", ".markdoc.toml", ".markdoc.json"];

const EXTENSION_CONFIGS_PREFIX: &str = "markdown.extension-configs.";

/// Configuration for a markdoc wiki.
///
/// [`Config`] is built once per run, from defaults, config files and
/// `--config KEY=VALUE` overrides, and then only read. Keys are kebab-case
/// and may be written nested (`[markdown]` tables) or flat
/// (`"markdown.safe-mode" = true`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
  /// Emit explicit `.html` filenames in internal links.
  pub use_ugly_paths: bool,

  /// File extensions (with leading dot) that mark a file as a document.
  pub document_extensions: BTreeSet<String>,

  /// Markdown renderer settings.
  pub markdown: MarkdownConfig,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      use_ugly_paths:      false,
      document_extensions: [".md", ".mdown", ".markdown", ".wiki", ".text"]
        .into_iter()
        .map(String::from)
        .collect(),
      markdown:            MarkdownConfig::default(),
    }
  }
}

impl Config {
  /// Load configuration from a file (TOML or JSON).
  ///
  /// # Arguments
  ///
  /// * `path` - Path to the configuration file.
  ///
  /// # Errors
  ///
  /// Returns [`ConfigError::Io`] if the file cannot be read,
  /// [`ConfigError::Toml`] or [`ConfigError::Serde`] if it does not parse, and
  /// [`ConfigError::Config`] for an unsupported format.
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
    Self::from_value(read_config_value(path.as_ref())?)
  }

  /// Build configuration from an already parsed document.
  ///
  /// Dotted keys are expanded before deserialization.
  ///
  /// # Errors
  ///
  /// Returns an error if a known key has a value of the wrong type.
  pub fn from_value(value: Value) -> Result<Self, ConfigError> {
    let mut config: Self = serde_json::from_value(expand_dotted_keys(value))?;
    config.normalize();
    Ok(config)
  }

  /// Load configuration from files and CLI overrides, merging them.
  ///
  /// Files are merged in order, later files overriding earlier ones key by
  /// key. With no files given, a config file in `root` is used if one
  /// exists. Overrides are applied last.
  ///
  /// # Errors
  ///
  /// Returns an error if a file cannot be loaded or an override is invalid.
  pub fn load(
    config_files: &[PathBuf],
    config_overrides: &[String],
    root: &Path,
  ) -> Result<Self, ConfigError> {
    let mut merged = Value::Object(serde_json::Map::new());

    if config_files.is_empty() {
      if let Some(discovered) = Self::find_config_file(root) {
        log::info!("Using discovered config file: {}", discovered.display());
        let value = read_config_value(&discovered).map_err(|e| {
          ConfigError::Config(format!(
            "Failed to load config from {}: {}",
            discovered.display(),
            e
          ))
        })?;
        merge_values(&mut merged, value);
      }
    } else {
      for config_path in config_files {
        let value = read_config_value(config_path).map_err(|e| {
          ConfigError::Config(format!(
            "Failed to load config from {}: {}",
            config_path.display(),
            e
          ))
        })?;
        merge_values(&mut merged, value);
      }

      if config_files.len() > 1 {
        log::info!("Loaded and merged {} config files", config_files.len());
      }
    }

    let mut config = Self::from_value(merged)?;
    if !config_overrides.is_empty() {
      config.apply_overrides(config_overrides)?;
    }
    Ok(config)
  }

  /// Find a config file directly inside `root`.
  #[must_use]
  pub fn find_config_file(root: &Path) -> Option<PathBuf> {
    CONFIG_FILENAMES
      .iter()
      .map(|filename| root.join(filename))
      .find(|path| path.is_file())
  }

  /// Apply configuration overrides from KEY=VALUE strings.
  ///
  /// # Errors
  ///
  /// Returns an error if:
  ///
  /// - An override string is not in KEY=VALUE format
  /// - A key is not recognized
  /// - A value cannot be parsed as the expected type
  ///
  /// # Example
  ///
  /// ```rust
  /// # use markdoc_config::Config;
  /// let mut config = Config::default();
  /// config.apply_overrides(&[
  ///   "use-ugly-paths=true".to_string(),
  ///   "markdown.extension-configs.header_ids.prefix=h-".to_string(),
  /// ])?;
  /// assert!(config.use_ugly_paths);
  /// # Ok::<(), markdoc_config::ConfigError>(())
  /// ```
  pub fn apply_overrides(
    &mut self,
    overrides: &[String],
  ) -> Result<(), ConfigError> {
    for override_str in overrides {
      let (key, value) = override_str.split_once('=').ok_or_else(|| {
        ConfigError::Config(format!(
          "Invalid config override format: '{override_str}'. Expected \
           KEY=VALUE"
        ))
      })?;

      self.apply_override(key.trim(), value.trim())?;
    }

    Ok(())
  }

  /// Apply a single override.
  ///
  /// Lists take comma-separated values. Any key below
  /// `markdown.extension-configs.` sets a nested extension setting.
  ///
  /// # Errors
  ///
  /// Returns an error if the key is unknown or the value does not parse.
  pub fn apply_override(
    &mut self,
    key: &str,
    value: &str,
  ) -> Result<(), ConfigError> {
    if let Some(path) = key.strip_prefix(EXTENSION_CONFIGS_PREFIX) {
      unflatten_extension_configs(&mut self.markdown.extension_configs, [(
        path,
        parse_scalar(value),
      )]);
      return Ok(());
    }

    match key {
      "use-ugly-paths" => self.use_ugly_paths = parse_bool(key, value)?,
      "document-extensions" => {
        self.document_extensions = split_list(value).collect();
      },
      "markdown.extensions" => {
        self.markdown.extensions = split_list(value).collect();
      },
      "markdown.safe-mode" => {
        self.markdown.safe_mode = parse_bool(key, value)?;
      },
      "markdown.relativize-html" => {
        self.markdown.relativize_html = parse_bool(key, value)?;
      },
      "markdown.output-format" => {
        self.markdown.output_format =
          value.parse::<OutputFormat>().map_err(|e| {
            ConfigError::Config(format!("Invalid value for {key}: {e}"))
          })?;
      },
      _ => {
        return Err(ConfigError::Config(format!(
          "Unknown configuration key: '{key}'"
        )));
      },
    }

    self.normalize();
    Ok(())
  }

  /// URL convention for internal links.
  #[must_use]
  pub fn path_style(&self) -> PathStyle {
    PathStyle::from(self.use_ugly_paths)
  }

  /// Whether `path` names a document, judged by its extension.
  #[must_use]
  pub fn is_document(&self, path: &Path) -> bool {
    is_document(path, &self.document_extensions)
  }

  /// Renderer options derived from this configuration.
  #[must_use]
  pub fn markdown_options(&self) -> MarkdownOptions {
    MarkdownOptions {
      extensions:        self.markdown.extensions.clone(),
      extension_configs: self.markdown.extension_configs.clone(),
      safe_mode:         self.markdown.safe_mode,
      output_format:     self.markdown.output_format,
      path_style:        self.path_style(),
      relativize_html:   self.markdown.relativize_html,
    }
  }

  /// A renderer configured from this configuration.
  #[must_use]
  pub fn processor(&self) -> MarkdownProcessor {
    MarkdownProcessor::new(self.markdown_options())
  }

  /// Document extensions always carry their leading dot.
  fn normalize(&mut self) {
    self.document_extensions = std::mem::take(&mut self.document_extensions)
      .into_iter()
      .filter(|ext| !ext.trim().is_empty())
      .map(|ext| {
        let ext = ext.trim();
        if ext.starts_with('.') {
          ext.to_string()
        } else {
          format!(".{ext}")
        }
      })
      .collect();
  }
}

/// Read a TOML or JSON config file into a JSON value.
fn read_config_value(path: &Path) -> Result<Value, ConfigError> {
  let format = path
    .extension()
    .and_then(|ext| ext.to_str())
    .map(str::to_lowercase);

  match format.as_deref() {
    Some("json") => Ok(serde_json::from_str(&fs::read_to_string(path)?)?),
    Some("toml") => Ok(toml::from_str(&fs::read_to_string(path)?)?),
    Some(_) => {
      Err(ConfigError::Config(format!(
        "Unsupported config file format: {}",
        path.display()
      )))
    },
    None => {
      Err(ConfigError::Config(format!(
        "Config file has no extension: {}",
        path.display()
      )))
    },
  }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
  value.parse().map_err(|_| {
    ConfigError::Config(format!(
      "Invalid boolean value for {key}: '{value}' (expected true or false)"
    ))
  })
}

fn split_list(value: &str) -> impl Iterator<Item = String> + '_ {
  value
    .split(',')
    .map(str::trim)
    .filter(|item| !item.is_empty())
    .map(String::from)
}

#[cfg(test)]
mod tests {
  #![allow(
    clippy::unwrap_used,
    clippy::field_reassign_with_default,
    reason = "Fine in tests"
  )]

  use serde_json::json;

  use super::*;

  #[test]
  fn test_defaults() {
    let config = Config::default();
    assert!(!config.use_ugly_paths);
    assert_eq!(config.path_style(), PathStyle::Pretty);
    assert!(config.markdown.extensions.is_empty());
    assert!(config.markdown.extension_configs.is_empty());
    assert!(!config.markdown.safe_mode);
    assert_eq!(config.markdown.output_format, OutputFormat::Html);
    for ext in [".md", ".mdown", ".markdown", ".wiki", ".text"] {
      assert!(config.document_extensions.contains(ext), "{ext}");
    }
  }

  #[test]
  fn test_from_value_nested_and_flat_keys() {
    let config = Config::from_value(json!({
      "use-ugly-paths": true,
      "document-extensions": ["md", ".wiki"],
      "markdown": {"extensions": ["table", "header_ids"]},
      "markdown.safe-mode": true,
      "markdown.output-format": "xhtml1",
      "markdown.extension-configs.header_ids.prefix": "h-",
    }))
    .unwrap();

    assert_eq!(config.path_style(), PathStyle::Ugly);
    assert_eq!(
      config.document_extensions,
      [".md", ".wiki"].into_iter().map(String::from).collect()
    );
    assert_eq!(config.markdown.extensions, vec!["table", "header_ids"]);
    assert!(config.markdown.safe_mode);
    assert_eq!(config.markdown.output_format, OutputFormat::Html);
    assert_eq!(
      config.markdown.extension_configs["header_ids"],
      json!({"prefix": "h-"})
    );
  }

  #[test]
  fn test_from_value_rejects_wrong_types() {
    assert!(Config::from_value(json!({"use-ugly-paths": "yes"})).is_err());
    assert!(
      Config::from_value(json!({"markdown": {"output-format": "pdf"}}))
        .is_err()
    );
  }

  #[test]
  fn test_apply_override_scalars() {
    let mut config = Config::default();
    config.apply_override("use-ugly-paths", "true").unwrap();
    config.apply_override("markdown.safe-mode", "true").unwrap();
    config.apply_override("markdown.output-format", "xml").unwrap();
    config.apply_override("markdown.relativize-html", "true").unwrap();

    assert!(config.use_ugly_paths);
    assert!(config.markdown.safe_mode);
    assert!(config.markdown.relativize_html);
    assert_eq!(config.markdown.output_format, OutputFormat::Xml);
  }

  #[test]
  fn test_apply_override_lists() {
    let mut config = Config::default();
    config
      .apply_override("document-extensions", "md, txt,,")
      .unwrap();
    config
      .apply_override("markdown.extensions", "table,wikilinks")
      .unwrap();

    assert_eq!(
      config.document_extensions,
      [".md", ".txt"].into_iter().map(String::from).collect()
    );
    assert_eq!(config.markdown.extensions, vec!["table", "wikilinks"]);
  }

  #[test]
  fn test_apply_override_extension_configs() {
    let mut config = Config::default();
    config
      .apply_overrides(&[
        "markdown.extension-configs.toc.depth=3".to_string(),
        "markdown.extension-configs.toc.title=Contents".to_string(),
        "markdown.extension-configs.header_ids.prefix=\"\"".to_string(),
      ])
      .unwrap();

    assert_eq!(
      Value::Object(config.markdown.extension_configs),
      json!({
        "toc": {"depth": 3, "title": "Contents"},
        "header_ids": {"prefix": ""},
      })
    );
  }

  #[test]
  fn test_apply_override_errors() {
    let mut config = Config::default();
    assert!(config.apply_override("use-ugly-paths", "maybe").is_err());
    assert!(config.apply_override("markdown.output-format", "pdf").is_err());
    assert!(config.apply_override("no-such-key", "1").is_err());
    assert!(config.apply_overrides(&["missing-equals".to_string()]).is_err());
  }

  #[test]
  fn test_markdown_options() {
    let mut config = Config::default();
    config.use_ugly_paths = true;
    config.markdown.extensions = vec!["wikilinks".to_string()];

    let options = config.markdown_options();
    assert_eq!(options.path_style, PathStyle::Ugly);
    assert!(options.has_extension("wikilinks"));

    let result = config.processor().render("[[Page]] [x](/a/x)", "/a/b");
    assert!(result.html.contains(r#"href="Page.html""#), "{}", result.html);
    assert!(result.html.contains(r#"href="x.html""#));
  }

  #[test]
  fn test_is_document() {
    let config = Config::default();
    assert!(config.is_document(Path::new("wiki/page.md")));
    assert!(config.is_document(Path::new("notes.text")));
    assert!(!config.is_document(Path::new("image.png")));
    assert!(!config.is_document(Path::new("README")));
  }

  #[test]
  fn test_from_file_toml_and_json() {
    let dir = tempfile::tempdir().unwrap();

    let toml_path = dir.path().join("markdoc.toml");
    fs::write(
      &toml_path,
      r#"
use-ugly-paths = true

[markdown]
extensions = ["footnotes"]
output-format = "commonmark"

[markdown.extension-configs.header_ids]
prefix = "sec-"
"#,
    )
    .unwrap();
    let config = Config::from_file(&toml_path).unwrap();
    assert!(config.use_ugly_paths);
    assert_eq!(config.markdown.extensions, vec!["footnotes"]);
    assert_eq!(config.markdown.output_format, OutputFormat::CommonMark);
    assert_eq!(
      config.markdown.extension_configs["header_ids"]["prefix"],
      json!("sec-")
    );

    let json_path = dir.path().join("markdoc.json");
    fs::write(&json_path, r#"{"markdown.safe-mode": true}"#).unwrap();
    let config = Config::from_file(&json_path).unwrap();
    assert!(config.markdown.safe_mode);
    assert!(!config.use_ugly_paths);

    let yaml_path = dir.path().join("markdoc.yaml");
    fs::write(&yaml_path, "use-ugly-paths: true").unwrap();
    assert!(Config::from_file(&yaml_path).is_err());
  }

  #[test]
  fn test_from_file_error_kinds() {
    let dir = tempfile::tempdir().unwrap();

    let missing = Config::from_file(dir.path().join("missing.toml"));
    assert!(matches!(missing, Err(ConfigError::Io(_))));

    let bad_toml = dir.path().join("bad.toml");
    fs::write(&bad_toml, "use-ugly-paths = ").unwrap();
    assert!(matches!(Config::from_file(&bad_toml), Err(ConfigError::Toml(_))));

    let bad_json = dir.path().join("bad.json");
    fs::write(&bad_json, "{").unwrap();
    assert!(matches!(Config::from_file(&bad_json), Err(ConfigError::Serde(_))));

    let no_ext = dir.path().join("markdoc");
    fs::write(&no_ext, "").unwrap();
    assert!(matches!(Config::from_file(&no_ext), Err(ConfigError::Config(_))));
  }

  #[test]
  fn test_load_merges_files_then_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("base.toml");
    let extra = dir.path().join("extra.json");
    fs::write(
      &base,
      "use-ugly-paths = true\n[markdown]\nextensions = [\"table\"]\nsafe-mode \
       = true\n",
    )
    .unwrap();
    fs::write(&extra, r#"{"markdown": {"extensions": ["wikilinks"]}}"#)
      .unwrap();

    let config = Config::load(
      &[base, extra],
      &["markdown.safe-mode=false".to_string()],
      dir.path(),
    )
    .unwrap();

    assert!(config.use_ugly_paths);
    assert_eq!(config.markdown.extensions, vec!["wikilinks"]);
    assert!(!config.markdown.safe_mode);
  }

  #[test]
  fn test_load_discovers_config_in_root() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(Config::load(&[], &[], dir.path()).unwrap(), Config::default());

    fs::write(dir.path().join("markdoc.toml"), "use-ugly-paths = true\n")
      .unwrap();
    assert_eq!(
      Config::find_config_file(dir.path()),
      Some(dir.path().join("markdoc.toml"))
    );
    assert!(Config::load(&[], &[], dir.path()).unwrap().use_ugly_paths);
  }

  #[test]
  fn test_load_reports_bad_file() {
    let dir = tempfile::tempdir().unwrap();
    let broken = dir.path().join("broken.toml");
    fs::write(&broken, "use-ugly-paths = ").unwrap();

    let err = Config::load(&[broken], &[], dir.path()).unwrap_err();
    assert!(err.to_string().contains("broken.toml"), "{err}");
  }
}

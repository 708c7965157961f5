//! Dotted-key handling for configuration maps.
//!
//! Keys may be written flat (`markdown.extension-configs.toc.title`) or
//! nested; both forms end up as the same nested JSON object.
use serde_json::{Map, Number, Value};

/// Fold flat `a.b.c = value` pairs into the nested extension settings map.
///
/// Intermediate maps are created on demand. A non-map value sitting where a
/// map is needed is replaced. Later pairs win over earlier ones.
///
/// # Examples
///
/// ```
/// use markdoc_config::unflatten_extension_configs;
/// use serde_json::{Map, json};
///
/// let mut configs = Map::new();
/// unflatten_extension_configs(&mut configs, [
///   ("toc.title", json!("Contents")),
///   ("toc.depth", json!(2)),
/// ]);
/// assert_eq!(configs["toc"], json!({"title": "Contents", "depth": 2}));
/// ```
pub fn unflatten_extension_configs<I, K>(configs: &mut Map<String, Value>, flat: I)
where
  I: IntoIterator<Item = (K, Value)>,
  K: AsRef<str>,
{
  for (key, value) in flat {
    insert_dotted(configs, key.as_ref(), value);
  }
}

/// Recursively expand dotted keys in every object of `value`.
#[must_use]
pub fn expand_dotted_keys(value: Value) -> Value {
  match value {
    Value::Object(map) => {
      let mut expanded = Map::new();
      for (key, child) in map {
        insert_dotted(&mut expanded, &key, expand_dotted_keys(child));
      }
      Value::Object(expanded)
    },
    other => other,
  }
}

/// Merge `other` into `base`. Objects merge key by key; anything else in
/// `other` replaces what `base` holds.
pub fn merge_values(base: &mut Value, other: Value) {
  match (base, other) {
    (Value::Object(base), Value::Object(other)) => {
      for (key, value) in other {
        match base.get_mut(&key) {
          Some(existing) => merge_values(existing, value),
          None => {
            base.insert(key, value);
          },
        }
      }
    },
    (base, other) => *base = other,
  }
}

/// Interpret a command line value: booleans and numbers become typed JSON,
/// a double-quoted value is taken literally, everything else is a string.
#[must_use]
pub fn parse_scalar(raw: &str) -> Value {
  let raw = raw.trim();
  if let Some(quoted) = raw
    .strip_prefix('"')
    .and_then(|rest| rest.strip_suffix('"'))
  {
    return Value::String(quoted.to_string());
  }
  if let Ok(flag) = raw.parse::<bool>() {
    return Value::Bool(flag);
  }
  if let Ok(int) = raw.parse::<i64>() {
    return Value::Number(int.into());
  }
  if let Some(float) = raw.parse::<f64>().ok().and_then(Number::from_f64) {
    return Value::Number(float);
  }
  Value::String(raw.to_string())
}

fn insert_dotted(map: &mut Map<String, Value>, key: &str, value: Value) {
  let parts: Vec<&str> = key.split('.').filter(|p| !p.is_empty()).collect();
  if parts.is_empty() {
    log::warn!("Ignoring empty configuration key '{key}'");
    return;
  }
  insert_path(map, &parts, value);
}

fn insert_path(map: &mut Map<String, Value>, parts: &[&str], value: Value) {
  match parts {
    [] => {},
    [last] => {
      match map.get_mut(*last) {
        Some(existing) => merge_values(existing, value),
        None => {
          map.insert((*last).to_string(), value);
        },
      }
    },
    [first, rest @ ..] => {
      let slot = map
        .entry(*first)
        .or_insert_with(|| Value::Object(Map::new()));
      if !slot.is_object() {
        *slot = Value::Object(Map::new());
      }
      if let Value::Object(child) = slot {
        insert_path(child, rest, value);
      }
    },
  }
}

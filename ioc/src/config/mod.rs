// src/config/mod.rs
// Turns raw configuration (Rust values, YAML or JSON) into the ordered definition table.

pub mod de; // Deserialization helpers
pub mod raw; // Structs directly mapping to YAML/JSON structure
pub mod source; // Files, formats and layering

pub use raw::{RawArg, RawConfig, RawEntry};

use crate::error::{Error, Result};
use serde_json::Value;
use std::io::Read;
use std::path::Path;

/// A normalized constructor argument descriptor.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgSpec {
  /// An argument that is itself resolved and constructed by the container.
  NestedRef { name: String },
  /// An opaque value handed to the constructor untouched.
  Literal { value: Value },
}

impl ArgSpec {
  pub fn nested(name: impl Into<String>) -> Self {
    ArgSpec::NestedRef { name: name.into() }
  }

  pub fn literal(value: impl Into<Value>) -> Self {
    ArgSpec::Literal {
      value: value.into(),
    }
  }
}

/// A class name paired with its ordered constructor arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct Definition {
  pub name: String,
  pub args: Vec<ArgSpec>,
}

impl Definition {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      args: Vec::new(),
    }
  }

  /// Appends a nested reference argument.
  pub fn with_ref(mut self, name: impl Into<String>) -> Self {
    self.args.push(ArgSpec::nested(name));
    self
  }

  /// Appends a literal argument.
  pub fn with_value(mut self, value: impl Into<Value>) -> Self {
    self.args.push(ArgSpec::literal(value));
    self
  }

  pub fn with_arg(mut self, arg: ArgSpec) -> Self {
    self.args.push(arg);
    self
  }
}

/// The ordered definition table.
///
/// Composition is append-only: overrides are concatenated after the base and never
/// merged by name. Position decides precedence during resolution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Definitions {
  entries: Vec<Definition>,
}

impl Definitions {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn push(&mut self, definition: Definition) {
    self.entries.push(definition);
  }

  /// Appends every definition of `overrides` after the existing ones.
  pub fn extend(&mut self, overrides: Definitions) {
    self.entries.extend(overrides.entries);
  }

  /// Consuming form of [`Definitions::extend`].
  pub fn chain(mut self, overrides: Definitions) -> Self {
    self.extend(overrides);
    self
  }

  pub fn get(&self, index: usize) -> Option<&Definition> {
    self.entries.get(index)
  }

  pub fn iter(&self) -> std::slice::Iter<'_, Definition> {
    self.entries.iter()
  }

  pub fn as_slice(&self) -> &[Definition] {
    &self.entries
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

impl From<Vec<Definition>> for Definitions {
  fn from(entries: Vec<Definition>) -> Self {
    Self { entries }
  }
}

impl FromIterator<Definition> for Definitions {
  fn from_iter<I: IntoIterator<Item = Definition>>(iter: I) -> Self {
    Self {
      entries: iter.into_iter().collect(),
    }
  }
}

impl<'a> IntoIterator for &'a Definitions {
  type Item = &'a Definition;
  type IntoIter = std::slice::Iter<'a, Definition>;

  fn into_iter(self) -> Self::IntoIter {
    self.entries.iter()
  }
}

/// Serialization formats accepted for configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
  Yaml,
  Json,
}

impl Format {
  /// Picks a format from a file extension (`yaml`, `yml` or `json`).
  pub fn from_path(path: &Path) -> Option<Self> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
      "yaml" | "yml" => Some(Format::Yaml),
      "json" => Some(Format::Json),
      _ => None,
    }
  }
}

// --- Conversion and Validation Logic ---

/// Validates the raw configuration and converts it into a definition table.
///
/// Fails with [`Error::MalformedConfig`] on the first entry without a name, or the
/// first argument that is not exactly one of a nested reference or a literal.
pub fn load(raw_config: RawConfig) -> Result<Definitions> {
  let definitions = raw_config
    .into_iter()
    .enumerate()
    .map(|(index, entry)| process_entry(index, entry))
    .collect::<Result<Definitions>>()?;

  tracing::debug!(count = definitions.len(), "Loaded definition table");
  Ok(definitions)
}

pub fn from_yaml_str(input: &str) -> Result<Definitions> {
  let raw: RawConfig = serde_yaml::from_str(input).map_err(|e| Error::ConfigParse(e.to_string()))?;
  load(raw)
}

pub fn from_json_str(input: &str) -> Result<Definitions> {
  let raw: RawConfig = serde_json::from_str(input).map_err(|e| Error::ConfigParse(e.to_string()))?;
  load(raw)
}

pub fn from_reader<R: Read>(reader: R, format: Format) -> Result<Definitions> {
  let raw: RawConfig = match format {
    Format::Yaml => serde_yaml::from_reader(reader).map_err(|e| Error::ConfigParse(e.to_string()))?,
    Format::Json => serde_json::from_reader(reader).map_err(|e| Error::ConfigParse(e.to_string()))?,
  };
  load(raw)
}

fn process_entry(index: usize, entry: RawEntry) -> Result<Definition> {
  let name = match entry.name {
    Some(name) if !name.trim().is_empty() => name,
    Some(_) => {
      return Err(Error::MalformedConfig {
        index,
        reason: "entry name cannot be empty".to_string(),
      })
    }
    None => {
      return Err(Error::MalformedConfig {
        index,
        reason: "entry has no 'name'".to_string(),
      })
    }
  };

  let args = entry
    .args
    .unwrap_or_default()
    .into_iter()
    .enumerate()
    .map(|(position, arg)| process_arg(index, &name, position, arg))
    .collect::<Result<Vec<_>>>()?;

  Ok(Definition { name, args })
}

fn process_arg(index: usize, owner: &str, position: usize, arg: RawArg) -> Result<ArgSpec> {
  match (arg.name, arg.value) {
    (Some(name), None) if !name.trim().is_empty() => Ok(ArgSpec::NestedRef { name }),
    (Some(_), None) => Err(Error::MalformedConfig {
      index,
      reason: format!("argument #{} of '{}' references an empty name", position, owner),
    }),
    (None, Some(value)) => Ok(ArgSpec::Literal { value }),
    (Some(_), Some(_)) => Err(Error::MalformedConfig {
      index,
      reason: format!(
        "argument #{} of '{}' sets both 'name' and 'value'",
        position, owner
      ),
    }),
    (None, None) => Err(Error::MalformedConfig {
      index,
      reason: format!(
        "argument #{} of '{}' is neither a reference nor a value",
        position, owner
      ),
    }),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;
  use serde_json::json;

  #[test]
  fn load_keeps_order_and_duplicates() {
    let raw = vec![
      RawEntry::new("a.Storage"),
      RawEntry::new("a.Writer").with_args(vec![RawArg::nested("a.Storage")]),
      RawEntry::new("a.Storage"),
    ];
    let definitions = load(raw).unwrap();

    let names: Vec<&str> = definitions.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["a.Storage", "a.Writer", "a.Storage"]);
    assert_eq!(
      definitions.get(1).unwrap().args,
      vec![ArgSpec::nested("a.Storage")]
    );
  }

  #[test]
  fn load_rejects_entry_without_name() {
    let raw = vec![RawEntry::new("ok"), RawEntry::default()];
    let result = load(raw);
    if let Err(Error::MalformedConfig { index, reason }) = result {
      assert_eq!(index, 1);
      assert!(reason.contains("no 'name'"));
    } else {
      panic!("Expected MalformedConfig error");
    }
  }

  #[test]
  fn load_rejects_blank_name() {
    let result = load(vec![RawEntry::new("  ")]);
    assert!(matches!(result, Err(Error::MalformedConfig { index: 0, .. })));
  }

  #[test]
  fn load_rejects_argument_without_kind() {
    let raw = vec![RawEntry::new("app.App").with_args(vec![RawArg::default()])];
    let result = load(raw);
    if let Err(Error::MalformedConfig { index, reason }) = result {
      assert_eq!(index, 0);
      assert!(reason.contains("neither a reference nor a value"));
    } else {
      panic!("Expected MalformedConfig error");
    }
  }

  #[test]
  fn load_rejects_argument_with_both_kinds() {
    let arg = RawArg {
      name: Some("x.Y".to_string()),
      value: Some(json!(1)),
    };
    let result = load(vec![RawEntry::new("app.App").with_args(vec![arg])]);
    assert!(matches!(result, Err(Error::MalformedConfig { .. })));
  }

  #[test]
  fn class_key_is_accepted_as_name() {
    let definitions = from_json_str(
      r#"[{"class": "classes.note.NoteWriter", "args": [{"class": "classes.note.NoteStorage"}]}]"#,
    )
    .unwrap();
    assert_eq!(
      definitions.as_slice(),
      &[Definition::new("classes.note.NoteWriter").with_ref("classes.note.NoteStorage")]
    );
  }

  #[test]
  fn explicit_null_literal_is_kept() {
    let definitions = from_json_str(r#"[{"name": "a.B", "args": [{"value": null}]}]"#).unwrap();
    assert_eq!(
      definitions.get(0).unwrap().args,
      vec![ArgSpec::Literal { value: Value::Null }]
    );
  }

  #[test]
  fn unknown_keys_are_parse_errors() {
    let result = from_json_str(r#"[{"name": "a.B", "scope": "singleton"}]"#);
    assert!(matches!(result, Err(Error::ConfigParse(_))));
  }

  #[test]
  fn yaml_and_json_agree() {
    let yaml = r#"
- name: classes.Application
  args:
    - name: classes.note.NoteWriter
    - value: views/write_form.php
- name: classes.note.SQLNoteStorage
"#;
    let json = r#"[
      {"name": "classes.Application", "args": [
        {"name": "classes.note.NoteWriter"},
        {"value": "views/write_form.php"}
      ]},
      {"name": "classes.note.SQLNoteStorage"}
    ]"#;
    assert_eq!(from_yaml_str(yaml).unwrap(), from_json_str(json).unwrap());
  }

  #[test]
  fn chain_appends_overrides() {
    let base = Definitions::from(vec![Definition::new("a"), Definition::new("b")]);
    let overrides = Definitions::from(vec![Definition::new("a")]);
    let combined = base.chain(overrides);
    let names: Vec<&str> = combined.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b", "a"]);
  }

  #[test]
  fn format_from_path() {
    assert_eq!(Format::from_path(Path::new("wire.YML")), Some(Format::Yaml));
    assert_eq!(Format::from_path(Path::new("wire.json")), Some(Format::Json));
    assert_eq!(Format::from_path(Path::new("wire.toml")), None);
    assert_eq!(Format::from_path(Path::new("wire")), None);
  }
}

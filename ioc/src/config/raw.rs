// src/config/raw.rs
// Structs directly mapping to the YAML/JSON configuration shape.

use crate::config::de;
use serde::Deserialize;
use serde_json::Value;

/// The configuration as supplied by the caller: an ordered list of entries.
///
/// Order is significant. Later entries take precedence over earlier ones that
/// satisfy the same requested name.
pub type RawConfig = Vec<RawEntry>;

#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct RawEntry {
  #[serde(default, alias = "class")]
  pub name: Option<String>,
  #[serde(default)]
  pub args: Option<Vec<RawArg>>,
}

/// A single constructor argument descriptor.
///
/// Exactly one of `name` (a nested reference) or `value` (a literal) must be set;
/// this is checked when the raw config is loaded, not during deserialization.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct RawArg {
  #[serde(default, alias = "class")]
  pub name: Option<String>,
  #[serde(default, deserialize_with = "de::present")]
  pub value: Option<Value>,
}

impl RawEntry {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: Some(name.into()),
      args: None,
    }
  }

  pub fn with_args(mut self, args: Vec<RawArg>) -> Self {
    self.args = Some(args);
    self
  }
}

impl RawArg {
  pub fn nested(name: impl Into<String>) -> Self {
    Self {
      name: Some(name.into()),
      value: None,
    }
  }

  pub fn literal(value: impl Into<Value>) -> Self {
    Self {
      name: None,
      value: Some(value.into()),
    }
  }
}

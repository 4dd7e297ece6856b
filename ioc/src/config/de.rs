// src/config/de.rs
// Custom deserialization helpers for the raw configuration shapes.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserializes a field that must distinguish "absent" from "present but null".
///
/// Paired with `#[serde(default)]`: an absent field stays `None`, while an explicit
/// `null` becomes `Some(Value::Null)`.
pub fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
  D: Deserializer<'de>,
{
  Value::deserialize(deserializer).map(Some)
}

// src/config/source.rs
// Reading definition tables from files and layering them.

use crate::config::{self, Definitions, Format};
use crate::error::{Error, Result};
use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_BASE_NAME: &str = "fibre_wire";
const DEFAULT_CONFIG_EXTENSION: &str = "yaml";

/// Loads a single configuration file, picking the format from its extension.
pub fn load_file(path: &Path) -> Result<Definitions> {
  let format = Format::from_path(path).ok_or_else(|| {
    Error::ConfigParse(format!(
      "Unsupported configuration format for {:?}; expected .yaml, .yml or .json",
      path
    ))
  })?;

  tracing::debug!(path = ?path, ?format, "Reading wiring configuration");
  let file = File::open(path)?;
  config::from_reader(BufReader::new(file), format)
}

/// Loads every file in order and concatenates the results.
///
/// Definitions from later files come after earlier ones, so they win whenever both
/// satisfy the same request.
pub fn load_layers<P: AsRef<Path>>(paths: &[P]) -> Result<Definitions> {
  let mut definitions = Definitions::new();
  for path in paths {
    let layer = load_file(path.as_ref())?;
    tracing::debug!(
      path = ?path.as_ref(),
      added = layer.len(),
      "Appending configuration layer"
    );
    definitions.extend(layer);
  }
  Ok(definitions)
}

/// Finds the base configuration file and an optional environment overlay in `dir`.
///
/// The base is `fibre_wire.yaml`; the overlay is `fibre_wire.<env>.yaml`, where the
/// environment comes from `environment_suffix`, else `FIBRE_ENV`, else `APP_ENV`.
/// The base is returned first so the overlay is appended after it.
pub fn find_config_layers(dir: &Path, environment_suffix: Option<&str>) -> Result<Vec<PathBuf>> {
  let base_name = DEFAULT_CONFIG_BASE_NAME;
  let extension = DEFAULT_CONFIG_EXTENSION;

  let base = dir.join(format!("{}.{}", base_name, extension));
  if !base.is_file() {
    return Err(Error::ConfigNotFound(format!(
      "Searched for {:?}. Provide a base wiring file.",
      base
    )));
  }
  let mut layers = vec![base];

  let env_from_var = environment_suffix
    .map(|s| s.to_string())
    .or_else(|| env::var("FIBRE_ENV").ok())
    .or_else(|| env::var("APP_ENV").ok());

  if let Some(env_str) = env_from_var.filter(|s| !s.is_empty()) {
    let overlay = dir.join(format!("{}.{}.{}", base_name, env_str, extension));
    if overlay.is_file() {
      layers.push(overlay);
    } else {
      tracing::trace!(path = ?overlay, "No environment overlay found");
    }
  }

  Ok(layers)
}

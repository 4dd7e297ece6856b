use thiserror::Error;

/// The main error type for `fibre_wire` operations.
#[derive(Debug, Error)]
pub enum Error {
  #[error("Configuration file not found: {0}")]
  ConfigNotFound(String),

  #[error("Failed to read configuration file: {0}")]
  ConfigRead(#[from] std::io::Error),

  #[error("Failed to parse configuration: {0}")]
  ConfigParse(String),

  #[error("Malformed configuration entry #{index}: {reason}")]
  MalformedConfig { index: usize, reason: String },

  #[error("No definition satisfies '{0}'")]
  UnresolvedDependency(String),

  #[error("Circular dependency detected: {}", .chain.join(" -> "))]
  CyclicDependency { chain: Vec<String> },

  #[error("Unknown class: {0}")]
  UnknownClass(String),

  #[error("Failed to construct '{class}': {source}")]
  ConstructionFailed {
    class: String,
    #[source]
    source: ArgError,
  },

  #[error("Class '{class}' cannot be served as '{abstraction}'")]
  NotAssignable { class: String, abstraction: String },

  #[error("Instance resolved for '{name}' is not a {expected}")]
  TypeMismatch {
    name: String,
    expected: &'static str,
  },
}

/// Raised by constructors when the built argument list does not fit them.
#[derive(Debug, Error)]
pub enum ArgError {
  #[error("expected {expected} argument(s), got {actual}")]
  Arity { expected: usize, actual: usize },

  #[error("missing argument #{0}")]
  Missing(usize),

  #[error("argument #{index} is not a {expected}")]
  TypeMismatch {
    index: usize,
    expected: &'static str,
  },

  #[error("argument #{index} could not be decoded: {source}")]
  Decode {
    index: usize,
    #[source]
    source: serde_json::Error,
  },

  #[error("{0}")]
  Rejected(String),
}

/// A specialized `Result` type for `fibre_wire` operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

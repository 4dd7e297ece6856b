//! The main `Container` struct and its associated methods.

use crate::config::{self, ArgSpec, Definition, Definitions, RawConfig};
use crate::core::ResolutionContext;
use crate::error::{Error, Result};
use crate::global::global;
use crate::instance::{Arg, Args, Instance};
use crate::registry::{self, ClassRegistry};
use crate::resolver;
use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;

/// The wiring container.
///
/// Holds an ordered definition table and the registry used to locate classes.
/// Nothing is cached between calls: each [`Container::get_instance`] builds a fresh
/// object graph. The table is never mutated after construction, so one container
/// can serve concurrent calls.
pub struct Container {
  definitions: Definitions,
  registry: Arc<dyn ClassRegistry>,
}

impl Container {
  /// Creates a container that locates classes through the [`global`] registry.
  pub fn new(definitions: Definitions) -> Self {
    Self::with_registry(definitions, global())
  }

  pub fn with_registry(definitions: Definitions, registry: Arc<dyn ClassRegistry>) -> Self {
    Self {
      definitions,
      registry,
    }
  }

  /// Validates `raw` and creates a container over the global registry.
  pub fn from_raw(raw: RawConfig) -> Result<Self> {
    config::load(raw).map(Self::new)
  }

  pub fn definitions(&self) -> &Definitions {
    &self.definitions
  }

  /// Builds a fully wired instance for `name`.
  ///
  /// `name` may be a class name or an abstraction implemented by a defined class.
  /// Errors from any nested resolution are returned unchanged; in that case no part
  /// of the graph escapes.
  pub fn get_instance(&self, name: &str) -> Result<Instance> {
    tracing::debug!(requested = name, "Resolving instance");
    let context = ResolutionContext::new(&self.definitions);
    self.get_instance_in(name, &context)
  }

  /// Like [`Container::get_instance`], returning the instance as `Arc<T>`.
  ///
  /// For a name resolved through an abstraction, `T` is that abstraction's trait
  /// object type.
  pub fn get_instance_as<T: ?Sized + Any + Send + Sync>(&self, name: &str) -> Result<Arc<T>> {
    let instance = self.get_instance(name)?;
    instance.downcast::<T>().ok_or_else(|| Error::TypeMismatch {
      name: name.to_string(),
      expected: type_name::<T>(),
    })
  }

  fn get_instance_in(&self, name: &str, context: &ResolutionContext<'_>) -> Result<Instance> {
    let definition = resolver::resolve(
      name,
      context.definitions(),
      self.registry.as_ref(),
      context,
    )?;

    // Stays on the stack until this instance (and all its arguments) is built.
    let _guard = context.enter(name, &definition.name);

    let args = self.build_args(definition, context)?;
    registry::instantiate(self.registry.as_ref(), &definition.name, name, args)
  }

  fn build_args(&self, definition: &Definition, context: &ResolutionContext<'_>) -> Result<Args> {
    definition
      .args
      .iter()
      .map(|arg| match arg {
        ArgSpec::Literal { value } => Ok(Arg::Literal(value.clone())),
        ArgSpec::NestedRef { name } => {
          tracing::trace!(
            owner = %definition.name,
            dependency = %name,
            depth = context.depth(),
            "Resolving nested argument"
          );
          self.get_instance_in(name, context).map(Arg::Object)
        }
      })
      .collect::<Result<Vec<_>>>()
      .map(Args::new)
  }
}

impl fmt::Debug for Container {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Container")
      .field("definitions", &self.definitions.len())
      .finish_non_exhaustive()
  }
}

//! Class registration and instantiation.
//!
//! Classes are looked up by name at resolution time. Each class carries a
//! constructor over positional [`Args`] and the set of abstractions it can be
//! served as, each with the cast that turns the concrete `Arc<T>` into the
//! abstraction's trait object.

use crate::error::{ArgError, Error, Result};
use crate::instance::{Args, CastTable, Caster, Erased, Instance};
use dashmap::DashMap;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

type Constructor = Box<dyn Fn(Args) -> Result<Erased, ArgError> + Send + Sync>;

/// Looks up classes by name.
///
/// [`Registry`] is the standard implementation; hosts with other ways of locating
/// classes can provide their own.
pub trait ClassRegistry: Send + Sync {
  fn find(&self, name: &str) -> Option<Arc<Class>>;

  /// Whether `class` can be served wherever `abstraction` is requested.
  fn is_subtype(&self, class: &str, abstraction: &str) -> bool {
    self
      .find(class)
      .is_some_and(|class| class.implements(abstraction))
  }
}

/// A registered class: its constructor and the abstractions it implements.
pub struct Class {
  name: String,
  constructor: Constructor,
  // Abstraction name to the `TypeId` of its `Arc<dyn I>`.
  abstractions: HashMap<String, TypeId>,
  casts: Arc<CastTable>,
}

impl Class {
  /// Starts describing a class named `name` that builds a `T`.
  pub fn builder<T: Any + Send + Sync>(
    name: impl Into<String>,
    constructor: impl Fn(Args) -> Result<T, ArgError> + Send + Sync + 'static,
  ) -> ClassBuilder<T> {
    ClassBuilder {
      name: name.into(),
      constructor: Box::new(move |args: Args| {
        constructor(args).map(|value| Arc::new(Arc::new(value)) as Erased)
      }),
      abstractions: HashMap::new(),
      casts: HashMap::new(),
      _marker: PhantomData,
    }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn implements(&self, abstraction: &str) -> bool {
    self.abstractions.contains_key(abstraction)
  }

  pub fn abstractions(&self) -> impl Iterator<Item = &str> {
    self.abstractions.keys().map(String::as_str)
  }

  pub fn construct(&self, args: Args) -> Result<Instance, ArgError> {
    let value = (self.constructor)(args)?;
    Ok(Instance::from_erased(&self.name, value, self.casts.clone()))
  }

  /// Re-serves `instance` as `abstraction`, if this class implements it.
  pub fn cast(&self, instance: &Instance, abstraction: &str) -> Option<Instance> {
    let type_id = self.abstractions.get(abstraction)?;
    let value = instance.cast_by_type(type_id)?;
    Some(instance.served_as_abstraction(abstraction, value))
  }
}

impl fmt::Debug for Class {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut abstractions: Vec<&str> = self.abstractions().collect();
    abstractions.sort_unstable();
    f.debug_struct("Class")
      .field("name", &self.name)
      .field("abstractions", &abstractions)
      .finish_non_exhaustive()
  }
}

/// Builder returned by [`Class::builder`].
pub struct ClassBuilder<T> {
  name: String,
  constructor: Constructor,
  abstractions: HashMap<String, TypeId>,
  casts: CastTable,
  _marker: PhantomData<fn() -> T>,
}

impl<T: Any + Send + Sync> ClassBuilder<T> {
  /// Declares that this class can be served where `abstraction` is requested.
  ///
  /// `cast` is usually the identity closure `|c| c`, which lets the compiler
  /// coerce `Arc<T>` into `Arc<dyn Trait>`. Instances of the class can then be
  /// viewed as `Arc<I>` however they were requested.
  pub fn implements<I: ?Sized + Any + Send + Sync>(
    mut self,
    abstraction: impl Into<String>,
    cast: impl Fn(Arc<T>) -> Arc<I> + Send + Sync + 'static,
  ) -> Self {
    let type_id = TypeId::of::<Arc<I>>();
    let caster: Caster = Box::new(move |erased: &(dyn Any + Send + Sync)| {
      erased
        .downcast_ref::<Arc<T>>()
        .map(|concrete| Arc::new(cast(concrete.clone())) as Erased)
    });
    self.casts.insert(type_id, caster);
    self.abstractions.insert(abstraction.into(), type_id);
    self
  }

  pub fn build(self) -> Class {
    Class {
      name: self.name,
      constructor: self.constructor,
      abstractions: self.abstractions,
      casts: Arc::new(self.casts),
    }
  }
}

impl<T: Any + Send + Sync> From<ClassBuilder<T>> for Class {
  fn from(builder: ClassBuilder<T>) -> Self {
    builder.build()
  }
}

/// A thread-safe class registry.
///
/// Classes can be registered at any point; registering a name again replaces the
/// previous class.
#[derive(Default)]
pub struct Registry {
  classes: DashMap<String, Arc<Class>>,
}

impl Registry {
  /// Creates a new, empty `Registry`.
  pub fn new() -> Self {
    Self::default()
  }

  pub fn register(&self, class: impl Into<Class>) {
    let class = class.into();
    tracing::trace!(class = %class.name, "Registering class");
    self.classes.insert(class.name.clone(), Arc::new(class));
  }

  /// Registers a class that implements no abstractions.
  pub fn add_class<T: Any + Send + Sync>(
    &self,
    name: impl Into<String>,
    constructor: impl Fn(Args) -> Result<T, ArgError> + Send + Sync + 'static,
  ) {
    self.register(Class::builder(name, constructor));
  }

  pub fn contains(&self, name: &str) -> bool {
    self.classes.contains_key(name)
  }

  pub fn len(&self) -> usize {
    self.classes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.classes.is_empty()
  }
}

impl ClassRegistry for Registry {
  fn find(&self, name: &str) -> Option<Arc<Class>> {
    self.classes.get(name).map(|entry| entry.value().clone())
  }
}

impl fmt::Debug for Registry {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Registry")
      .field("classes", &self.classes.len())
      .finish()
  }
}

/// Builds an instance of `class_name` from `args` and serves it as `requested`.
pub(crate) fn instantiate(
  registry: &dyn ClassRegistry,
  class_name: &str,
  requested: &str,
  args: Args,
) -> Result<Instance> {
  let class = registry
    .find(class_name)
    .ok_or_else(|| Error::UnknownClass(class_name.to_string()))?;

  tracing::trace!(class = class_name, args = args.len(), "Constructing");
  let instance = class
    .construct(args)
    .map_err(|source| Error::ConstructionFailed {
      class: class_name.to_string(),
      source,
    })?;

  if requested == class_name {
    return Ok(instance);
  }
  class
    .cast(&instance, requested)
    .ok_or_else(|| Error::NotAssignable {
      class: class_name.to_string(),
      abstraction: requested.to_string(),
    })
}

//! Runtime values flowing through the container: constructed instances and the
//! positional argument lists handed to constructors.

use crate::error::ArgError;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

// Always holds an `Arc<T>` for some possibly unsized `T`.
pub(crate) type Erased = Arc<dyn Any + Send + Sync>;

// Turns the concrete `Arc<T>` into one abstraction's `Arc<dyn I>`.
pub(crate) type Caster = Box<dyn Fn(&(dyn Any + Send + Sync)) -> Option<Erased> + Send + Sync>;

// Keyed by `TypeId::of::<Arc<dyn I>>()`.
pub(crate) type CastTable = HashMap<TypeId, Caster>;

/// A constructed object, type-erased.
///
/// An instance records the class that built it and the name it was served as. When
/// a class is requested through one of its abstractions, the served value is the
/// abstraction's trait object (e.g. `Arc<dyn Storage>`) rather than the concrete
/// `Arc<SqlStorage>`. Either way the instance can still be viewed as the concrete
/// type or as any abstraction its class declares.
#[derive(Clone)]
pub struct Instance {
  class: Arc<str>,
  served_as: Arc<str>,
  value: Erased,
  concrete: Erased,
  casts: Arc<CastTable>,
}

impl Instance {
  pub(crate) fn from_erased(class: &str, value: Erased, casts: Arc<CastTable>) -> Self {
    let class: Arc<str> = Arc::from(class);
    Self {
      served_as: class.clone(),
      class,
      concrete: value.clone(),
      value,
      casts,
    }
  }

  pub(crate) fn cast_by_type(&self, type_id: &TypeId) -> Option<Erased> {
    let caster = self.casts.get(type_id)?;
    caster(self.concrete.as_ref())
  }

  pub(crate) fn served_as_abstraction(&self, abstraction: &str, value: Erased) -> Self {
    Self {
      class: self.class.clone(),
      served_as: Arc::from(abstraction),
      value,
      concrete: self.concrete.clone(),
      casts: self.casts.clone(),
    }
  }

  /// Name of the concrete class that was constructed.
  pub fn class_name(&self) -> &str {
    &self.class
  }

  /// Name the instance was requested under.
  pub fn served_as(&self) -> &str {
    &self.served_as
  }

  /// Returns the instance as `Arc<T>`.
  ///
  /// `T` may be the served type, the concrete class type, or the trait object of
  /// any abstraction the class declares. Anything else yields `None`.
  pub fn downcast<T: ?Sized + Any + Send + Sync>(&self) -> Option<Arc<T>> {
    if let Some(value) = self.value.downcast_ref::<Arc<T>>() {
      return Some(value.clone());
    }
    if let Some(value) = self.concrete.downcast_ref::<Arc<T>>() {
      return Some(value.clone());
    }
    self
      .cast_by_type(&TypeId::of::<Arc<T>>())
      .and_then(|value| value.downcast_ref::<Arc<T>>().cloned())
  }

  pub fn is<T: ?Sized + Any + Send + Sync>(&self) -> bool {
    self.downcast::<T>().is_some()
  }
}

impl fmt::Debug for Instance {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Instance")
      .field("class", &self.class)
      .field("served_as", &self.served_as)
      .finish_non_exhaustive()
  }
}

/// One built constructor argument.
#[derive(Debug, Clone)]
pub enum Arg {
  Literal(Value),
  Object(Instance),
}

/// The ordered arguments for a single constructor call.
#[derive(Debug, Clone, Default)]
pub struct Args {
  items: Vec<Arg>,
}

impl Args {
  pub fn new(items: Vec<Arg>) -> Self {
    Self { items }
  }

  pub fn len(&self) -> usize {
    self.items.len()
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  pub fn iter(&self) -> std::slice::Iter<'_, Arg> {
    self.items.iter()
  }

  /// Fails with [`ArgError::Arity`] unless exactly `expected` arguments were supplied.
  pub fn expect_len(&self, expected: usize) -> Result<(), ArgError> {
    if self.items.len() == expected {
      Ok(())
    } else {
      Err(ArgError::Arity {
        expected,
        actual: self.items.len(),
      })
    }
  }

  pub fn get(&self, index: usize) -> Result<&Arg, ArgError> {
    self.items.get(index).ok_or(ArgError::Missing(index))
  }

  pub fn literal(&self, index: usize) -> Result<&Value, ArgError> {
    match self.get(index)? {
      Arg::Literal(value) => Ok(value),
      Arg::Object(_) => Err(ArgError::TypeMismatch {
        index,
        expected: "literal value",
      }),
    }
  }

  pub fn str(&self, index: usize) -> Result<&str, ArgError> {
    self.literal(index)?.as_str().ok_or(ArgError::TypeMismatch {
      index,
      expected: "string",
    })
  }

  /// Deserializes a literal argument into `T`.
  pub fn decode<T: DeserializeOwned>(&self, index: usize) -> Result<T, ArgError> {
    let value = self.literal(index)?.clone();
    serde_json::from_value(value).map_err(|source| ArgError::Decode { index, source })
  }

  pub fn instance(&self, index: usize) -> Result<&Instance, ArgError> {
    match self.get(index)? {
      Arg::Object(instance) => Ok(instance),
      Arg::Literal(_) => Err(ArgError::TypeMismatch {
        index,
        expected: "object",
      }),
    }
  }

  /// Returns an object argument as `Arc<T>`.
  ///
  /// `T` is typically the trait object of an abstraction, e.g.
  /// `args.object::<dyn Storage>(0)`. This works whether the argument was
  /// referenced by the abstraction's name or by its concrete class name.
  pub fn object<T: ?Sized + Any + Send + Sync>(&self, index: usize) -> Result<Arc<T>, ArgError> {
    self
      .instance(index)?
      .downcast::<T>()
      .ok_or(ArgError::TypeMismatch {
        index,
        expected: type_name::<T>(),
      })
  }
}

impl From<Vec<Arg>> for Args {
  fn from(items: Vec<Arg>) -> Self {
    Self::new(items)
  }
}

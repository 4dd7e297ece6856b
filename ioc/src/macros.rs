//! Public macros for ergonomic resolution.

/// Resolves a typed instance from a container, panicking on failure.
///
/// This is the terse counterpart of [`Container::get_instance_as`](crate::Container::get_instance_as)
/// for wiring code where a missing definition is a programming error.
///
/// # Panics
///
/// Panics with the resolution error if the name cannot be resolved, constructed,
/// or is not of the expected type.
///
/// # Examples
///
/// ```
/// use fibre_wire::{resolve, Container, Definition, Definitions, Registry};
/// use std::sync::Arc;
///
/// trait Greeter: Send + Sync { fn greet(&self) -> String; }
/// struct English(String);
/// impl Greeter for English { fn greet(&self) -> String { self.0.clone() } }
///
/// let registry = Arc::new(Registry::new());
/// registry.register(
///   fibre_wire::Class::builder("app.English", |args| Ok(English(args.str(0)?.to_string())))
///     .implements::<dyn Greeter>("app.Greeter", |c| c),
/// );
/// let definitions = Definitions::from(vec![Definition::new("app.English").with_value("Hello!")]);
/// let container = Container::with_registry(definitions, registry);
///
/// let english = resolve!(container, English, "app.English");
/// assert_eq!(english.0, "Hello!");
///
/// let greeter = resolve!(container, trait Greeter, "app.Greeter");
/// assert_eq!(greeter.greet(), "Hello!");
/// ```
#[macro_export]
macro_rules! resolve {
  // resolve!(container, trait MyTrait, "app.MyTrait")
  ($container:expr, trait $trait_ident:ident, $name:expr) => {
    $container
      .get_instance_as::<dyn $trait_ident>($name)
      .unwrap_or_else(|e| {
        panic!(
          "Failed to resolve required trait service '{}' as {}: {}",
          $name,
          std::any::type_name::<dyn $trait_ident>(),
          e
        )
      })
  };

  // resolve!(container, MyService, "app.MyService")
  ($container:expr, $type:ty, $name:expr) => {
    $container
      .get_instance_as::<$type>($name)
      .unwrap_or_else(|e| {
        panic!(
          "Failed to resolve required service '{}' as {}: {}",
          $name,
          std::any::type_name::<$type>(),
          e
        )
      })
  };
}

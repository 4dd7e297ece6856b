use fibre_wire::{global, resolve, Container, Definition, Definitions, Error};
use std::panic;

struct Reporter;

fn main() {
  global().add_class("app.Reporter", |_| Ok(Reporter));

  // The reporter's dependency is named but never defined.
  let definitions = Definitions::from(vec![
    Definition::new("app.Reporter").with_ref("app.Mailer"),
  ]);
  let container = Container::new(definitions);

  // --- Using the fallible `get_instance()` method ---
  println!("Attempting to resolve a service whose dependency was never defined...");
  match container.get_instance("app.Reporter") {
    Err(Error::UnresolvedDependency(name)) => {
      println!("Correctly received UnresolvedDependency for '{}'.", name)
    }
    Err(other) => panic!("Unexpected error: {}", other),
    Ok(_) => panic!("Should not have built the reporter!"),
  }

  // --- Using the panicking `resolve!` macro ---
  println!("\nNow, attempting the same with resolve!...");
  let result = panic::catch_unwind(panic::AssertUnwindSafe(|| {
    // This line will panic!
    let _reporter = resolve!(container, Reporter, "app.Reporter");
  }));

  assert!(result.is_err(), "resolve! should have panicked.");
  println!("Successfully caught the expected panic from resolve!.");
}

//! The global class registry and its access function.

use crate::registry::Registry;
use once_cell::sync::Lazy;
use std::sync::Arc;

// Created on first access in a thread-safe manner.
static GLOBAL_REGISTRY: Lazy<Arc<Registry>> = Lazy::new(|| Arc::new(Registry::new()));

/// Returns the process-wide class registry.
///
/// Classes registered here are visible to every container created with
/// [`Container::new`](crate::Container::new).
///
/// # Examples
///
/// ```
/// use fibre_wire::global;
///
/// struct Clock;
///
/// global().add_class("app.Clock", |args| {
///   args.expect_len(0)?;
///   Ok(Clock)
/// });
/// assert!(global().contains("app.Clock"));
/// ```
pub fn global() -> Arc<Registry> {
  Arc::clone(&GLOBAL_REGISTRY)
}

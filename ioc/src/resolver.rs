//! Finds the definition that satisfies a requested name.
//!
//! A definition is a candidate when its name equals the requested one, or when the
//! class it names implements the requested abstraction. Among candidates the last
//! one in the table wins, so appending an entry overrides every earlier entry for
//! the same abstraction without touching them.

use crate::config::{Definition, Definitions};
use crate::core::ResolutionContext;
use crate::error::{Error, Result};
use crate::registry::ClassRegistry;

fn is_compatible(definition: &Definition, requested: &str, registry: &dyn ClassRegistry) -> bool {
  definition.name == requested || registry.is_subtype(&definition.name, requested)
}

/// Every compatible definition, in table order, with its index.
pub(crate) fn candidates<'d>(
  requested: &str,
  definitions: &'d Definitions,
  registry: &dyn ClassRegistry,
) -> Vec<(usize, &'d Definition)> {
  definitions
    .iter()
    .enumerate()
    .filter(|(_, definition)| is_compatible(definition, requested, registry))
    .collect()
}

pub(crate) fn resolve<'d>(
  requested: &str,
  definitions: &'d Definitions,
  registry: &dyn ClassRegistry,
  context: &ResolutionContext<'_>,
) -> Result<&'d Definition> {
  let found = candidates(requested, definitions, registry);
  let (index, definition) = found
    .last()
    .copied()
    .ok_or_else(|| Error::UnresolvedDependency(requested.to_string()))?;

  if found.len() > 1 {
    tracing::debug!(
      requested,
      selected = %definition.name,
      index,
      shadowed = found.len() - 1,
      "Later definition overrides earlier candidates"
    );
  } else {
    tracing::trace!(requested, selected = %definition.name, index, "Resolved");
  }

  if context.is_active(requested) || context.is_active(&definition.name) {
    let chain = context.chain_to(requested);
    tracing::warn!(chain = ?chain, "Circular dependency");
    return Err(Error::CyclicDependency { chain });
  }

  Ok(definition)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::error::ArgError;
  use crate::registry::{Class, Registry};
  use pretty_assertions::assert_eq;

  trait Storage: Send + Sync {}
  struct Sql;
  impl Storage for Sql {}
  struct Xml;
  impl Storage for Xml {}

  fn registry() -> Registry {
    let registry = Registry::new();
    registry.register(
      Class::builder("n.Sql", |_| Ok::<_, ArgError>(Sql))
        .implements::<dyn Storage>("n.Storage", |c| c),
    );
    registry.register(
      Class::builder("n.Xml", |_| Ok::<_, ArgError>(Xml))
        .implements::<dyn Storage>("n.Storage", |c| c),
    );
    registry
  }

  #[test]
  fn exact_name_matches_without_registration() {
    let definitions = Definitions::from(vec![Definition::new("n.Unregistered")]);
    let registry = Registry::new();
    let context = ResolutionContext::new(&definitions);

    let definition = resolve("n.Unregistered", &definitions, &registry, &context).unwrap();
    assert_eq!(definition.name, "n.Unregistered");
  }

  #[test]
  fn last_compatible_candidate_wins() {
    let definitions = Definitions::from(vec![
      Definition::new("n.Sql"),
      Definition::new("n.Writer"),
      Definition::new("n.Xml"),
    ]);
    let registry = registry();
    let context = ResolutionContext::new(&definitions);

    let found: Vec<usize> = candidates("n.Storage", &definitions, &registry)
      .into_iter()
      .map(|(index, _)| index)
      .collect();
    assert_eq!(found, vec![0, 2]);

    let definition = resolve("n.Storage", &definitions, &registry, &context).unwrap();
    assert_eq!(definition.name, "n.Xml");
  }

  #[test]
  fn duplicate_names_prefer_the_later_entry() {
    let definitions = Definitions::from(vec![
      Definition::new("n.Sql").with_value("first"),
      Definition::new("n.Sql").with_value("second"),
    ]);
    let registry = registry();
    let context = ResolutionContext::new(&definitions);

    let definition = resolve("n.Sql", &definitions, &registry, &context).unwrap();
    assert_eq!(definition, definitions.get(1).unwrap());
  }

  #[test]
  fn no_candidate_is_unresolved() {
    let definitions = Definitions::from(vec![Definition::new("n.Writer")]);
    let registry = registry();
    let context = ResolutionContext::new(&definitions);

    let result = resolve("n.Storage", &definitions, &registry, &context);
    assert!(matches!(result, Err(Error::UnresolvedDependency(name)) if name == "n.Storage"));
  }

  #[test]
  fn active_selected_class_is_a_cycle() {
    let definitions = Definitions::from(vec![Definition::new("n.Sql")]);
    let registry = registry();
    let context = ResolutionContext::new(&definitions);
    let _guard = context.enter("n.Sql", "n.Sql");

    let result = resolve("n.Storage", &definitions, &registry, &context);
    if let Err(Error::CyclicDependency { chain }) = result {
      assert_eq!(chain, vec!["n.Sql", "n.Storage"]);
    } else {
      panic!("Expected CyclicDependency error");
    }
  }

  #[test]
  fn subtype_check_uses_declared_abstractions() {
    let registry = registry();
    assert!(registry.is_subtype("n.Sql", "n.Storage"));
    assert!(!registry.is_subtype("n.Sql", "n.Xml"));
    assert!(!registry.is_subtype("n.Missing", "n.Storage"));
  }
}

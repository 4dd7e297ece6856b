//! Core, non-public data structures for a single resolution pass.

use crate::config::Definitions;
use std::cell::RefCell;

#[derive(Debug, Clone)]
struct Frame {
  requested: String,
  class: String,
}

/// Per-call state for one top-level `get_instance`.
///
/// Holds the frames currently being resolved on this call's stack. A name found
/// here while resolving is a circular dependency. The definitions are borrowed
/// immutably for the whole pass.
pub(crate) struct ResolutionContext<'d> {
  definitions: &'d Definitions,
  stack: RefCell<Vec<Frame>>,
}

impl<'d> ResolutionContext<'d> {
  pub(crate) fn new(definitions: &'d Definitions) -> Self {
    Self {
      definitions,
      stack: RefCell::new(Vec::new()),
    }
  }

  pub(crate) fn definitions(&self) -> &'d Definitions {
    self.definitions
  }

  pub(crate) fn depth(&self) -> usize {
    self.stack.borrow().len()
  }

  /// Whether `name` is being resolved, either as a requested name or as the class
  /// selected for one.
  pub(crate) fn is_active(&self, name: &str) -> bool {
    self
      .stack
      .borrow()
      .iter()
      .any(|frame| frame.requested == name || frame.class == name)
  }

  /// The requested names on the stack, outermost first, followed by `name`.
  pub(crate) fn chain_to(&self, name: &str) -> Vec<String> {
    let stack = self.stack.borrow();
    stack
      .iter()
      .map(|frame| frame.requested.clone())
      .chain(std::iter::once(name.to_string()))
      .collect()
  }

  /// Pushes a frame that stays on the stack until the returned guard is dropped.
  pub(crate) fn enter(&self, requested: &str, class: &str) -> ResolutionGuard<'_> {
    self.stack.borrow_mut().push(Frame {
      requested: requested.to_string(),
      class: class.to_string(),
    });
    ResolutionGuard { stack: &self.stack }
  }
}

/// An RAII guard marking a name as under resolution.
///
/// Dropping it pops the frame, including when construction fails part way and the
/// error is propagated with `?`.
pub(crate) struct ResolutionGuard<'c> {
  stack: &'c RefCell<Vec<Frame>>,
}

impl Drop for ResolutionGuard<'_> {
  fn drop(&mut self) {
    self.stack.borrow_mut().pop();
  }
}

//! # Fibre Wire
//!
//! A declarative, configuration-driven dependency wiring container for Rust.
//!
//! Applications describe *what* to build as an ordered list of definitions (a class
//! name plus its constructor arguments) and ask the container for a fully wired
//! instance of one name. Definitions can come from code, YAML, or JSON, and can be
//! layered: appending a definition overrides earlier ones for the same abstraction.
//!
//! ## Core Concepts
//!
//! - **Definition**: a class name and its ordered arguments. An argument is either a
//!   nested reference, resolved recursively, or a literal passed through untouched.
//! - **Registry**: where classes are located by name. Each class has a constructor
//!   over positional [`Args`] and may declare abstractions it can be served as.
//! - **Resolution**: a requested name is satisfied by the *last* definition whose
//!   name equals it or whose class implements it. Cycles are reported as
//!   [`Error::CyclicDependency`].
//! - **No caching**: every call builds a new object graph.
//!
//! ## Quick Start
//!
//! ```
//! use fibre_wire::{Class, Container, Definition, Definitions, Registry};
//! use std::sync::Arc;
//!
//! trait Storage: Send + Sync {
//!   fn kind(&self) -> &'static str;
//! }
//!
//! struct SqlStorage;
//! impl Storage for SqlStorage {
//!   fn kind(&self) -> &'static str { "sql" }
//! }
//!
//! struct XmlStorage;
//! impl Storage for XmlStorage {
//!   fn kind(&self) -> &'static str { "xml" }
//! }
//!
//! struct Writer {
//!   storage: Arc<dyn Storage>,
//! }
//!
//! let registry = Arc::new(Registry::new());
//! registry.register(
//!   Class::builder("note.SqlStorage", |_| Ok(SqlStorage))
//!     .implements::<dyn Storage>("note.Storage", |c| c),
//! );
//! registry.register(
//!   Class::builder("note.XmlStorage", |_| Ok(XmlStorage))
//!     .implements::<dyn Storage>("note.Storage", |c| c),
//! );
//! registry.add_class("note.Writer", |args| {
//!   args.expect_len(1)?;
//!   Ok(Writer { storage: args.object::<dyn Storage>(0)? })
//! });
//!
//! let base = Definitions::from(vec![
//!   Definition::new("note.Writer").with_ref("note.Storage"),
//!   Definition::new("note.SqlStorage"),
//! ]);
//!
//! let container = Container::with_registry(base.clone(), registry.clone());
//! let writer = container.get_instance_as::<Writer>("note.Writer").unwrap();
//! assert_eq!(writer.storage.kind(), "sql");
//!
//! // Appending an override swaps the implementation without touching the base.
//! let overridden = base.chain(Definitions::from(vec![Definition::new("note.XmlStorage")]));
//! let container = Container::with_registry(overridden, registry);
//! let writer = container.get_instance_as::<Writer>("note.Writer").unwrap();
//! assert_eq!(writer.storage.kind(), "xml");
//! ```

pub mod config;
mod container;
mod core;
mod error;
mod global;
mod instance;
mod macros;
mod registry;
mod resolver;

pub use config::source::{find_config_layers, load_file, load_layers};
pub use config::{ArgSpec, Definition, Definitions, Format, RawArg, RawConfig, RawEntry};
pub use container::Container;
pub use error::{ArgError, Error, Result};
pub use global::global;
pub use instance::{Arg, Args, Instance};
pub use registry::{Class, ClassBuilder, ClassRegistry, Registry};

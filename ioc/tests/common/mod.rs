#![allow(dead_code)]

use fibre_wire::{ArgError, Class, Definition, Definitions, Registry};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub const APPLICATION: &str = "classes.Application";
pub const NOTE_WRITER: &str = "classes.note.NoteWriter";
pub const NOTE_STORAGE: &str = "classes.note.NoteStorage";
pub const SQL_STORAGE: &str = "classes.note.SQLNoteStorage";
pub const XML_STORAGE: &str = "classes.note.XmlFileNoteStorage";
pub const FORM_VIEW: &str = "views/write_form.php";

// --- Fixtures ---

pub trait NoteStorage: Send + Sync {
  fn backend(&self) -> &'static str;
}

#[derive(Debug)]
pub struct SqlNoteStorage;
impl NoteStorage for SqlNoteStorage {
  fn backend(&self) -> &'static str {
    "sql"
  }
}

#[derive(Debug)]
pub struct XmlFileNoteStorage;
impl NoteStorage for XmlFileNoteStorage {
  fn backend(&self) -> &'static str {
    "xml"
  }
}

pub struct NoteWriter {
  pub storage: Arc<dyn NoteStorage>,
}

pub struct Application {
  pub writer: Arc<NoteWriter>,
  pub view: String,
}

/// Counts constructor calls across a registry, to prove what was (not) built.
#[derive(Default)]
pub struct Constructions(AtomicUsize);

impl Constructions {
  pub fn bump(&self) {
    self.0.fetch_add(1, Ordering::SeqCst);
  }

  pub fn get(&self) -> usize {
    self.0.load(Ordering::SeqCst)
  }
}

pub fn note_registry() -> Arc<Registry> {
  note_registry_counting(Arc::new(Constructions::default()))
}

pub fn note_registry_counting(count: Arc<Constructions>) -> Arc<Registry> {
  let registry = Arc::new(Registry::new());

  let c = count.clone();
  registry.register(
    Class::builder(SQL_STORAGE, move |args| {
      args.expect_len(0)?;
      c.bump();
      Ok(SqlNoteStorage)
    })
    .implements::<dyn NoteStorage>(NOTE_STORAGE, |s| s),
  );

  let c = count.clone();
  registry.register(
    Class::builder(XML_STORAGE, move |args| {
      args.expect_len(0)?;
      c.bump();
      Ok(XmlFileNoteStorage)
    })
    .implements::<dyn NoteStorage>(NOTE_STORAGE, |s| s),
  );

  let c = count.clone();
  registry.add_class(NOTE_WRITER, move |args| {
    args.expect_len(1)?;
    c.bump();
    Ok(NoteWriter {
      storage: args.object::<dyn NoteStorage>(0)?,
    })
  });

  let c = count;
  registry.add_class(APPLICATION, move |args| {
    args.expect_len(2)?;
    c.bump();
    Ok(Application {
      writer: args.object::<NoteWriter>(0)?,
      view: args.str(1)?.to_string(),
    })
  });

  registry
}

pub fn base_definitions() -> Definitions {
  Definitions::from(vec![
    Definition::new(APPLICATION)
      .with_ref(NOTE_WRITER)
      .with_value(FORM_VIEW),
    Definition::new(NOTE_WRITER).with_ref(NOTE_STORAGE),
    Definition::new(SQL_STORAGE),
  ])
}

pub fn rejecting_constructor(_: fibre_wire::Args) -> Result<(), ArgError> {
  Err(ArgError::Rejected("refused".to_string()))
}

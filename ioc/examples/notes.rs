use fibre_wire::{config, global, Class, Container, RawArg, RawEntry};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

// 1. Define the abstraction and two interchangeable implementations.
trait NoteStorage: Send + Sync {
  fn save(&self, note: &str) -> String;
}

struct SqlNoteStorage;
impl NoteStorage for SqlNoteStorage {
  fn save(&self, note: &str) -> String {
    format!("INSERT INTO notes VALUES ('{}')", note)
  }
}

struct XmlFileNoteStorage;
impl NoteStorage for XmlFileNoteStorage {
  fn save(&self, note: &str) -> String {
    format!("<note>{}</note>", note)
  }
}

// 2. Services that depend on the abstraction, never on an implementation.
struct NoteWriter {
  storage: Arc<dyn NoteStorage>,
}

struct Application {
  writer: Arc<NoteWriter>,
  template: String,
}

impl Application {
  fn run(&self) {
    println!("Rendering {}", self.template);
    println!("Stored as: {}", self.writer.storage.save("buy milk"));
  }
}

fn register_classes() {
  let registry = global();
  registry.register(
    Class::builder("classes.note.SQLNoteStorage", |_| Ok(SqlNoteStorage))
      .implements::<dyn NoteStorage>("classes.note.NoteStorage", |s| s),
  );
  registry.register(
    Class::builder("classes.note.XmlFileNoteStorage", |_| Ok(XmlFileNoteStorage))
      .implements::<dyn NoteStorage>("classes.note.NoteStorage", |s| s),
  );
  registry.add_class("classes.note.NoteWriter", |args| {
    args.expect_len(1)?;
    Ok(NoteWriter {
      storage: args.object::<dyn NoteStorage>(0)?,
    })
  });
  registry.add_class("classes.Application", |args| {
    args.expect_len(2)?;
    Ok(Application {
      writer: args.object::<NoteWriter>(0)?,
      template: args.str(1)?.to_string(),
    })
  });
}

fn main() -> fibre_wire::Result<()> {
  // Run with RUST_LOG=fibre_wire=debug to watch the resolution.
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .init();

  register_classes();

  // --- Configuration ---
  let base = vec![
    RawEntry::new("classes.Application").with_args(vec![
      RawArg::nested("classes.note.NoteWriter"),
      RawArg::literal("views/write_form.php"),
    ]),
    RawEntry::new("classes.note.NoteWriter")
      .with_args(vec![RawArg::nested("classes.note.NoteStorage")]),
    RawEntry::new("classes.note.SQLNoteStorage"),
  ];

  // Overrides are appended, never merged: the XML storage now wins.
  let mut with_override = base.clone();
  with_override.push(RawEntry::new("classes.note.XmlFileNoteStorage"));

  println!("--- Base configuration ---");
  let container = Container::new(config::load(base)?);
  container
    .get_instance_as::<Application>("classes.Application")?
    .run();

  println!("\n--- With appended override ---");
  let container = Container::from_raw(with_override)?;
  container
    .get_instance_as::<Application>("classes.Application")?
    .run();

  Ok(())
}

pub mod cell;
pub mod editor;
pub mod events;
pub mod export;
pub mod legacy;
pub mod navigation;
pub mod ops;
pub mod section;
pub mod session;
pub mod summary;
pub mod template;

#[cfg(test)]
pub mod harness;

pub use cell::{Cell, ColorProperty, Slot};
pub use editor::{CellFocus, Editor, EditorPhase, Key, KeyInput, KeyOutcome, SelectionColors};
pub use export::{export_sections, ExportedSection};
pub use legacy::{normalize_section, normalize_sections};
pub use section::Section;
pub use summary::SummaryRow;
pub use template::SectionTemplate;

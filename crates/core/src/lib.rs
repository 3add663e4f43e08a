pub mod range;
pub mod selection;

pub use range::{CellPos, CellRange};
pub use selection::{PointerButton, Selection, SelectionState};

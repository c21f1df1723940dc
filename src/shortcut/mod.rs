//! Headless shortcut table: an ordered model of `(id, name, key)` rows with
//! a case-insensitive name filter, a single editable column and a change
//! notification carrying the unfiltered row's id.

mod model;
mod table;

pub use model::{Column, FilterProxy, Shortcut, ShortcutModel};
pub use table::{CellIndex, EditState, Key, KeyOutcome, ShortcutHandler, ShortcutTable};

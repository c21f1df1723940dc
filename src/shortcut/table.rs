use std::fmt;

use tracing::{debug, trace, warn};

use super::model::{Column, FilterProxy, Shortcut, ShortcutModel};
use crate::error::TableError;

/// Handler invoked with `(id, key)` whenever a shortcut cell is committed.
pub type ShortcutHandler = Box<dyn FnMut(&str, &str)>;

/// Tracks whether the current edit session was opened with the commit key.
///
/// Independent from whether an editor is open: a key release always returns
/// the state to `Idle`, even while the editor stays open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditState {
    #[default]
    Idle,
    EditingViaCommitKey,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Enter,
    Return,
    Tab,
    Escape,
    Up,
    Down,
    Function(u8),
    Char(char),
}

impl Key {
    pub fn is_commit(&self) -> bool {
        matches!(self, Key::Enter | Key::Return)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Enter => f.write_str("Enter"),
            Key::Return => f.write_str("Return"),
            Key::Tab => f.write_str("Tab"),
            Key::Escape => f.write_str("Escape"),
            Key::Up => f.write_str("Up"),
            Key::Down => f.write_str("Down"),
            Key::Function(n) => write!(f, "F{}", n),
            Key::Char(c) => write!(f, "{}", c),
        }
    }
}

/// Whether the table consumed a key event or left it to default handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Handled,
    Ignored,
}

/// A cell addressed in view (filtered) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellIndex {
    pub row: usize,
    pub column: Column,
}

impl CellIndex {
    pub fn new(row: usize, column: Column) -> Self {
        Self { row, column }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SourceCell {
    row: usize,
    column: Column,
}

/// Editable, filterable list of keyboard shortcuts.
///
/// Rows come from the host once and are never added or removed. Only the
/// `Shortcut` column is editable; every edit that changes a key is reported
/// to the subscribed handlers with the id read from the unfiltered model.
pub struct ShortcutTable {
    model: ShortcutModel,
    proxy: FilterProxy,
    current: Option<SourceCell>,
    editor: Option<SourceCell>,
    edit_state: EditState,
    handlers: Vec<ShortcutHandler>,
}

impl ShortcutTable {
    pub fn new(rows: Vec<Shortcut>) -> Self {
        let model = ShortcutModel::new(rows);
        let proxy = FilterProxy::new(&model);
        debug!("shortcut table constructed with {} rows", model.row_count());
        Self {
            model,
            proxy,
            current: None,
            editor: None,
            edit_state: EditState::Idle,
            handlers: Vec::new(),
        }
    }

    pub fn on_shortcut_updated<F>(&mut self, handler: F)
    where
        F: FnMut(&str, &str) + 'static,
    {
        self.handlers.push(Box::new(handler));
    }

    pub fn source_model(&self) -> &ShortcutModel {
        &self.model
    }

    pub fn source_row_count(&self) -> usize {
        self.model.row_count()
    }

    /// Number of rows passing the current filter.
    pub fn row_count(&self) -> usize {
        self.proxy.row_count()
    }

    pub fn header(&self, column: Column) -> &'static str {
        column.label()
    }

    pub fn is_column_hidden(&self, column: Column) -> bool {
        column.is_hidden()
    }

    pub fn visible_columns(&self) -> Vec<Column> {
        Column::ALL.into_iter().filter(|c| !c.is_hidden()).collect()
    }

    pub fn is_editable(&self, index: CellIndex) -> bool {
        index.column.is_editable() && index.row < self.row_count()
    }

    pub fn data(&self, row: usize, column: Column) -> Option<&str> {
        let source = self.proxy.map_to_source(row)?;
        self.model.data(source, column)
    }

    pub fn visible_rows(&self) -> Vec<&Shortcut> {
        (0..self.row_count())
            .filter_map(|row| self.proxy.map_to_source(row))
            .filter_map(|source| self.model.row(source))
            .collect()
    }

    /// View row currently showing the shortcut `id`, if it passes the filter.
    pub fn find_visible(&self, id: &str) -> Option<usize> {
        self.model
            .position(id)
            .and_then(|source| self.proxy.map_from_source(source))
    }

    pub fn filter(&self) -> &str {
        self.proxy.pattern()
    }

    /// Narrows the visible rows to names containing `pattern`, ignoring case.
    pub fn set_filter(&mut self, pattern: &str) {
        self.proxy.set_pattern(pattern, &self.model);
        if let Some(cell) = self.current {
            if self.proxy.map_from_source(cell.row).is_none() {
                self.current = None;
            }
        }
        if let Some(cell) = self.editor {
            if self.proxy.map_from_source(cell.row).is_none() {
                debug!("closing editor on filtered-out row {}", cell.row);
                self.editor = None;
            }
        }
        debug!(
            "filter {:?} leaves {} of {} rows visible",
            pattern,
            self.row_count(),
            self.source_row_count()
        );
    }

    /// Edits a cell through the filtered view.
    pub fn set_data(&mut self, row: usize, column: Column, value: &str) -> Result<(), TableError> {
        let source = self.source_row(row)?;
        self.write(SourceCell { row: source, column }, value)
    }

    /// Reports the committed row to every handler, reading the id and key
    /// from the unfiltered model.
    pub fn on_cell_committed(&mut self, source_row: usize) {
        let (id, key) = match self.model.row(source_row) {
            Some(shortcut) => (shortcut.id.clone(), shortcut.key.clone()),
            None => {
                warn!("commit for unknown source row {}", source_row);
                return;
            }
        };
        debug!("shortcut updated: {} -> {:?}", id, key);
        for handler in self.handlers.iter_mut() {
            handler(&id, &key);
        }
    }

    pub fn current(&self) -> Option<CellIndex> {
        let cell = self.current?;
        let row = self.proxy.map_from_source(cell.row)?;
        Some(CellIndex::new(row, cell.column))
    }

    pub fn set_current(&mut self, row: usize, column: Column) -> Result<(), TableError> {
        let source = self.source_row(row)?;
        self.current = Some(SourceCell { row: source, column });
        Ok(())
    }

    /// Opens an editor on `index`. Read-only or out-of-range cells are left alone.
    pub fn edit(&mut self, index: CellIndex) -> bool {
        if !index.column.is_editable() {
            return false;
        }
        match self.proxy.map_to_source(index.row) {
            Some(source) => {
                self.editor = Some(SourceCell {
                    row: source,
                    column: index.column,
                });
                true
            }
            None => false,
        }
    }

    pub fn editing_cell(&self) -> Option<CellIndex> {
        let cell = self.editor?;
        let row = self.proxy.map_from_source(cell.row)?;
        Some(CellIndex::new(row, cell.column))
    }

    pub fn is_editor_open(&self) -> bool {
        self.editor.is_some()
    }

    /// Writes `value` into the open editor's cell and closes the editor.
    pub fn commit_editor(&mut self, value: &str) -> Result<(), TableError> {
        let cell = self.editor.take().ok_or(TableError::NoEditor)?;
        self.write(cell, value)
    }

    pub fn close_editor(&mut self) {
        self.editor = None;
    }

    pub fn edit_state(&self) -> EditState {
        self.edit_state
    }

    pub fn has_editing_started(&self) -> bool {
        self.edit_state == EditState::EditingViaCommitKey
    }

    /// The commit key opens the editor on the current cell and is consumed.
    /// Every other key is left to default handling.
    pub fn key_pressed(&mut self, key: &Key) -> KeyOutcome {
        if !key.is_commit() {
            trace!("key press {} ignored", key);
            return KeyOutcome::Ignored;
        }
        if let Some(index) = self.current() {
            self.edit(index);
        }
        self.edit_state = EditState::EditingViaCommitKey;
        debug!("editing started via {}", key);
        KeyOutcome::Handled
    }

    pub fn key_released(&mut self, key: &Key) -> KeyOutcome {
        trace!("key release {}", key);
        self.edit_state = EditState::Idle;
        KeyOutcome::Ignored
    }

    fn source_row(&self, row: usize) -> Result<usize, TableError> {
        self.proxy
            .map_to_source(row)
            .ok_or(TableError::RowOutOfRange {
                row,
                rows: self.row_count(),
            })
    }

    fn write(&mut self, cell: SourceCell, value: &str) -> Result<(), TableError> {
        if !cell.column.is_editable() {
            return Err(TableError::NotEditable {
                column: cell.column.label(),
            });
        }
        match self.model.set_key(cell.row, value) {
            Some(true) => self.on_cell_committed(cell.row),
            Some(false) => trace!("row {} already bound to {:?}", cell.row, value),
            None => {
                return Err(TableError::RowOutOfRange {
                    row: cell.row,
                    rows: self.source_row_count(),
                })
            }
        }
        Ok(())
    }
}

impl fmt::Debug for ShortcutTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShortcutTable")
            .field("rows", &self.model.row_count())
            .field("visible", &self.proxy.row_count())
            .field("filter", &self.proxy.pattern())
            .field("edit_state", &self.edit_state)
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Updates = Rc<RefCell<Vec<(String, String)>>>;

    fn rows() -> Vec<Shortcut> {
        vec![
            Shortcut::new("a1", "Select all", "Ctrl+A"),
            Shortcut::new("b2", "Copy", "Ctrl+C"),
            Shortcut::new("c3", "Paste", "Ctrl+V"),
            Shortcut::new("d4", "Copy selection as hex", ""),
        ]
    }

    fn table_with_recorder() -> (ShortcutTable, Updates) {
        let mut table = ShortcutTable::new(rows());
        let updates: Updates = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&updates);
        table.on_shortcut_updated(move |id, key| {
            sink.borrow_mut().push((id.to_string(), key.to_string()));
        });
        (table, updates)
    }

    #[test]
    fn test_construct() {
        let table = ShortcutTable::new(rows());
        assert_eq!(table.source_row_count(), 4);
        assert_eq!(table.row_count(), 4);
        assert!(table.is_column_hidden(Column::Id));
        assert_eq!(table.visible_columns(), vec![Column::Name, Column::Shortcut]);
        assert!(!table.is_editable(CellIndex::new(0, Column::Id)));
        assert!(!table.is_editable(CellIndex::new(0, Column::Name)));
        assert!(table.is_editable(CellIndex::new(0, Column::Shortcut)));
        assert_eq!(table.header(Column::Shortcut), "Shortcut");
        assert_eq!(table.edit_state(), EditState::Idle);
    }

    #[test]
    fn test_construct_empty() {
        let table = ShortcutTable::new(Vec::new());
        assert_eq!(table.source_row_count(), 0);
        assert_eq!(table.row_count(), 0);
        assert!(table.visible_rows().is_empty());
    }

    #[test]
    fn test_edit_emits_once() {
        let (mut table, updates) = table_with_recorder();
        table.set_data(2, Column::Shortcut, "Ctrl+Shift+V").unwrap();
        assert_eq!(
            *updates.borrow(),
            vec![("c3".to_string(), "Ctrl+Shift+V".to_string())]
        );
        assert_eq!(table.data(2, Column::Shortcut), Some("Ctrl+Shift+V"));
    }

    #[test]
    fn test_edit_under_filter_uses_source_id() {
        let (mut table, updates) = table_with_recorder();
        table.set_filter("copy");
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.data(1, Column::Name), Some("Copy selection as hex"));

        table.set_data(1, Column::Shortcut, "Ctrl+H").unwrap();
        assert_eq!(*updates.borrow(), vec![("d4".to_string(), "Ctrl+H".to_string())]);
        assert_eq!(table.source_model().data(3, Column::Shortcut), Some("Ctrl+H"));
        assert_eq!(table.source_model().data(1, Column::Shortcut), Some("Ctrl+C"));
    }

    #[test]
    fn test_read_only_columns_rejected() {
        let (mut table, updates) = table_with_recorder();
        assert_eq!(
            table.set_data(0, Column::Name, "Renamed"),
            Err(TableError::NotEditable { column: "Name" })
        );
        assert_eq!(
            table.set_data(0, Column::Id, "zz"),
            Err(TableError::NotEditable { column: "Id" })
        );
        assert_eq!(table.data(0, Column::Name), Some("Select all"));
        assert_eq!(table.data(0, Column::Id), Some("a1"));
        assert!(updates.borrow().is_empty());
    }

    #[test]
    fn test_out_of_range_rejected() {
        let (mut table, updates) = table_with_recorder();
        table.set_filter("paste");
        assert_eq!(
            table.set_data(1, Column::Shortcut, "X"),
            Err(TableError::RowOutOfRange { row: 1, rows: 1 })
        );
        assert!(updates.borrow().is_empty());
    }

    #[test]
    fn test_unchanged_key_emits_nothing() {
        let (mut table, updates) = table_with_recorder();
        table.set_data(0, Column::Shortcut, "Ctrl+A").unwrap();
        assert!(updates.borrow().is_empty());

        table.set_current(0, Column::Shortcut).unwrap();
        table.key_pressed(&Key::Return);
        table.commit_editor("Ctrl+A").unwrap();
        assert!(updates.borrow().is_empty());
        assert!(!table.is_editor_open());
    }

    #[test]
    fn test_filter_closes_hidden_editor() {
        let (mut table, updates) = table_with_recorder();
        assert!(table.edit(CellIndex::new(0, Column::Shortcut)));
        table.set_filter("paste");
        assert!(!table.is_editor_open());
        assert_eq!(table.commit_editor("Z"), Err(TableError::NoEditor));
        assert_eq!(table.source_model().data(0, Column::Shortcut), Some("Ctrl+A"));
        assert!(updates.borrow().is_empty());
    }

    #[test]
    fn test_filter_keeps_visible_editor() {
        let mut table = ShortcutTable::new(rows());
        assert!(table.edit(CellIndex::new(3, Column::Shortcut)));
        table.set_filter("copy");
        assert_eq!(table.editing_cell(), Some(CellIndex::new(1, Column::Shortcut)));
    }

    #[test]
    fn test_filter_text_kept_as_given() {
        let mut table = ShortcutTable::new(rows());
        table.set_filter("COPY");
        assert_eq!(table.filter(), "COPY");
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_key_is_not_validated() {
        let (mut table, updates) = table_with_recorder();
        table.set_data(0, Column::Shortcut, "not a real binding!!").unwrap();
        table.set_data(0, Column::Shortcut, "").unwrap();
        assert_eq!(updates.borrow().len(), 2);
        assert_eq!(updates.borrow()[1], ("a1".to_string(), String::new()));
    }

    #[test]
    fn test_filter_does_not_alter_data() {
        let mut table = ShortcutTable::new(rows());
        let before = table.source_model().rows().to_vec();
        table.set_filter("PASTE");
        let visible: Vec<_> = table.visible_rows().into_iter().map(|s| s.id.as_str()).collect();
        assert_eq!(visible, vec!["c3"]);
        table.set_filter("");
        assert_eq!(table.row_count(), 4);
        assert_eq!(table.source_model().rows(), before.as_slice());
    }

    #[test]
    fn test_filter_hides_and_shows() {
        let mut table = ShortcutTable::new(rows());
        table.set_filter("Se");
        let names: Vec<_> = table.visible_rows().into_iter().map(|s| s.name.clone()).collect();
        assert_eq!(names, vec!["Select all", "Copy selection as hex"]);
        assert_eq!(table.find_visible("d4"), Some(1));
        assert_eq!(table.find_visible("b2"), None);
    }

    #[test]
    fn test_multiple_handlers_in_order() {
        let mut table = ShortcutTable::new(rows());
        let log = Rc::new(RefCell::new(Vec::new()));
        let first = Rc::clone(&log);
        let second = Rc::clone(&log);
        table.on_shortcut_updated(move |id, _| first.borrow_mut().push(format!("first:{}", id)));
        table.on_shortcut_updated(move |id, _| second.borrow_mut().push(format!("second:{}", id)));
        table.set_data(1, Column::Shortcut, "Ctrl+Insert").unwrap();
        assert_eq!(*log.borrow(), vec!["first:b2", "second:b2"]);
    }

    #[test]
    fn test_commit_key_starts_editing() {
        let mut table = ShortcutTable::new(rows());
        table.set_current(1, Column::Shortcut).unwrap();
        assert_eq!(table.key_pressed(&Key::Return), KeyOutcome::Handled);
        assert!(table.has_editing_started());
        assert_eq!(table.edit_state(), EditState::EditingViaCommitKey);
        assert_eq!(table.editing_cell(), Some(CellIndex::new(1, Column::Shortcut)));
    }

    #[test]
    fn test_enter_behaves_like_return() {
        let mut table = ShortcutTable::new(rows());
        table.set_current(0, Column::Shortcut).unwrap();
        assert_eq!(table.key_pressed(&Key::Enter), KeyOutcome::Handled);
        assert!(table.is_editor_open());
    }

    #[test]
    fn test_commit_key_on_read_only_cell() {
        let mut table = ShortcutTable::new(rows());
        table.set_current(0, Column::Name).unwrap();
        assert_eq!(table.key_pressed(&Key::Return), KeyOutcome::Handled);
        assert!(table.has_editing_started());
        assert!(!table.is_editor_open());
    }

    #[test]
    fn test_other_keys_fall_through() {
        let mut table = ShortcutTable::new(rows());
        table.set_current(0, Column::Shortcut).unwrap();
        for key in [Key::Char('a'), Key::Function(2), Key::Escape, Key::Down] {
            assert_eq!(table.key_pressed(&key), KeyOutcome::Ignored);
            assert_eq!(table.edit_state(), EditState::Idle);
        }
        assert!(!table.is_editor_open());
    }

    #[test]
    fn test_any_release_clears_state() {
        let mut table = ShortcutTable::new(rows());
        table.set_current(0, Column::Shortcut).unwrap();
        for released in [Key::Return, Key::Char('x'), Key::Up] {
            table.key_pressed(&Key::Return);
            assert!(table.has_editing_started());
            assert_eq!(table.key_released(&released), KeyOutcome::Ignored);
            assert_eq!(table.edit_state(), EditState::Idle);
        }
        // releasing without a prior press keeps it idle
        table.key_released(&Key::Char('q'));
        assert_eq!(table.edit_state(), EditState::Idle);
    }

    #[test]
    fn test_release_keeps_editor_open() {
        let mut table = ShortcutTable::new(rows());
        table.set_current(2, Column::Shortcut).unwrap();
        table.key_pressed(&Key::Return);
        table.key_released(&Key::Return);
        assert!(table.is_editor_open());
    }

    #[test]
    fn test_commit_editor_emits() {
        let (mut table, updates) = table_with_recorder();
        table.set_filter("paste");
        table.set_current(0, Column::Shortcut).unwrap();
        table.key_pressed(&Key::Return);
        table.key_released(&Key::Return);
        table.commit_editor("Shift+Insert").unwrap();
        assert!(!table.is_editor_open());
        assert_eq!(
            *updates.borrow(),
            vec![("c3".to_string(), "Shift+Insert".to_string())]
        );
    }

    #[test]
    fn test_commit_without_editor() {
        let (mut table, updates) = table_with_recorder();
        assert_eq!(table.commit_editor("X"), Err(TableError::NoEditor));
        assert!(updates.borrow().is_empty());
    }

    #[test]
    fn test_close_editor_discards() {
        let (mut table, updates) = table_with_recorder();
        assert!(table.edit(CellIndex::new(0, Column::Shortcut)));
        table.close_editor();
        assert!(!table.is_editor_open());
        assert!(updates.borrow().is_empty());
        assert_eq!(table.data(0, Column::Shortcut), Some("Ctrl+A"));
    }

    #[test]
    fn test_edit_read_only_is_noop() {
        let mut table = ShortcutTable::new(rows());
        assert!(!table.edit(CellIndex::new(0, Column::Name)));
        assert!(!table.edit(CellIndex::new(9, Column::Shortcut)));
        assert!(!table.is_editor_open());
    }

    #[test]
    fn test_filter_drops_hidden_current() {
        let mut table = ShortcutTable::new(rows());
        table.set_current(0, Column::Shortcut).unwrap();
        table.set_filter("paste");
        assert_eq!(table.current(), None);
        assert_eq!(table.key_pressed(&Key::Return), KeyOutcome::Handled);
        assert!(!table.is_editor_open());
    }

    #[test]
    fn test_current_follows_filter() {
        let mut table = ShortcutTable::new(rows());
        table.set_current(3, Column::Shortcut).unwrap();
        table.set_filter("copy");
        assert_eq!(table.current(), Some(CellIndex::new(1, Column::Shortcut)));
    }

    #[test]
    fn test_on_cell_committed_unknown_row() {
        let (mut table, updates) = table_with_recorder();
        table.on_cell_committed(42);
        assert!(updates.borrow().is_empty());
    }
}

use serde::{Deserialize, Serialize};

/// One registered keyboard shortcut as supplied by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shortcut {
    pub id: String,
    pub name: String,
    pub key: String,
}

impl Shortcut {
    pub fn new(id: impl Into<String>, name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            key: key.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Id,
    Name,
    Shortcut,
}

impl Column {
    pub const ALL: [Column; 3] = [Column::Id, Column::Name, Column::Shortcut];

    pub fn label(&self) -> &'static str {
        match self {
            Column::Id => "Id",
            Column::Name => "Name",
            Column::Shortcut => "Shortcut",
        }
    }

    pub fn is_editable(&self) -> bool {
        matches!(self, Column::Shortcut)
    }

    pub fn is_hidden(&self) -> bool {
        matches!(self, Column::Id)
    }
}

/// Authoritative row storage. Only the `key` of an existing row can change.
#[derive(Debug, Clone, Default)]
pub struct ShortcutModel {
    rows: Vec<Shortcut>,
}

impl ShortcutModel {
    pub fn new(rows: Vec<Shortcut>) -> Self {
        Self { rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn row(&self, row: usize) -> Option<&Shortcut> {
        self.rows.get(row)
    }

    pub fn rows(&self) -> &[Shortcut] {
        &self.rows
    }

    pub fn data(&self, row: usize, column: Column) -> Option<&str> {
        let shortcut = self.rows.get(row)?;
        Some(match column {
            Column::Id => &shortcut.id,
            Column::Name => &shortcut.name,
            Column::Shortcut => &shortcut.key,
        })
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.rows.iter().position(|s| s.id == id)
    }

    /// Stores `key` for `row`. Returns whether the key changed, or `None`
    /// when the row does not exist.
    pub(crate) fn set_key(&mut self, row: usize, key: &str) -> Option<bool> {
        let shortcut = self.rows.get_mut(row)?;
        if shortcut.key == key {
            return Some(false);
        }
        shortcut.key = key.to_string();
        Some(true)
    }
}

/// Derived view over a [`ShortcutModel`] holding only source row indices.
///
/// Rows whose name contains the filter string (ignoring case) are visible,
/// in source order. An empty filter shows every row.
#[derive(Debug, Clone, Default)]
pub struct FilterProxy {
    pattern: String,
    visible: Vec<usize>,
}

impl FilterProxy {
    pub fn new(model: &ShortcutModel) -> Self {
        let mut proxy = Self::default();
        proxy.refresh(model);
        proxy
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn set_pattern(&mut self, pattern: &str, model: &ShortcutModel) {
        self.pattern = pattern.to_string();
        self.refresh(model);
    }

    pub fn refresh(&mut self, model: &ShortcutModel) {
        let needle = self.pattern.to_lowercase();
        self.visible = model
            .rows()
            .iter()
            .enumerate()
            .filter(|(_, s)| needle.is_empty() || s.name.to_lowercase().contains(&needle))
            .map(|(idx, _)| idx)
            .collect();
    }

    pub fn row_count(&self) -> usize {
        self.visible.len()
    }

    pub fn map_to_source(&self, view_row: usize) -> Option<usize> {
        self.visible.get(view_row).copied()
    }

    pub fn map_from_source(&self, source_row: usize) -> Option<usize> {
        self.visible.iter().position(|&r| r == source_row)
    }
}

use std::cell::RefCell;
use std::fs;
use std::path::Path;
use std::rc::Rc;

use tracing::info;

use decoderpp::error::{Result, TableError};
use decoderpp::shortcut::{Column, Key, Shortcut, ShortcutTable};

pub fn load_shortcuts(path: &Path) -> Result<Vec<Shortcut>> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

pub fn save_shortcuts(path: &Path, shortcuts: &[Shortcut]) -> Result<()> {
    let mut data = serde_json::to_string_pretty(shortcuts)?;
    data.push('\n');
    fs::write(path, data)?;
    Ok(())
}

pub fn run_shortcut_list(path: &Path, filter: &str) -> Result<Vec<Shortcut>> {
    let mut table = ShortcutTable::new(load_shortcuts(path)?);
    table.set_filter(filter);
    Ok(table.visible_rows().into_iter().cloned().collect())
}

/// Edits one shortcut through the table the way a user would (select the
/// cell, press Enter, type, commit) and persists the result from the
/// update notification.
pub fn run_shortcut_set(path: &Path, filter: &str, id: &str, key: &str) -> Result<Shortcut> {
    let registry = Rc::new(RefCell::new(load_shortcuts(path)?));
    let mut table = ShortcutTable::new(registry.borrow().clone());

    let sink = Rc::clone(&registry);
    table.on_shortcut_updated(move |id, key| {
        info!("shortcut '{}' bound to {:?}", id, key);
        if let Some(shortcut) = sink.borrow_mut().iter_mut().find(|s| s.id == id) {
            shortcut.key = key.to_string();
        }
    });

    table.set_filter(filter);
    let row = table
        .find_visible(id)
        .ok_or_else(|| TableError::UnknownId { id: id.to_string() })?;
    table.set_current(row, Column::Shortcut)?;
    table.key_pressed(&Key::Return);
    table.key_released(&Key::Return);
    table.commit_editor(key)?;

    let shortcuts = registry.borrow().clone();
    save_shortcuts(path, &shortcuts)?;

    Ok(shortcuts
        .into_iter()
        .find(|s| s.id == id)
        .unwrap_or_else(|| Shortcut::new(id, "", key)))
}

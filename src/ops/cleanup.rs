//! Post-rewrite cleanup of the manifest.

use toml_edit::{DocumentMut, Item, Table};

/// Dependencies that are always stripped from `[dependencies]`.
pub const DENIED_DEPENDENCIES: [&str; 2] = ["pickledb", "winreg"];

/// Replaces `[package]` with an empty table.
///
/// The package identity is filled in by whoever consumes the generated
/// manifest.
pub fn reset_package(doc: &mut DocumentMut) {
    doc["package"] = Item::Table(Table::new());
}

/// Removes the named entries from the top-level `[dependencies]` table and
/// returns the names that were actually present.
pub fn remove_dependencies<S: AsRef<str>>(doc: &mut DocumentMut, names: &[S]) -> Vec<String> {
    let Some(deps) = doc
        .get_mut("dependencies")
        .and_then(Item::as_table_like_mut)
    else {
        return Vec::new();
    };

    names
        .iter()
        .map(|name| name.as_ref())
        .filter(|name| deps.remove(name).is_some())
        .map(str::to_string)
        .collect()
}

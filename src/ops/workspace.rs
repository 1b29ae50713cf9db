//! Workspace flattening.
//!
//! Lifts the shared settings of a `[workspace]` section to the top level of
//! the manifest so it can be consumed as a single package manifest:
//!
//! ```toml
//! [workspace]                      # removed
//! members = ["a", "b"]             # discarded
//!
//! [workspace.dependencies]         # becomes [dependencies]
//! serde = "1"
//! ```

use toml_edit::DocumentMut;

/// Workspace keys that only make sense for a multi-package workspace.
pub const DISCARDED_KEYS: [&str; 3] = ["members", "exclude", "resolver"];

/// What happened to each key of the removed `[workspace]` section.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FlattenReport {
    /// Keys copied to the top level.
    pub moved: Vec<String>,
    /// Keys dropped because a top-level key of the same name already existed.
    pub shadowed: Vec<String>,
    /// Membership keys dropped unconditionally.
    pub discarded: Vec<String>,
}

/// Removes `[workspace]` and moves its keys to the top level.
///
/// Existing top-level keys always win over the workspace's keys of the same
/// name. Without a `[workspace]` section this is a no-op.
pub fn flatten_workspace(doc: &mut DocumentMut) -> FlattenReport {
    let mut report = FlattenReport::default();

    let Some(workspace) = doc.remove("workspace") else {
        return report;
    };

    let mut workspace = match workspace.into_table() {
        Ok(table) => table,
        Err(other) => {
            log::warn!(
                "Dropping `workspace` key that is not a table ({})",
                other.type_name()
            );
            return report;
        }
    };

    let keys: Vec<String> = workspace.iter().map(|(key, _)| key.to_string()).collect();
    for key in keys {
        let Some(item) = workspace.remove(&key) else {
            continue;
        };

        if DISCARDED_KEYS.contains(&key.as_str()) {
            report.discarded.push(key);
        } else if doc.contains_key(&key) {
            log::debug!("Keeping existing top-level `{}` over workspace.{}", key, key);
            report.shadowed.push(key);
        } else {
            doc.insert(&key, item);
            report.moved.push(key);
        }
    }

    log::debug!(
        "Flattened workspace: moved {:?}, shadowed {:?}, discarded {:?}",
        report.moved,
        report.shadowed,
        report.discarded
    );
    report
}

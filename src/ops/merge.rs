//! Merging of the auxiliary manifest fragment.
//!
//! Each top-level section of the fragment is merged key by key into the
//! manifest: the fragment wins on overlapping keys, every other key of the
//! manifest's section is kept.

use toml_edit::{DocumentMut, Item, Table, TableLike};

/// Default fragment file name, looked up in the current directory.
pub const DEFAULT_FRAGMENT: &str = "solfuzz_agave.toml";

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MergeReport {
    /// Sections the fragment's keys were merged into.
    pub merged: Vec<String>,
    /// Sections left alone because the manifest holds a non-table value there.
    pub skipped: Vec<String>,
}

/// Merges every top-level section of `fragment` into `doc`.
pub fn merge_fragment(doc: &mut DocumentMut, fragment: &DocumentMut) -> MergeReport {
    let mut report = MergeReport::default();

    for (section, item) in fragment.iter() {
        let Some(values) = item.as_table_like() else {
            merge_plain_value(doc, section, item, &mut report);
            continue;
        };

        if !doc.contains_key(section) {
            let mut table = Table::new();
            table.set_implicit(item.as_table().is_some_and(Table::is_implicit));
            doc.insert(section, Item::Table(table));
        }

        let Some(target) = doc.get_mut(section).and_then(Item::as_table_like_mut) else {
            log::debug!("Not merging into `{}`: existing value is not a table", section);
            report.skipped.push(section.to_string());
            continue;
        };

        merge_table(target, values);
        report.merged.push(section.to_string());
    }

    report
}

fn merge_table(target: &mut dyn TableLike, values: &dyn TableLike) {
    for (key, value) in values.iter() {
        target.insert(key, value.clone());
    }
}

/// Fragment sections that are plain values are only added when missing.
fn merge_plain_value(doc: &mut DocumentMut, section: &str, value: &Item, report: &mut MergeReport) {
    if doc.contains_key(section) {
        log::warn!(
            "Fragment key `{}` is not a table and the manifest already defines it; keeping the manifest's value",
            section
        );
        report.skipped.push(section.to_string());
    } else {
        doc.insert(section, value.clone());
        report.merged.push(section.to_string());
    }
}

//! Path dependency rewriting.
//!
//! Walks the whole manifest and replaces every table that carries a `path`
//! key with a reference to the pinned revision or to the local checkout.
//! The replacement is total: sibling keys such as `version` or `features`
//! are dropped.
//!
//! ```toml
//! # before
//! solana-sdk = { path = "sdk", version = "=2.1.0" }
//!
//! # after, git target
//! solana-sdk = { git = "https://github.com/firedancer-io/agave", rev = "abc123" }
//!
//! # after, local target with base "/src/agave"
//! solana-sdk = { path = "/src/agave/sdk" }
//! ```
//!
//! Only entries of a table are candidates for replacement. Elements of an
//! array or array of tables are descended into but never replaced
//! themselves, so `[[bin]] path = "src/main.rs"` survives.
//!
//! Rewriting with a [`RewriteTarget::Local`] is not idempotent: the rewritten
//! entry still carries a `path` and a second pass prefixes it again.

use crate::error::{RetargetError, Result};
use toml_edit::{DocumentMut, InlineTable, Item, TableLike, Value};

/// Replacement policy for path dependencies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteTarget {
    /// `{ git = url, rev = rev }`
    Git { url: String, rev: String },
    /// `{ path = "<base>/<original path>" }`
    Local { base: String },
}

impl RewriteTarget {
    fn replacement(&self, key: &str, original: &dyn TableLike) -> Result<InlineTable> {
        let mut table = InlineTable::new();
        match self {
            RewriteTarget::Git { url, rev } => {
                table.insert("git", Value::from(url.as_str()));
                table.insert("rev", Value::from(rev.as_str()));
            }
            RewriteTarget::Local { base } => {
                let path = original
                    .get("path")
                    .and_then(Item::as_str)
                    .ok_or_else(|| RetargetError::InvalidPath(key.to_string()))?;
                table.insert("path", Value::from(format!("{base}/{path}")));
            }
        }
        Ok(table)
    }
}

/// Rewrites every path dependency in `doc`, returning how many entries were
/// replaced.
pub fn rewrite_path_dependencies(doc: &mut DocumentMut, target: &RewriteTarget) -> Result<usize> {
    let replaced = rewrite_table(doc.as_table_mut(), target)?;
    log::debug!("Rewrote {} path dependencies", replaced);
    Ok(replaced)
}

fn rewrite_table(table: &mut dyn TableLike, target: &RewriteTarget) -> Result<usize> {
    let mut replaced = 0;
    for (key, item) in table.iter_mut() {
        replaced += rewrite_entry(key.get(), item, target)?;
    }
    Ok(replaced)
}

fn rewrite_entry(key: &str, item: &mut Item, target: &RewriteTarget) -> Result<usize> {
    if let Some(replacement) = replacement_for(key, item, target)? {
        log::trace!("Rewriting path dependency `{}`", key);
        *item = Item::Value(Value::InlineTable(replacement));
        return Ok(1);
    }

    match item {
        Item::Table(table) => rewrite_table(table, target),
        Item::ArrayOfTables(array) => {
            let mut replaced = 0;
            for table in array.iter_mut() {
                replaced += rewrite_table(table, target)?;
            }
            Ok(replaced)
        }
        Item::Value(value) => rewrite_value(value, target),
        Item::None => Ok(0),
    }
}

/// Descends into a value that is not itself being replaced.
fn rewrite_value(value: &mut Value, target: &RewriteTarget) -> Result<usize> {
    match value {
        Value::InlineTable(table) => rewrite_table(table, target),
        Value::Array(array) => {
            let mut replaced = 0;
            for element in array.iter_mut() {
                replaced += rewrite_value(element, target)?;
            }
            Ok(replaced)
        }
        Value::String(_)
        | Value::Integer(_)
        | Value::Float(_)
        | Value::Boolean(_)
        | Value::Datetime(_) => Ok(0),
    }
}

fn replacement_for(key: &str, item: &Item, target: &RewriteTarget) -> Result<Option<InlineTable>> {
    let table: &dyn TableLike = match item {
        Item::Table(table) => table,
        Item::Value(Value::InlineTable(table)) => table,
        Item::Value(_) | Item::ArrayOfTables(_) | Item::None => return Ok(None),
    };

    if table.contains_key("path") {
        target.replacement(key, table).map(Some)
    } else {
        Ok(None)
    }
}

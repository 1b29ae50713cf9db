mod cleanup;
mod emit;
mod merge;
mod rewrite;
mod workspace;

pub use cleanup::{DENIED_DEPENDENCIES, remove_dependencies, reset_package};
pub use emit::write_manifest;
pub use merge::{DEFAULT_FRAGMENT, MergeReport, merge_fragment};
pub use rewrite::{RewriteTarget, rewrite_path_dependencies};
pub use workspace::{DISCARDED_KEYS, FlattenReport, flatten_workspace};

use crate::error::Result;
use toml_edit::DocumentMut;

/// Outcome of a full [`retarget`] pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Summary {
    pub flatten: FlattenReport,
    pub rewritten: usize,
    pub removed: Vec<String>,
    pub merge: MergeReport,
}

/// Runs every manifest pass in order: flatten the workspace, rewrite path
/// dependencies, reset `[package]`, drop `removed` dependencies, then merge
/// `fragment`.
pub fn retarget<S: AsRef<str>>(
    doc: &mut DocumentMut,
    target: &RewriteTarget,
    fragment: &DocumentMut,
    removed: &[S],
) -> Result<Summary> {
    let flatten = flatten_workspace(doc);
    let rewritten = rewrite_path_dependencies(doc, target)?;

    reset_package(doc);
    let removed = remove_dependencies(doc, removed);
    let merge = merge_fragment(doc, fragment);

    Ok(Summary {
        flatten,
        rewritten,
        removed,
        merge,
    })
}

use crate::error::{RetargetError, Result};
use std::fs;
use std::path::Path;
use toml_edit::DocumentMut;

/// Writes the rendered manifest to `output`, replacing any existing file.
///
/// In dry-run mode the manifest goes to stdout and nothing is written.
pub fn write_manifest(doc: &DocumentMut, output: &Path, dry_run: bool) -> Result<()> {
    let rendered = doc.to_string();

    if dry_run {
        log::info!("Would write: {}", output.display());
        print!("{}", rendered);
        return Ok(());
    }

    fs::write(output, rendered).map_err(|source| RetargetError::Write {
        path: output.to_path_buf(),
        source,
    })?;
    log::debug!("Wrote: {}", output.display());
    Ok(())
}

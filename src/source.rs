//! Source manifest acquisition.
//!
//! A manifest is either read from a local checkout (`<root>/Cargo.toml`) or
//! downloaded from a raw-file host into a staging directory and read from
//! there.

use crate::error::{RetargetError, Result};
use crate::ops::RewriteTarget;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use toml_edit::DocumentMut;

pub const MANIFEST_FILE: &str = "Cargo.toml";
pub const DEFAULT_REPOSITORY: &str = "firedancer-io/agave";
pub const DEFAULT_RAW_BASE_URL: &str = "https://raw.githubusercontent.com";
pub const DEFAULT_STAGING_DIR: &str = "dump";

/// Where the manifest to retarget comes from.
#[derive(Debug, Clone)]
pub enum Source {
    /// A local checkout; path dependencies are re-rooted under `root`.
    Local { root: String },
    /// A pinned revision of a remote repository.
    Remote(RemoteSource),
}

#[derive(Debug, Clone)]
pub struct RemoteSource {
    pub commit: String,
    /// `owner/name` on the git host.
    pub repository: String,
    pub raw_base_url: String,
    pub staging_dir: PathBuf,
    /// Abort instead of falling back to the staged file when the download fails.
    pub strict: bool,
}

impl RemoteSource {
    pub fn new(commit: impl Into<String>) -> Self {
        Self {
            commit: commit.into(),
            repository: DEFAULT_REPOSITORY.to_string(),
            raw_base_url: DEFAULT_RAW_BASE_URL.to_string(),
            staging_dir: PathBuf::from(DEFAULT_STAGING_DIR),
            strict: false,
        }
    }

    /// URL of the manifest at the pinned revision.
    pub fn manifest_url(&self) -> String {
        format!(
            "{}/{}/{}/{}",
            self.raw_base_url.trim_end_matches('/'),
            self.repository,
            self.commit,
            MANIFEST_FILE
        )
    }

    /// Git URL that rewritten dependencies point at.
    pub fn git_url(&self) -> String {
        format!("https://github.com/{}", self.repository)
    }

    pub fn staged_manifest(&self) -> PathBuf {
        self.staging_dir.join(MANIFEST_FILE)
    }

    /// Downloads the manifest into the staging directory and returns the
    /// staged path.
    ///
    /// A transport failure is only logged unless `strict` is set: the caller
    /// goes on to read whatever is already staged, which may be a file left
    /// over from an earlier run. An error status from the server always
    /// aborts.
    pub fn fetch(&self) -> Result<PathBuf> {
        fs::create_dir_all(&self.staging_dir)?;
        let staged = self.staged_manifest();
        let url = self.manifest_url();

        log::info!("Downloading {}", url);
        match download(&url) {
            Ok(body) => {
                fs::write(&staged, body).map_err(|source| RetargetError::Write {
                    path: staged.clone(),
                    source,
                })?;
                log::debug!("Staged manifest at {}", staged.display());
            }
            Err(e @ RetargetError::HttpStatus { .. }) => return Err(e),
            Err(e) if self.strict => return Err(e),
            Err(e) => {
                log::warn!("Error occurred while downloading the file: {}", e);
                log::warn!(
                    "Continuing with whatever is staged at {}; it may belong to another revision",
                    staged.display()
                );
            }
        }

        Ok(staged)
    }
}

impl Source {
    /// Path of the manifest this source reads once acquired.
    pub fn manifest_path(&self) -> PathBuf {
        match self {
            Source::Local { root } => Path::new(root).join(MANIFEST_FILE),
            Source::Remote(remote) => remote.staged_manifest(),
        }
    }

    /// How path dependencies of this source's manifest are rewritten.
    pub fn rewrite_target(&self) -> RewriteTarget {
        match self {
            Source::Local { root } => RewriteTarget::Local { base: root.clone() },
            Source::Remote(remote) => RewriteTarget::Git {
                url: remote.git_url(),
                rev: remote.commit.clone(),
            },
        }
    }

    /// Obtains and parses the source manifest.
    pub fn acquire(&self) -> Result<DocumentMut> {
        let path = match self {
            Source::Local { .. } => self.manifest_path(),
            Source::Remote(remote) => remote.fetch()?,
        };
        read_manifest(&path)
    }
}

/// Reads and parses a TOML document, keeping its formatting.
pub fn read_manifest(path: &Path) -> Result<DocumentMut> {
    let content = fs::read_to_string(path).map_err(|source| RetargetError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    content
        .parse::<DocumentMut>()
        .map_err(|source| RetargetError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

fn download(url: &str) -> Result<Vec<u8>> {
    let agent = ureq::Agent::new_with_defaults();
    let fail = |reason: String| RetargetError::Download {
        url: url.to_owned(),
        reason,
    };

    let resp = match agent.get(url).call() {
        Ok(r) => r,
        Err(ureq::Error::StatusCode(code)) => {
            return Err(RetargetError::HttpStatus {
                url: url.to_owned(),
                code,
            });
        }
        Err(e) => return Err(fail(e.to_string())),
    };

    let mut reader = resp.into_body().into_reader();
    let mut body = Vec::new();
    reader
        .read_to_end(&mut body)
        .map_err(|e| fail(e.to_string()))?;
    Ok(body)
}

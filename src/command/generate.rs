use crate::error::Result;
use crate::ops::{self, DEFAULT_FRAGMENT, DENIED_DEPENDENCIES, Summary};
use crate::source::{
    DEFAULT_RAW_BASE_URL, DEFAULT_REPOSITORY, DEFAULT_STAGING_DIR, RemoteSource, Source,
    read_manifest,
};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
#[clap(verbatim_doc_comment)]
pub struct GenerateArgs {
    /// Revision of the remote repository to pin path dependencies to
    #[arg(long, short = 'c', value_name = "REV", required_unless_present = "agave_path")]
    pub commit: Option<String>,

    /// Local checkout to read the manifest from (takes precedence over --commit)
    ///
    /// Path dependencies are rewritten to `<DIR>/<original path>`.
    #[arg(long, short = 'p', value_name = "DIR")]
    pub agave_path: Option<String>,

    /// Where to write the generated manifest
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: PathBuf,

    /// Manifest fragment merged into the output
    #[arg(long, value_name = "FILE", default_value = DEFAULT_FRAGMENT)]
    pub fragment: PathBuf,

    /// Directory the remote manifest is downloaded into
    #[arg(long, value_name = "DIR", default_value = DEFAULT_STAGING_DIR)]
    pub staging_dir: PathBuf,

    /// Remote repository as `owner/name`
    #[arg(long, value_name = "REPO", default_value = DEFAULT_REPOSITORY)]
    pub repository: String,

    /// Host serving raw repository files
    #[arg(long, value_name = "URL", default_value = DEFAULT_RAW_BASE_URL)]
    pub raw_base_url: String,

    /// Additional dependency to strip from [dependencies] (repeatable)
    ///
    /// Always stripped: pickledb, winreg
    #[arg(long, value_name = "NAME", verbatim_doc_comment)]
    pub remove_dependency: Vec<String>,

    /// Abort when the download fails instead of using the staged manifest
    #[arg(long)]
    pub strict: bool,

    /// Print the generated manifest instead of writing it
    #[arg(long, short = 'n')]
    pub dry_run: bool,
}

impl GenerateArgs {
    /// Resolves which manifest to read; a local checkout wins over a commit.
    pub fn source(&self) -> Source {
        match (&self.agave_path, &self.commit) {
            (Some(root), _) => Source::Local { root: root.clone() },
            (None, commit) => Source::Remote(RemoteSource {
                commit: commit.clone().unwrap_or_default(),
                repository: self.repository.clone(),
                raw_base_url: self.raw_base_url.clone(),
                staging_dir: self.staging_dir.clone(),
                strict: self.strict,
            }),
        }
    }

    /// Fixed deny-list followed by any names given on the command line.
    pub fn removed_dependencies(&self) -> Vec<String> {
        let mut names: Vec<String> = DENIED_DEPENDENCIES.iter().map(|s| s.to_string()).collect();
        for name in &self.remove_dependency {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
        names
    }
}

pub fn execute(args: GenerateArgs) -> Result<()> {
    let source = args.source();
    if args.agave_path.is_some() && args.commit.is_some() {
        log::warn!("Both --agave-path and --commit given; using the local checkout");
    }

    log::debug!("Source manifest: {}", source.manifest_path().display());
    let mut doc = source.acquire()?;
    let fragment = read_manifest(&args.fragment)?;

    let summary = ops::retarget(
        &mut doc,
        &source.rewrite_target(),
        &fragment,
        &args.removed_dependencies(),
    )?;

    ops::write_manifest(&doc, &args.output, args.dry_run)?;

    print_summary(&summary, &source, &args);
    Ok(())
}

fn print_summary(summary: &Summary, source: &Source, args: &GenerateArgs) {
    // Keep stdout clean for the rendered manifest.
    if args.dry_run {
        log::info!(
            "{} path dependencies rewritten, {} removed",
            summary.rewritten,
            summary.removed.len()
        );
        return;
    }

    let origin = match source {
        Source::Local { root } => format!("local checkout {}", root),
        Source::Remote(remote) => format!("{}@{}", remote.repository, remote.commit),
    };

    println!(
        "{} {} path dependencies → {}",
        "Rewrote".green().bold(),
        summary.rewritten.to_string().cyan(),
        origin
    );
    if !summary.flatten.moved.is_empty() {
        println!(
            "{} workspace keys: {}",
            "Flattened".green().bold(),
            summary.flatten.moved.join(", ")
        );
    }
    if !summary.removed.is_empty() {
        println!(
            "{} {}",
            "Removed".yellow().bold(),
            summary.removed.join(", ")
        );
    }
    if !summary.merge.skipped.is_empty() {
        println!(
            "{} fragment sections: {}",
            "Skipped".yellow().bold(),
            summary.merge.skipped.join(", ")
        );
    }
    println!(
        "{} {}",
        "✓ Wrote".green().bold(),
        args.output.display()
    );
}

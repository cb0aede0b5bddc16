use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{Error, Result};

/// Directories scanned when no path is given, relative to the working
/// directory.
pub const DEFAULT_DIRECTORIES: &[&str] = &["public/texts", "docs/texts"];

pub const DEFAULT_SUFFIX: &str = "json";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target {
    File(PathBuf),
    /// All files directly inside the directory that carry the suffix.
    Directory(PathBuf),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    targets: Vec<Target>,
    suffix: String,
}

/// `json` and `.json` name the same extension.
fn bare_suffix(suffix: &str) -> &str {
    suffix.strip_prefix('.').unwrap_or(suffix)
}

fn has_suffix(path: &Path, suffix: &str) -> bool {
    path.extension() == Some(OsStr::new(bare_suffix(suffix)))
}

impl Selection {
    pub fn resolve(path: Option<&Path>, suffix: &str) -> Result<Self> {
        let suffix = bare_suffix(suffix).to_owned();
        let targets = match path {
            Some(path) if path.is_dir() => vec![Target::Directory(path.to_owned())],
            Some(path) if path.is_file() && has_suffix(path, &suffix) => {
                vec![Target::File(path.to_owned())]
            }
            Some(path) => {
                return Err(Error::InvalidSelection {
                    path: path.to_owned(),
                    suffix,
                })
            }
            None => Self::defaults_in(Path::new(".")),
        };
        Ok(Self { targets, suffix })
    }

    /// The default directories below `root` that exist.
    pub fn defaults_in(root: &Path) -> Vec<Target> {
        DEFAULT_DIRECTORIES
            .iter()
            .map(|dir| root.join(dir))
            .filter(|dir| {
                let exists = dir.is_dir();
                if !exists {
                    debug!("skipping missing default directory {}", dir.display());
                }
                exists
            })
            .map(Target::Directory)
            .collect()
    }

    pub fn from_targets(targets: Vec<Target>, suffix: &str) -> Self {
        Self {
            targets,
            suffix: bare_suffix(suffix).to_owned(),
        }
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }
}

/// Files directly inside `dir` with the given extension, sorted by path.
pub async fn list_directory(dir: &Path, suffix: &str) -> Result<Vec<PathBuf>> {
    let err = |source: std::io::Error| Error::ListDirectory {
        path: dir.to_owned(),
        source,
    };
    let mut entries = tokio::fs::read_dir(dir).await.map_err(err)?;
    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(err)? {
        let path = entry.path();
        if !has_suffix(&path, suffix) {
            continue;
        }
        // follows symlinks, unlike `DirEntry::file_type`
        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => files.push(path),
            Ok(_) => {}
            Err(e) => debug!("skipping {}: {e}", path.display()),
        }
    }
    files.sort();
    Ok(files)
}

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use futures_util::{stream, StreamExt};
use tracing::{debug, info, trace_span, warn, Instrument};

use crate::engine::{transform_with, ChangeRecord};
use crate::report::Report;
use crate::select::{list_directory, Selection, Target};
use crate::table::LookalikeTable;
use crate::{Error, Result};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Apply,
    /// Scan and report, never write back.
    DryRun,
}

impl Mode {
    pub fn is_dry_run(self) -> bool {
        matches!(self, Mode::DryRun)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileReport {
    pub path: PathBuf,
    pub changes: Vec<ChangeRecord>,
    pub written: bool,
}

impl FileReport {
    pub fn count(&self) -> usize {
        self.changes.len()
    }
}

#[derive(Debug)]
pub enum FileOutcome {
    Processed(FileReport),
    Failed { path: PathBuf, error: Error },
}

impl FileOutcome {
    pub fn path(&self) -> &Path {
        match self {
            FileOutcome::Processed(report) => &report.path,
            FileOutcome::Failed { path, .. } => path,
        }
    }

    /// Failures count as zero changes.
    pub fn count(&self) -> usize {
        match self {
            FileOutcome::Processed(report) => report.count(),
            FileOutcome::Failed { .. } => 0,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub files: usize,
    pub failed: usize,
    pub total_changes: usize,
    pub mode: Mode,
}

impl Summary {
    fn record(&mut self, outcome: &FileOutcome) {
        self.files += 1;
        self.total_changes += outcome.count();
        if let FileOutcome::Failed { .. } = outcome {
            self.failed += 1;
        }
    }
}

/// Reads `path`, fixes it and writes it back when anything changed and
/// `mode` allows it.
pub async fn process_file(table: &LookalikeTable, path: &Path, mode: Mode) -> Result<FileReport> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| Error::Read {
            path: path.to_owned(),
            source,
        })?;

    let result = transform_with(table, &content);
    debug!(changes = result.count(), "scanned");

    let written = !result.is_unchanged() && !mode.is_dry_run();
    if written {
        write_back(path, &result.output)
            .await
            .map_err(|source| Error::Write {
                path: path.to_owned(),
                source,
            })?;
        info!("saved {} change(s)", result.count());
    }

    Ok(FileReport {
        path: path.to_owned(),
        changes: result.changes,
        written,
    })
}

/// Sibling of `path` that receives the new content before it replaces the
/// original, e.g. `texts/.fr.json.tmp` for `texts/fr.json`.
pub(crate) fn temp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or_default());
    name.push(".tmp");
    path.with_file_name(name)
}

/// Replaces the file behind `path` with `content` by writing a temporary
/// sibling and renaming it over the original. Symlinks are resolved first
/// and the original permissions are kept.
async fn write_back(path: &Path, content: &str) -> std::io::Result<()> {
    let target = tokio::fs::canonicalize(path).await?;
    let permissions = tokio::fs::metadata(&target).await?.permissions();
    let tmp = temp_path(&target);

    let res: std::io::Result<()> = async {
        tokio::fs::write(&tmp, content).await?;
        tokio::fs::set_permissions(&tmp, permissions).await?;
        tokio::fs::rename(&tmp, &target).await
    }
    .await;
    if res.is_err() {
        // leftover from a partial write; a missing file is fine
        let _ = tokio::fs::remove_file(&tmp).await;
    }
    res
}

pub struct Processor<'a> {
    table: &'a LookalikeTable,
    mode: Mode,
    jobs: usize,
}

impl<'a> Processor<'a> {
    pub const DEFAULT_JOBS: usize = 4;

    pub fn new(table: &'a LookalikeTable) -> Self {
        Self {
            table,
            mode: Mode::Apply,
            jobs: Self::DEFAULT_JOBS,
        }
    }

    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Maximum number of files in flight at once. Zero is treated as one.
    pub fn jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    async fn outcome(&self, path: PathBuf) -> FileOutcome {
        let span = trace_span!("file", path = %path.display());
        let res = process_file(self.table, &path, self.mode)
            .instrument(span)
            .await;
        match res {
            Ok(report) => FileOutcome::Processed(report),
            Err(error) => {
                warn!("{error}");
                FileOutcome::Failed { path, error }
            }
        }
    }

    /// Processes every target of `selection` in order, feeding `report` as
    /// outcomes arrive. A failing file never stops the batch.
    pub async fn run(&self, selection: &Selection, report: &mut dyn Report) -> Summary {
        let mut summary = Summary {
            mode: self.mode,
            ..Default::default()
        };
        report.start(self.mode);

        for target in selection.targets() {
            let files = match target {
                Target::File(path) => vec![path.clone()],
                Target::Directory(dir) => {
                    report.directory(dir);
                    match list_directory(dir, selection.suffix()).await {
                        Ok(files) => files,
                        Err(error) => {
                            warn!("{error}");
                            let outcome = FileOutcome::Failed {
                                path: dir.clone(),
                                error,
                            };
                            summary.record(&outcome);
                            report.file(&outcome);
                            continue;
                        }
                    }
                }
            };

            let mut outcomes = stream::iter(files)
                .map(|path| self.outcome(path))
                .buffered(self.jobs);
            while let Some(outcome) = outcomes.next().await {
                summary.record(&outcome);
                report.file(&outcome);
            }
        }

        report.finish(&summary);
        summary
    }
}

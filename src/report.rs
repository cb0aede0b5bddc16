use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::error;

use crate::engine::ChangeRecord;
use crate::process::{FileOutcome, Mode, Summary};

/// Consumer of processing events, called in processing order.
pub trait Report {
    fn start(&mut self, mode: Mode);
    fn directory(&mut self, dir: &Path);
    fn file(&mut self, outcome: &FileOutcome);
    fn finish(&mut self, summary: &Summary);
}

const RULE: &str = "================================";

/// Line oriented report for terminals.
pub struct HumanReport<W> {
    out: W,
}

impl<W: Write> HumanReport<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn try_start(&mut self, mode: Mode) -> std::io::Result<()> {
        writeln!(self.out, "Look-alike Normalizer")?;
        writeln!(self.out, "{RULE}")?;
        if mode.is_dry_run() {
            writeln!(self.out, "DRY RUN MODE - No changes will be made")?;
            writeln!(self.out)?;
        }
        Ok(())
    }

    fn try_file(&mut self, outcome: &FileOutcome) -> std::io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "Processing: {}", outcome.path().display())?;
        match outcome {
            FileOutcome::Failed { error, .. } => {
                writeln!(self.out, "  ✗ Error processing file: {error}")?;
            }
            FileOutcome::Processed(report) if report.changes.is_empty() => {
                writeln!(self.out, "  ✓ No issues found")?;
            }
            FileOutcome::Processed(report) => {
                writeln!(self.out, "  ✓ Found {} issue(s)", report.count())?;
                for (i, change) in report.changes.iter().enumerate() {
                    writeln!(self.out, "    {}. {} → {}", i + 1, change.original, change.fixed)?;
                }
                if report.written {
                    writeln!(self.out, "  ✓ Fixed and saved")?;
                } else {
                    writeln!(self.out, "  ℹ Dry run - no changes made")?;
                }
            }
        }
        Ok(())
    }

    fn try_finish(&mut self, summary: &Summary) -> std::io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{RULE}")?;
        writeln!(self.out, "✨ Complete! Total changes: {}", summary.total_changes)?;
        if summary.failed > 0 {
            writeln!(self.out, "{} file(s) could not be processed", summary.failed)?;
        }
        if summary.mode.is_dry_run() && summary.total_changes > 0 {
            writeln!(self.out)?;
            writeln!(self.out, "Run without --dry-run to apply the changes")?;
        }
        self.out.flush()
    }
}

// Write errors are logged, never propagated.
impl<W: Write> Report for HumanReport<W> {
    fn start(&mut self, mode: Mode) {
        if let Err(e) = self.try_start(mode) {
            error!("failed to write report: {e}");
        }
    }

    fn directory(&mut self, dir: &Path) {
        if let Err(e) = writeln!(self.out, "\nScanning directory: {}", dir.display()) {
            error!("failed to write report: {e}");
        }
    }

    fn file(&mut self, outcome: &FileOutcome) {
        if let Err(e) = self.try_file(outcome) {
            error!("failed to write report: {e}");
        }
    }

    fn finish(&mut self, summary: &Summary) {
        if let Err(e) = self.try_finish(summary) {
            error!("failed to write report: {e}");
        }
    }
}

#[derive(Serialize, Debug)]
pub struct JsonFile {
    pub path: PathBuf,
    pub changes: Vec<ChangeRecord>,
    pub written: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Serialize, Debug, Default)]
pub struct JsonDocument {
    pub dry_run: bool,
    pub files: Vec<JsonFile>,
    pub total_changes: usize,
    pub failed: usize,
}

/// Collects every outcome and writes a single JSON document on finish.
pub struct JsonReport<W> {
    out: W,
    doc: JsonDocument,
}

impl<W: Write> JsonReport<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            doc: JsonDocument::default(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Report for JsonReport<W> {
    fn start(&mut self, mode: Mode) {
        self.doc.dry_run = mode.is_dry_run();
    }

    fn directory(&mut self, _: &Path) {}

    fn file(&mut self, outcome: &FileOutcome) {
        let file = match outcome {
            FileOutcome::Processed(report) => JsonFile {
                path: report.path.clone(),
                changes: report.changes.clone(),
                written: report.written,
                error: None,
            },
            FileOutcome::Failed { path, error } => JsonFile {
                path: path.clone(),
                changes: Vec::new(),
                written: false,
                error: Some(error.to_string()),
            },
        };
        self.doc.files.push(file);
    }

    fn finish(&mut self, summary: &Summary) {
        self.doc.total_changes = summary.total_changes;
        self.doc.failed = summary.failed;
        let res = serde_json::to_writer_pretty(&mut self.out, &self.doc)
            .map_err(std::io::Error::from)
            .and_then(|()| writeln!(self.out))
            .and_then(|()| self.out.flush());
        if let Err(e) = res {
            error!("failed to write report: {e}");
        }
    }
}

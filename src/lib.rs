//! Normalization of look-alike characters inside parenthesized spans.
//!
//! Text resources sometimes mix scripts by accident, e.g. `(6а)` written
//! with a Cyrillic `а`. [`transform`] rewrites such spans with the built-in
//! Cyrillic to Latin [`LookalikeTable`] and records every span it changed:
//!
//! ```
//! let res = lookalike::transform("Item (6\u{0430})");
//! assert_eq!(res.output, "Item (6a)");
//! assert_eq!(res.count(), 1);
//! ```
//!
//! [`process`] and [`select`] apply the transformation to files on disk and
//! [`report`] renders the results.

use std::path::PathBuf;

pub mod engine;
pub mod process;
pub mod report;
pub mod select;
pub mod table;

pub use engine::{spans, transform, transform_with, ChangeRecord, Span, TransformResult};
pub use process::{process_file, FileOutcome, FileReport, Mode, Processor, Summary};
pub use select::{Selection, Target};
pub use table::{LookalikeTable, TableError};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{}: expected a directory or a `.{suffix}` file", path.display())]
    InvalidSelection { path: PathBuf, suffix: String },
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to list {}: {source}", path.display())]
    ListDirectory {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid lookalike table: {0}")]
    Table(#[from] TableError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests;

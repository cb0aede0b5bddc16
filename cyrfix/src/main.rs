use std::io;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use lookalike::report::{HumanReport, JsonReport, Report};
use lookalike::select::DEFAULT_SUFFIX;
use lookalike::{LookalikeTable, Mode, Processor, Selection};
use tracing::debug;
use tracing::metadata::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(ValueEnum, Clone, Copy, Debug, Default)]
enum Format {
    #[default]
    Human,
    Json,
}

/// Fix Cyrillic look-alike characters in parentheses by normalizing them to
/// their Latin equivalents, e.g. `(6а)` becomes `(6a)`.
///
/// Without PATH, every file in `public/texts` and `docs/texts` is processed.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// File or directory to process
    path: Option<PathBuf>,

    /// Show what would be changed without making changes
    #[clap(short, long)]
    dry_run: bool,

    /// Extension of the files picked up from directories, with or without
    /// the leading dot
    #[clap(long, default_value = DEFAULT_SUFFIX)]
    suffix: String,

    /// JSON object mapping look-alike characters to replacements, used
    /// instead of the built-in Cyrillic table
    #[clap(long)]
    table: Option<PathBuf>,

    /// Number of files processed concurrently
    #[clap(short, long, default_value_t = Processor::DEFAULT_JOBS)]
    jobs: usize,

    #[clap(long, value_enum, default_value_t)]
    format: Format,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .init();

    let args = Args::parse();
    debug!(?args);

    let custom;
    let table = match &args.table {
        Some(path) => {
            custom = LookalikeTable::load(path)?;
            &custom
        }
        None => LookalikeTable::cyrillic(),
    };

    let selection = Selection::resolve(args.path.as_deref(), &args.suffix)?;
    let mode = if args.dry_run { Mode::DryRun } else { Mode::Apply };
    let processor = Processor::new(table).mode(mode).jobs(args.jobs);

    let stdout = io::stdout().lock();
    let mut report: Box<dyn Report> = match args.format {
        Format::Human => Box::new(HumanReport::new(stdout)),
        Format::Json => Box::new(JsonReport::new(stdout)),
    };
    let summary = processor.run(&selection, &mut *report).await;
    debug!(?summary);

    Ok(())
}

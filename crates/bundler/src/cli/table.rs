//! The `bundler table` command: print the rendered table for a selection.

use bundler_core::dataset::PATH_COLUMN;
use bundler_core::table::table_records;
use bundler_core::{Config, FeedFormat, FeedWriter, Row, Session, TableRecord, ThumbnailEncoder};
use clap::Args;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use super::select::SelectionArgs;

#[derive(Args, Debug)]
pub struct TableArgs {
    /// Dataset CSV
    pub input: PathBuf,

    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Attach image payloads from the `path` column
    #[arg(long)]
    pub images: bool,

    /// Shuffle the rows before printing
    #[arg(long)]
    pub shuffle: bool,

    /// Output format (json or jsonl)
    #[arg(short, long, default_value = "json")]
    pub format: FeedFormat,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub async fn execute(args: TableArgs, config: &Config) -> anyhow::Result<()> {
    let session = Session::open(&args.input)?;
    let dataset = session.dataset();

    // Without --select the table shows the first rows, as before any lasso.
    let preview: Vec<usize> = (0..config.table.preview_rows.min(dataset.len())).collect();
    let state = args.selection.apply(&session, preview)?;

    let rows = if args.shuffle || config.table.shuffle {
        state.shuffled_subset(&mut rand::thread_rng())
    } else {
        state.effective_subset()
    };

    let records = if args.images && dataset.has_images() {
        records_with_images(&session, &rows, ThumbnailEncoder::new(config.thumbnail.clone()))
    } else {
        if args.images {
            tracing::warn!("Dataset has no '{PATH_COLUMN}' column; --images ignored");
        }
        table_records(dataset, session.mapping(), &rows)
    };

    let writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout().lock()),
    };
    let written = FeedWriter::new(writer, args.format).write_records(&records)?;

    tracing::info!(
        "{written} of {} selected row(s) shown",
        state.highlighted().len()
    );
    Ok(())
}

fn records_with_images(
    session: &Session,
    rows: &[&Row],
    encoder: ThumbnailEncoder,
) -> Vec<TableRecord> {
    let dataset = session.dataset();
    let progress = create_progress_bar(rows.len() as u64);
    let mut placeholders = 0usize;

    let records = rows
        .iter()
        .map(|row| {
            let source = dataset.value(row, PATH_COLUMN).unwrap_or_default();
            let payload = encoder.payload_for(source);
            if payload.is_placeholder() {
                placeholders += 1;
            }
            progress.inc(1);
            TableRecord::from_row(dataset, session.mapping(), row, Some(&payload))
        })
        .collect();
    progress.finish_and_clear();

    if placeholders > 0 {
        tracing::warn!("{placeholders} image(s) could not be read and show a placeholder");
    }
    records
}

fn create_progress_bar(total: u64) -> indicatif::ProgressBar {
    use indicatif::{ProgressBar, ProgressStyle};

    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} encoding images")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-"),
    );
    pb
}

//! The `bundler export` command: push a selection to Label Studio.

use bundler_core::{Config, ExportOptions, Exporter, LabelStudioClient, Session};
use clap::Args;
use std::path::PathBuf;
use std::time::Duration;

use super::select::SelectionArgs;

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Dataset CSV
    pub input: PathBuf,

    /// Title of the created views
    #[arg(short, long)]
    pub name: String,

    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Per-call timeout in milliseconds (overrides export.timeout_ms)
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Retries for transient failures (overrides export.retry_attempts)
    #[arg(long)]
    pub retry: Option<u32>,
}

/// Run the export and print the per-chunk report as JSON.
///
/// Chunk failures are reported, not fatal; only configuration and dataset
/// problems make the command fail.
pub async fn execute(args: ExportArgs, config: &Config) -> anyhow::Result<()> {
    if args.name.trim().is_empty() {
        anyhow::bail!("View name must not be empty");
    }

    let credentials = config.credentials()?;
    let session = Session::open(&args.input)?;

    // Without --select every row is exported.
    let all: Vec<usize> = (0..session.dataset().len()).collect();
    let state = args.selection.apply(&session, all)?;
    let rows = state.effective_subset();

    let mut options = ExportOptions::from(&config.export);
    options.user_id = config.studio.user_id;
    if let Some(timeout_ms) = args.timeout_ms {
        options.timeout_ms = timeout_ms.max(1);
    }
    if let Some(retry) = args.retry {
        options.retry_attempts = retry;
    }

    let client = LabelStudioClient::new(&credentials, Duration::from_millis(options.timeout_ms))?;
    tracing::info!("Exporting to {}", client.views_url());
    let exporter = Exporter::new(Box::new(client), options);

    let report = exporter.export(&rows, &args.name).await;
    println!("{}", serde_json::to_string_pretty(&report)?);

    if report.is_empty() {
        eprintln!("Nothing to export: the selection is empty.");
    } else {
        eprintln!(
            "{} of {} view(s) created, {} id(s) exported",
            report.succeeded(),
            report.len(),
            report.exported_ids()
        );
        for failure in report.failures() {
            eprintln!(
                "  failed: '{}' (project {}, {} ids)",
                failure.title, failure.project, failure.id_count
            );
        }
    }
    Ok(())
}

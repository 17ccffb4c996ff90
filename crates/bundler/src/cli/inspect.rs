//! The `bundler inspect` command.

use bundler_core::Session;
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Dataset CSV
    pub input: PathBuf,
}

/// Print the session summary as pretty JSON.
pub async fn execute(args: InspectArgs) -> anyhow::Result<()> {
    let session = Session::open(&args.input)?;
    let summary = session.summary();
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

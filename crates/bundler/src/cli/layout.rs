//! The `bundler layout` command.

use bundler_core::layout::DEFAULT_FEATURE_COLUMN;
use bundler_core::{apply_layout, PcaReducer};
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct LayoutArgs {
    /// CSV with a feature-vector column
    pub input: PathBuf,

    /// Where to write the dataset with x/y columns
    #[arg(short, long)]
    pub output: PathBuf,

    /// Column holding each row's feature vector as a JSON array
    #[arg(long, default_value = DEFAULT_FEATURE_COLUMN)]
    pub column: String,
}

pub async fn execute(args: LayoutArgs) -> anyhow::Result<()> {
    if args.input == args.output {
        anyhow::bail!("Refusing to overwrite the input file; choose a different --output");
    }
    let summary = apply_layout(&args.input, &args.output, &args.column, &PcaReducer::new())?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

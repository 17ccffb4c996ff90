//! Bundler Core - label mapping, lasso selection and batched view export.
//!
//! Bundler takes a tabular dataset of labelling tasks (one row per task, with
//! 2D layout coordinates and an optional label column) and lets an operator
//! select subsets and push them to Label Studio as named views.
//!
//! # Architecture
//!
//! ```text
//! CSV → Dataset → ColorMapping → SelectionState → effective subset
//!                                                   ├─ table feed (colors, thumbnails)
//!                                                   └─ Exporter → ViewApi (one call per ≤100 ids)
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use bundler_core::{Config, Exporter, ExportOptions, LabelStudioClient, Session};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     let session = Session::open("tasks.csv".as_ref())?;
//!
//!     let mut selection = session.selection();
//!     let subset = selection.on_selection_changed(vec![0, 2, 5]);
//!
//!     let creds = config.credentials()?;
//!     let client = LabelStudioClient::new(&creds, std::time::Duration::from_secs(5))?;
//!     let exporter = Exporter::new(Box::new(client), ExportOptions::from(&config.export));
//!     let report = exporter.export(&subset, "Batch1").await;
//!     println!("{} view(s) created", report.succeeded());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod dataset;
pub mod error;
pub mod export;
pub mod layout;
pub mod mapping;
pub mod output;
pub mod selection;
pub mod session;
pub mod table;
pub mod thumbnail;

pub use config::Config;
pub use dataset::{Dataset, Label, Row};
pub use error::{BundlerError, ConfigError, DatasetError, ExportError, LayoutError, Result};
pub use export::{ExportOptions, ExportReport, Exporter, LabelStudioClient, ViewApi};
pub use layout::{apply_layout, LayoutReducer, PcaReducer};
pub use mapping::{compute_mapping, ColorMapping};
pub use output::{FeedFormat, FeedWriter};
pub use selection::{FilterValue, SelectionState};
pub use session::Session;
pub use table::TableRecord;
pub use thumbnail::{ImagePayload, ThumbnailEncoder};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

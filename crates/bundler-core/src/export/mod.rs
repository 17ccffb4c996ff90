//! Export of selected rows to Label Studio as named views.
//!
//! Rows are grouped by project, paged at [`MAX_IDS_PER_VIEW`] ids per call
//! (the data manager's per-request limit), and pushed one call at a time.

pub(crate) mod api;
pub(crate) mod batch;
pub(crate) mod client;
pub(crate) mod exporter;
pub(crate) mod report;
pub(crate) mod retry;

pub use api::{CreateViewRequest, ViewApi};
pub use batch::{ExportBatch, ProjectIds, ViewChunk, MAX_IDS_PER_VIEW};
pub use client::LabelStudioClient;
pub use exporter::{ExportOptions, Exporter};
pub use report::{ChunkOutcome, ChunkReport, ExportReport};

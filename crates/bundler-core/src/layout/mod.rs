//! 2D layout from per-row feature vectors.
//!
//! The scatter plot needs `x`/`y` for every row. Datasets that carry a
//! feature vector instead (a JSON array in one column) can be laid out with a
//! [`LayoutReducer`] and written back as a regular dataset CSV.

mod pca;

pub use pca::PcaReducer;

use ndarray::Array2;
use serde::Serialize;
use std::path::Path;

use crate::dataset::{X_COLUMN, Y_COLUMN};
use crate::error::LayoutError;

/// Default name of the feature-vector column.
pub const DEFAULT_FEATURE_COLUMN: &str = "embedding";

/// Computes a 2D position for each of N feature vectors.
pub trait LayoutReducer {
    /// Reducer name for logging.
    fn name(&self) -> &str;

    /// One `[x, y]` per input row, in input order.
    fn reduce(&self, features: &Array2<f64>) -> Result<Vec<[f64; 2]>, LayoutError>;
}

/// What a layout run produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutSummary {
    pub rows: usize,
    pub dimensions: usize,
    pub reducer: String,
}

/// Read `input`, lay out the vectors in `column`, and write `output`.
///
/// The output keeps every other column in order, drops the feature column
/// and any existing `x`/`y`, and appends freshly computed `x`/`y`.
pub fn apply_layout(
    input: &Path,
    output: &Path,
    column: &str,
    reducer: &dyn LayoutReducer,
) -> Result<LayoutSummary, LayoutError> {
    let csv_error = |path: &Path| {
        let path = path.to_path_buf();
        move |source: csv::Error| LayoutError::Csv { path, source }
    };

    let mut reader = csv::Reader::from_path(input).map_err(csv_error(input))?;
    let headers = reader.headers().map_err(csv_error(input))?.clone();
    let feature_col = headers
        .iter()
        .position(|h| h.trim() == column)
        .ok_or_else(|| LayoutError::MissingColumn {
            path: input.to_path_buf(),
            column: column.to_string(),
        })?;

    let records = reader
        .records()
        .collect::<Result<Vec<csv::StringRecord>, _>>()
        .map_err(csv_error(input))?;

    let features = read_features(&records, feature_col)?;
    let (rows, dimensions) = features.dim();
    tracing::info!(
        "Computing {} layout for {rows} row(s) of {dimensions} dimension(s)",
        reducer.name()
    );
    let coords = reducer.reduce(&features)?;
    if coords.len() != rows {
        return Err(LayoutError::Degenerate(format!(
            "reducer returned {} positions for {rows} rows",
            coords.len()
        )));
    }

    let kept: Vec<usize> = headers
        .iter()
        .enumerate()
        .filter(|(i, h)| *i != feature_col && !matches!(h.trim(), X_COLUMN | Y_COLUMN))
        .map(|(i, _)| i)
        .collect();

    let mut writer = csv::Writer::from_path(output).map_err(csv_error(output))?;
    let mut header_out: Vec<&str> = kept.iter().map(|&i| &headers[i]).collect();
    header_out.extend([X_COLUMN, Y_COLUMN]);
    writer
        .write_record(&header_out)
        .map_err(csv_error(output))?;

    for (record, [x, y]) in records.iter().zip(&coords) {
        let mut out: Vec<String> = kept
            .iter()
            .map(|&i| record.get(i).unwrap_or("").to_string())
            .collect();
        out.push(x.to_string());
        out.push(y.to_string());
        writer.write_record(&out).map_err(csv_error(output))?;
    }
    writer
        .flush()
        .map_err(|e| csv_error(output)(csv::Error::from(e)))?;

    tracing::info!("Wrote layout for {rows} row(s) to {:?}", output);
    Ok(LayoutSummary {
        rows,
        dimensions,
        reducer: reducer.name().to_string(),
    })
}

/// Parse the feature column into an `n x d` matrix.
fn read_features(records: &[csv::StringRecord], column: usize) -> Result<Array2<f64>, LayoutError> {
    let mut dimensions = None;
    let mut flat = Vec::new();

    for (row, record) in records.iter().enumerate() {
        let cell = record.get(column).unwrap_or("");
        let vector: Vec<f64> =
            serde_json::from_str(cell).map_err(|e| LayoutError::InvalidVector {
                row,
                message: e.to_string(),
            })?;
        if vector.iter().any(|v| !v.is_finite()) {
            return Err(LayoutError::InvalidVector {
                row,
                message: "non-finite component".to_string(),
            });
        }

        let expected = *dimensions.get_or_insert(vector.len());
        if vector.len() != expected {
            return Err(LayoutError::DimensionMismatch {
                row,
                expected,
                found: vector.len(),
            });
        }
        flat.extend(vector);
    }

    Array2::from_shape_vec((records.len(), dimensions.unwrap_or(0)), flat)
        .map_err(|e| LayoutError::Degenerate(e.to_string()))
}

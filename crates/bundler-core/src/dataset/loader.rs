//! CSV loading for datasets.

use std::io::Read;
use std::path::Path;

use super::infer::{infer_column_type, is_missing, ColorColumnType};
use super::{
    Dataset, Label, Row, COLOR_COLUMN, ID_COLUMN, PROJECT_COLUMN, X_COLUMN, Y_COLUMN,
};
use crate::error::{DatasetError, DatasetResult};

impl Dataset {
    /// Load a dataset from a CSV file.
    pub fn from_path(path: &Path) -> DatasetResult<Self> {
        let reader = csv::ReaderBuilder::new()
            .from_path(path)
            .map_err(|source| DatasetError::Csv {
                path: path.to_path_buf(),
                source,
            })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let dataset = Self::read(reader, path, name)?;
        tracing::debug!(
            "Loaded {} rows ({} columns) from {:?}",
            dataset.len(),
            dataset.columns.len(),
            path
        );
        Ok(dataset)
    }

    /// Load a dataset from any CSV byte source.
    pub fn from_reader<R: Read>(reader: R, name: &str) -> DatasetResult<Self> {
        let reader = csv::ReaderBuilder::new().from_reader(reader);
        Self::read(reader, Path::new(name), name.to_string())
    }

    fn read<R: Read>(mut reader: csv::Reader<R>, source: &Path, name: String) -> DatasetResult<Self> {
        let csv_error = |source_err: csv::Error| DatasetError::Csv {
            path: source.to_path_buf(),
            source: source_err,
        };

        let columns: Vec<String> = reader
            .headers()
            .map_err(csv_error)?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let find = |column: &str| columns.iter().position(|c| c == column);
        let require = |column: &str| {
            find(column).ok_or_else(|| DatasetError::MissingColumn {
                path: source.to_path_buf(),
                column: column.to_string(),
            })
        };

        let id_col = require(ID_COLUMN)?;
        let project_col = require(PROJECT_COLUMN)?;
        let x_col = require(X_COLUMN)?;
        let y_col = require(Y_COLUMN)?;
        let color_col = find(COLOR_COLUMN);

        let passthrough_idx: Vec<usize> = (0..columns.len())
            .filter(|i| ![id_col, project_col, x_col, y_col].contains(i) && Some(*i) != color_col)
            .collect();
        let passthrough = passthrough_idx.iter().map(|&i| columns[i].clone()).collect();

        let records = reader
            .records()
            .collect::<Result<Vec<csv::StringRecord>, _>>()
            .map_err(csv_error)?;

        let color_type = color_col
            .map(|c| infer_column_type(records.iter().map(|r| r.get(c).unwrap_or(""))));

        let mut rows = Vec::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            let cell = |col: usize| record.get(col).unwrap_or("");

            let color = match (color_col, color_type) {
                (Some(c), Some(kind)) => parse_label(cell(c), kind, index)?,
                _ => None,
            };

            rows.push(Row {
                index,
                id: parse_int(cell(id_col), ID_COLUMN, index)?,
                project: parse_int(cell(project_col), PROJECT_COLUMN, index)?,
                x: parse_float(cell(x_col), X_COLUMN, index)?,
                y: parse_float(cell(y_col), Y_COLUMN, index)?,
                color,
                extra: passthrough_idx.iter().map(|&i| cell(i).to_string()).collect(),
            });
        }

        Ok(Self {
            name,
            columns,
            passthrough,
            color_type,
            rows,
        })
    }
}

fn invalid(row: usize, column: &str, value: &str) -> DatasetError {
    DatasetError::InvalidValue {
        row,
        column: column.to_string(),
        value: value.to_string(),
    }
}

/// Parse an integer cell, accepting integral floats such as `"12.0"`.
fn parse_int(cell: &str, column: &str, row: usize) -> DatasetResult<i64> {
    let trimmed = cell.trim();
    if let Ok(v) = trimmed.parse::<i64>() {
        return Ok(v);
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() && v.fract() == 0.0 => Ok(v as i64),
        _ => Err(invalid(row, column, cell)),
    }
}

fn parse_float(cell: &str, column: &str, row: usize) -> DatasetResult<f64> {
    cell.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| invalid(row, column, cell))
}

fn parse_label(cell: &str, kind: ColorColumnType, row: usize) -> DatasetResult<Option<Label>> {
    if is_missing(cell) {
        return Ok(None);
    }
    if kind.is_numeric() {
        let value = cell
            .trim()
            .parse::<f64>()
            .map_err(|_| invalid(row, COLOR_COLUMN, cell))?;
        Ok(Some(Label::Number(value)))
    } else {
        Ok(Some(Label::Category(cell.to_string())))
    }
}

//! A labelling session: one dataset and its color mapping.

use serde::Serialize;
use std::path::Path;

use crate::dataset::{ColorColumnType, Dataset};
use crate::error::Result;
use crate::mapping::{compute_mapping, ColorMapping, LegendEntry};
use crate::selection::SelectionState;

/// Owns the dataset and mapping that selection state borrows.
#[derive(Debug, Clone)]
pub struct Session {
    dataset: Dataset,
    mapping: ColorMapping,
}

/// Overview printed by `bundler inspect`.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub name: String,
    pub rows: usize,
    pub columns: Vec<String>,
    pub table_columns: Vec<String>,
    pub projects: Vec<i64>,
    pub has_images: bool,
    pub color_type: Option<ColorColumnType>,
    pub mapping: &'static str,
    pub legend: Vec<LegendEntry>,
}

impl Session {
    /// Load a dataset from CSV and derive its mapping.
    pub fn open(path: &Path) -> Result<Self> {
        let dataset = Dataset::from_path(path)?;
        Self::new(dataset).map_err(Into::into)
    }

    pub fn new(dataset: Dataset) -> crate::error::DatasetResult<Self> {
        let mapping = compute_mapping(&dataset)?;
        tracing::info!(
            "Opened {} ({} rows, {} project(s))",
            dataset.name(),
            dataset.len(),
            dataset.projects().len()
        );
        Ok(Self { dataset, mapping })
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn mapping(&self) -> &ColorMapping {
        &self.mapping
    }

    /// Fresh selection state over this session.
    pub fn selection(&self) -> SelectionState<'_> {
        SelectionState::new(&self.dataset, &self.mapping)
    }

    pub fn summary(&self) -> SessionSummary {
        let mapping = match self.mapping {
            ColorMapping::Absent => "absent",
            ColorMapping::Continuous { .. } => "continuous",
            ColorMapping::Categorical { .. } => "categorical",
        };
        SessionSummary {
            name: self.dataset.name().to_string(),
            rows: self.dataset.len(),
            columns: self.dataset.columns().to_vec(),
            table_columns: self
                .dataset
                .table_columns()
                .into_iter()
                .map(str::to_string)
                .collect(),
            projects: self.dataset.projects(),
            has_images: self.dataset.has_images(),
            color_type: self.dataset.color_type(),
            mapping,
            legend: self.mapping.legend(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{BundlerError, DatasetError};
    use crate::selection::FilterValue;
    use std::io::Write;

    #[test]
    fn test_open_and_select() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            b"id,project,x,y,color\n1,1,0,0,cat\n2,1,1,1,dog\n3,2,2,2,cat\n",
        )
        .unwrap();

        let session = Session::open(file.path()).unwrap();
        let mut state = session.selection();
        state.on_selection_changed(vec![0, 1, 2]);
        let subset = state.on_filter_changed(FilterValue::from_categories(["cat"]));
        let ids: Vec<i64> = subset.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3]);

        let summary = session.summary();
        assert_eq!(summary.rows, 3);
        assert_eq!(summary.projects, vec![1, 2]);
        assert_eq!(summary.mapping, "categorical");
        assert_eq!(summary.legend.len(), 2);
        assert!(!summary.has_images);
    }

    #[test]
    fn test_unsupported_color_type_fails_to_open() {
        let csv = "id,project,x,y,color\n1,1,0,0,true\n2,1,1,1,false\n";
        let dataset = Dataset::from_reader(csv.as_bytes(), "bool.csv").unwrap();
        let err = Session::new(dataset).unwrap_err();
        assert!(matches!(err, DatasetError::UnsupportedColorType { .. }));
    }

    #[test]
    fn test_open_missing_file() {
        let err = Session::open(Path::new("/no/such/dataset.csv")).unwrap_err();
        assert!(matches!(err, BundlerError::Dataset(DatasetError::Csv { .. })));
    }
}

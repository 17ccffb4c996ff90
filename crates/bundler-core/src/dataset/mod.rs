//! The tabular dataset a labelling session works on.
//!
//! A dataset is loaded once from CSV and held read-only for the session. The
//! only transformation applied on load is the normalization of the `color`
//! column: numeric columns keep their values, textual columns are coerced to
//! strings so that categories compare consistently.

mod infer;
mod loader;

pub use infer::{infer_column_type, is_missing, ColorColumnType, MISSING_MARKERS};

use serde::Serialize;
use std::borrow::Cow;

/// Required column holding the task id.
pub const ID_COLUMN: &str = "id";
/// Required column holding the owning project id.
pub const PROJECT_COLUMN: &str = "project";
/// Required layout coordinate columns.
pub const X_COLUMN: &str = "x";
pub const Y_COLUMN: &str = "y";
/// Optional label column driving colors and filters.
pub const COLOR_COLUMN: &str = "color";
/// Optional image source column.
pub const PATH_COLUMN: &str = "path";

/// A normalized value of the `color` column.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Label {
    Number(f64),
    Category(String),
}

impl Label {
    /// Numeric value, if this label came from a numeric column.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Label::Number(v) => Some(*v),
            Label::Category(_) => None,
        }
    }

    /// String form used for categorical comparisons.
    pub fn as_category(&self) -> Cow<'_, str> {
        match self {
            Label::Number(v) => Cow::Owned(v.to_string()),
            Label::Category(s) => Cow::Borrowed(s),
        }
    }
}

/// One record of the dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Position of the row in the dataset (what the scatter plot selects)
    pub index: usize,
    /// Task id in the remote project
    pub id: i64,
    /// Remote project id
    pub project: i64,
    pub x: f64,
    pub y: f64,
    /// Normalized label, `None` when missing or when there is no color column
    pub color: Option<Label>,
    /// Passthrough cells, aligned with [`Dataset::passthrough_columns`]
    pub extra: Vec<String>,
}

/// An ordered, immutable collection of rows.
#[derive(Debug, Clone)]
pub struct Dataset {
    name: String,
    columns: Vec<String>,
    passthrough: Vec<String>,
    color_type: Option<ColorColumnType>,
    rows: Vec<Row>,
}

impl Dataset {
    /// Display name of the dataset (usually the source file name).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All header columns, in file order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Columns carried through verbatim, in file order.
    pub fn passthrough_columns(&self) -> &[String] {
        &self.passthrough
    }

    /// Detected type of the `color` column, `None` if there is no such column.
    pub fn color_type(&self) -> Option<ColorColumnType> {
        self.color_type
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn get(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns `true` if the dataset carries an image `path` column.
    pub fn has_images(&self) -> bool {
        self.passthrough.iter().any(|c| c == PATH_COLUMN)
    }

    /// Passthrough value of `column` for `row`.
    pub fn value<'a>(&self, row: &'a Row, column: &str) -> Option<&'a str> {
        let pos = self.passthrough.iter().position(|c| c == column)?;
        row.extra.get(pos).map(String::as_str)
    }

    /// Columns shown in the rendered table.
    ///
    /// Layout coordinates, the image path and unnamed index columns are hidden.
    pub fn table_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .map(String::as_str)
            .filter(|c| {
                !matches!(*c, X_COLUMN | Y_COLUMN | PATH_COLUMN) && !c.starts_with("Unnamed")
            })
            .collect()
    }

    /// Distinct project ids in first-seen order.
    pub fn projects(&self) -> Vec<i64> {
        let mut seen = Vec::new();
        for row in &self.rows {
            if !seen.contains(&row.project) {
                seen.push(row.project);
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset::from_reader(
            "Unnamed: 0,id,project,x,y,color,text,path\n\
             0,1,7,0.0,0.0,pos,hello,a.jpg\n\
             1,2,7,1.0,1.0,neg,world,b.jpg\n\
             2,3,9,2.0,2.0,,again,c.jpg\n"
                .as_bytes(),
            "sample.csv",
        )
        .unwrap()
    }

    #[test]
    fn test_table_columns_hide_layout_and_path() {
        let dataset = sample();
        assert_eq!(
            dataset.table_columns(),
            vec!["id", "project", "color", "text"]
        );
    }

    #[test]
    fn test_projects_first_seen_order() {
        assert_eq!(sample().projects(), vec![7, 9]);
    }

    #[test]
    fn test_passthrough_value_lookup() {
        let dataset = sample();
        let row = dataset.get(1).unwrap();
        assert_eq!(dataset.value(row, "text"), Some("world"));
        assert_eq!(dataset.value(row, "path"), Some("b.jpg"));
        assert_eq!(dataset.value(row, "missing"), None);
        assert!(dataset.has_images());
    }

    #[test]
    fn test_label_category_coercion() {
        assert_eq!(Label::Category("a".into()).as_category(), "a");
        assert_eq!(Label::Number(2.5).as_category(), "2.5");
        assert_eq!(Label::Number(2.5).as_number(), Some(2.5));
        assert_eq!(Label::Category("a".into()).as_number(), None);
    }
}

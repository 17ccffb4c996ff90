//! Cell-level parsing: missing-value markers and column type inference.

use serde::Serialize;

/// Cell contents treated as missing values.
pub const MISSING_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

const TRUE_LITERALS: &[&str] = &["True", "TRUE", "true"];
const FALSE_LITERALS: &[&str] = &["False", "FALSE", "false"];

/// Returns `true` if the cell holds a missing-value marker.
pub fn is_missing(cell: &str) -> bool {
    MISSING_MARKERS.contains(&cell.trim())
}

/// Type detected for the `color` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorColumnType {
    /// Every cell is an integer and none is missing
    Integer,
    /// Every non-missing cell is numeric
    Float,
    /// Every cell is a boolean literal and none is missing
    Boolean,
    /// Anything else
    Text,
    /// Every cell is missing
    Empty,
}

impl ColorColumnType {
    /// Integer and float columns map to a continuous scale.
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Float)
    }

    /// Name of the detected type, as reported in errors.
    pub fn name(self) -> &'static str {
        match self {
            Self::Integer => "int64",
            Self::Float => "float64",
            Self::Boolean => "bool",
            Self::Text => "object",
            Self::Empty => "empty",
        }
    }
}

impl std::fmt::Display for ColorColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Infer the type of a column from its raw cells.
///
/// A single missing cell demotes an integer column to float and a boolean
/// column to text, the same way a dataframe reader would widen the dtype.
pub fn infer_column_type<'a, I>(cells: I) -> ColorColumnType
where
    I: IntoIterator<Item = &'a str>,
{
    let mut any_missing = false;
    let mut any_present = false;
    let mut all_int = true;
    let mut all_float = true;
    let mut all_bool = true;

    for cell in cells {
        if is_missing(cell) {
            any_missing = true;
            continue;
        }
        any_present = true;
        let cell = cell.trim();
        if all_int && cell.parse::<i64>().is_err() {
            all_int = false;
        }
        if all_float && cell.parse::<f64>().is_err() {
            all_float = false;
        }
        if all_bool && !(TRUE_LITERALS.contains(&cell) || FALSE_LITERALS.contains(&cell)) {
            all_bool = false;
        }
    }

    if !any_present {
        ColorColumnType::Empty
    } else if all_int && !any_missing {
        ColorColumnType::Integer
    } else if all_float {
        ColorColumnType::Float
    } else if all_bool && !any_missing {
        ColorColumnType::Boolean
    } else {
        ColorColumnType::Text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_markers() {
        assert!(is_missing(""));
        assert!(is_missing("  "));
        assert!(is_missing("NaN"));
        assert!(is_missing("null"));
        assert!(!is_missing("0"));
        assert!(!is_missing("none"));
    }

    #[test]
    fn test_infer_integer() {
        assert_eq!(infer_column_type(["1", "2", "-3"]), ColorColumnType::Integer);
    }

    #[test]
    fn test_integer_with_missing_widens_to_float() {
        assert_eq!(infer_column_type(["1", "", "3"]), ColorColumnType::Float);
    }

    #[test]
    fn test_infer_float() {
        assert_eq!(infer_column_type(["0.5", "2", "1e3"]), ColorColumnType::Float);
    }

    #[test]
    fn test_infer_boolean() {
        assert_eq!(infer_column_type(["True", "false"]), ColorColumnType::Boolean);
        assert_eq!(infer_column_type(["True", "NA"]), ColorColumnType::Text);
    }

    #[test]
    fn test_infer_text() {
        assert_eq!(infer_column_type(["cat", "1", ""]), ColorColumnType::Text);
    }

    #[test]
    fn test_infer_empty() {
        assert_eq!(infer_column_type(["", "NaN"]), ColorColumnType::Empty);
        assert_eq!(infer_column_type(Vec::<&str>::new()), ColorColumnType::Empty);
    }
}

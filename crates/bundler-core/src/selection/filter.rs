//! Label filters applied on top of the lasso selection.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::dataset::Label;
use crate::mapping::ColorMapping;

/// An active label filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum FilterValue {
    /// Open interval `(min, max)` over numeric labels
    Range(f64, f64),
    /// Accepted categories
    Set(BTreeSet<String>),
}

impl FilterValue {
    /// Build a set filter from a multi-choice value.
    ///
    /// An empty choice means "no filter" and yields `None`.
    pub fn from_categories<I, S>(categories: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set: BTreeSet<String> = categories.into_iter().map(Into::into).collect();
        if set.is_empty() {
            None
        } else {
            Some(Self::Set(set))
        }
    }

    /// The filter a range widget starts with: the full `[low, high]` span of a
    /// continuous mapping. `None` for other mappings.
    pub fn initial_for(mapping: &ColorMapping) -> Option<Self> {
        match mapping {
            ColorMapping::Continuous { low, high, .. } => Some(Self::Range(*low, *high)),
            _ => None,
        }
    }

    /// Whether a row with this label passes the filter.
    ///
    /// Range bounds are exclusive: a label equal to `min` or `max` is rejected.
    /// Missing labels never pass, and a range never matches a textual label.
    pub fn matches(&self, label: Option<&Label>) -> bool {
        let Some(label) = label else {
            return false;
        };
        match self {
            Self::Range(min, max) => label
                .as_number()
                .is_some_and(|v| v > *min && v < *max),
            Self::Set(accepted) => accepted.contains(label.as_category().as_ref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_is_open_interval() {
        let filter = FilterValue::Range(1.0, 3.0);
        assert!(!filter.matches(Some(&Label::Number(1.0))));
        assert!(filter.matches(Some(&Label::Number(1.0001))));
        assert!(filter.matches(Some(&Label::Number(2.0))));
        assert!(!filter.matches(Some(&Label::Number(3.0))));
        assert!(!filter.matches(None));
    }

    #[test]
    fn test_range_never_matches_categories() {
        let filter = FilterValue::Range(f64::NEG_INFINITY, f64::INFINITY);
        assert!(!filter.matches(Some(&Label::Category("2".into()))));
    }

    #[test]
    fn test_set_membership() {
        let filter = FilterValue::from_categories(["pos", "neutral"]).unwrap();
        assert!(filter.matches(Some(&Label::Category("pos".into()))));
        assert!(!filter.matches(Some(&Label::Category("neg".into()))));
        assert!(!filter.matches(None));
    }

    #[test]
    fn test_empty_choice_is_no_filter() {
        assert_eq!(FilterValue::from_categories(Vec::<String>::new()), None);
    }

    #[test]
    fn test_initial_filter_spans_mapping() {
        let mapping = ColorMapping::Continuous {
            low: -1.0,
            high: 4.0,
            palette: vec![],
        };
        assert_eq!(
            FilterValue::initial_for(&mapping),
            Some(FilterValue::Range(-1.0, 4.0))
        );
        assert_eq!(FilterValue::initial_for(&ColorMapping::Absent), None);
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_string(&FilterValue::Range(0.0, 1.5)).unwrap();
        assert_eq!(json, "{\"kind\":\"range\",\"value\":[0.0,1.5]}");
        let parsed: FilterValue =
            serde_json::from_str("{\"kind\":\"set\",\"value\":[\"a\",\"b\"]}").unwrap();
        assert_eq!(parsed, FilterValue::from_categories(["b", "a"]).unwrap());
    }
}

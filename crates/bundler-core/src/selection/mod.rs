//! Lasso selection and label filter state for one labelling session.
//!
//! The state is owned by the session and mutated only from UI callbacks, one
//! event at a time. Each mutation returns the recomputed effective subset so
//! the caller can re-render immediately.

mod filter;

pub use filter::FilterValue;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::dataset::{Dataset, Row};
use crate::mapping::ColorMapping;

/// Highlighted rows plus the active label filter.
#[derive(Debug, Clone)]
pub struct SelectionState<'a> {
    dataset: &'a Dataset,
    mapping: &'a ColorMapping,
    highlighted: Vec<usize>,
    active_filter: Option<FilterValue>,
}

impl<'a> SelectionState<'a> {
    /// Start with nothing highlighted and no filter.
    pub fn new(dataset: &'a Dataset, mapping: &'a ColorMapping) -> Self {
        Self {
            dataset,
            mapping,
            highlighted: Vec::new(),
            active_filter: None,
        }
    }

    /// Replace the highlighted rows with a new lasso selection.
    ///
    /// An empty selection clears the highlight. Indices outside the dataset
    /// are dropped with a warning.
    pub fn on_selection_changed(&mut self, indices: Vec<usize>) -> Vec<&'a Row> {
        let len = self.dataset.len();
        let (valid, invalid): (Vec<usize>, Vec<usize>) =
            indices.into_iter().partition(|&i| i < len);
        if !invalid.is_empty() {
            tracing::warn!(
                "Ignoring {} selected index(es) outside the dataset (len {len}): {:?}",
                invalid.len(),
                invalid
            );
        }
        tracing::debug!("Selection changed: {} row(s) highlighted", valid.len());
        self.highlighted = valid;
        self.effective_subset()
    }

    /// Replace the active label filter (`None` removes it).
    pub fn on_filter_changed(&mut self, filter: Option<FilterValue>) -> Vec<&'a Row> {
        tracing::debug!("Label filter changed: {filter:?}");
        self.active_filter = filter;
        self.effective_subset()
    }

    /// Highlighted rows that pass the active filter, in selection order.
    ///
    /// The filter is ignored when the dataset has no color column.
    pub fn effective_subset(&self) -> Vec<&'a Row> {
        let dataset: &'a Dataset = self.dataset;
        let highlighted = self.highlighted.iter().filter_map(|&i| dataset.get(i));

        match (&self.active_filter, self.mapping.is_absent()) {
            (Some(filter), false) => highlighted
                .filter(|row| filter.matches(row.color.as_ref()))
                .collect(),
            _ => highlighted.collect(),
        }
    }

    /// The effective subset in random order, for presentation only.
    pub fn shuffled_subset<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<&'a Row> {
        let mut rows = self.effective_subset();
        rows.shuffle(rng);
        rows
    }

    pub fn highlighted(&self) -> &[usize] {
        &self.highlighted
    }

    pub fn active_filter(&self) -> Option<&FilterValue> {
        self.active_filter.as_ref()
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    pub fn mapping(&self) -> &'a ColorMapping {
        self.mapping
    }
}

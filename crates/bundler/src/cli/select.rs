//! Selection and label-filter arguments shared by `table` and `export`.
//!
//! The CLI stands in for the lasso and the filter widgets: `--select` is the
//! set of highlighted row indices, `--range`/`--category` the active filter.

use anyhow::{bail, Context};
use bundler_core::{ColorMapping, FilterValue, Session, SelectionState};
use clap::Args;

#[derive(Args, Debug, Clone, Default)]
pub struct SelectionArgs {
    /// Row indices to select: `all`, or a comma list of indices and inclusive
    /// ranges such as `0,2,5-9`
    #[arg(short, long)]
    pub select: Option<String>,

    /// Keep only numeric labels strictly between MIN and MAX (`MIN,MAX`)
    #[arg(long, value_name = "MIN,MAX", conflicts_with = "category", allow_hyphen_values = true)]
    pub range: Option<String>,

    /// Keep only these categories (repeatable)
    #[arg(long, value_name = "LABEL")]
    pub category: Vec<String>,
}

impl SelectionArgs {
    /// Apply the arguments to a fresh selection over `session`.
    ///
    /// `default_select` is used when `--select` is absent.
    pub fn apply<'s>(
        &self,
        session: &'s Session,
        default_select: Vec<usize>,
    ) -> anyhow::Result<SelectionState<'s>> {
        let len = session.dataset().len();
        let indices = match &self.select {
            Some(expr) => parse_indices(expr, len)?,
            None => default_select,
        };

        let filter = self.filter()?;
        if let Some(message) = filter
            .as_ref()
            .and_then(|f| filter_mismatch(f, session.mapping()))
        {
            tracing::warn!("{message}");
        }

        let mut state = session.selection();
        state.on_selection_changed(indices);
        state.on_filter_changed(filter);
        Ok(state)
    }

    /// The label filter these arguments describe, if any.
    pub fn filter(&self) -> anyhow::Result<Option<FilterValue>> {
        if let Some(range) = &self.range {
            let (min, max) = parse_range(range)?;
            return Ok(Some(FilterValue::Range(min, max)));
        }
        Ok(FilterValue::from_categories(self.category.iter().cloned()))
    }
}

/// Why `filter` cannot act as intended on `mapping`, if it cannot.
fn filter_mismatch(filter: &FilterValue, mapping: &ColorMapping) -> Option<&'static str> {
    match (filter, mapping) {
        (_, ColorMapping::Absent) => Some("Dataset has no color column; label filter ignored"),
        (FilterValue::Range(..), ColorMapping::Categorical { .. }) => {
            Some("--range used on categorical labels; no row will pass the filter")
        }
        (FilterValue::Set(_), ColorMapping::Continuous { .. }) => {
            Some("--category used on numeric labels; only exact string matches will pass")
        }
        _ => None,
    }
}

/// Parse `all` or `0,2,5-9` into row indices, in the order given.
///
/// Single indices at or past `len` are passed through and the selection
/// state drops them with a warning. Ranges are clamped to the dataset.
pub fn parse_indices(expr: &str, len: usize) -> anyhow::Result<Vec<usize>> {
    let expr = expr.trim();
    if expr.eq_ignore_ascii_case("all") {
        return Ok((0..len).collect());
    }

    let mut indices = Vec::new();
    for part in expr.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        match part.split_once('-') {
            Some((start, end)) => {
                let start = parse_index(start)?;
                let end = parse_index(end)?;
                if end < start {
                    bail!("Invalid range '{part}': end is before start");
                }
                // An out-of-range start is kept alone so it is still reported.
                let end = end.min(len.saturating_sub(1).max(start));
                indices.extend(start..=end);
            }
            None => indices.push(parse_index(part)?),
        }
    }
    Ok(indices)
}

fn parse_index(s: &str) -> anyhow::Result<usize> {
    s.trim()
        .parse()
        .with_context(|| format!("Invalid row index '{}'", s.trim()))
}

fn parse_range(s: &str) -> anyhow::Result<(f64, f64)> {
    let Some((min, max)) = s.split_once(',') else {
        bail!("Invalid range '{s}': expected MIN,MAX");
    };
    let min: f64 = min
        .trim()
        .parse()
        .with_context(|| format!("Invalid range minimum '{}'", min.trim()))?;
    let max: f64 = max
        .trim()
        .parse()
        .with_context(|| format!("Invalid range maximum '{}'", max.trim()))?;
    if !min.is_finite() || !max.is_finite() {
        bail!("Invalid range '{s}': bounds must be finite");
    }
    if min > max {
        bail!("Invalid range '{s}': minimum is greater than maximum");
    }
    Ok((min, max))
}

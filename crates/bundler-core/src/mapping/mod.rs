//! Color/label mapping for the scatter plot and its legend.
//!
//! The `color` column decides how points are colored: numeric columns get a
//! continuous magma scale between the column's min and max, textual columns get
//! one magma entry per distinct category.

pub mod palette;

pub use palette::{magma, magma256, Rgb, NO_DATA_COLOR};

use serde::Serialize;

use crate::dataset::{ColorColumnType, Dataset, Label};
use crate::error::{DatasetError, DatasetResult};

/// Number of ticks shown on a continuous color bar.
const COLOR_BAR_TICKS: usize = 5;

/// How row labels translate into colors.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ColorMapping {
    /// The dataset has no `color` column
    Absent,
    /// Linear scale over `[low, high]`
    Continuous {
        low: f64,
        high: f64,
        palette: Vec<Rgb>,
    },
    /// One palette entry per factor, in first-seen order
    Categorical {
        factors: Vec<String>,
        palette: Vec<Rgb>,
    },
}

/// One entry of a legend or color bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: Rgb,
}

/// Derive the color mapping for a dataset.
///
/// Fails with [`DatasetError::UnsupportedColorType`] when the `color` column
/// is neither numeric nor textual.
pub fn compute_mapping(dataset: &Dataset) -> DatasetResult<ColorMapping> {
    let Some(kind) = dataset.color_type() else {
        return Ok(ColorMapping::Absent);
    };

    match kind {
        ColorColumnType::Integer | ColorColumnType::Float => {
            let mut values = dataset
                .rows()
                .iter()
                .filter_map(|r| r.color.as_ref().and_then(Label::as_number));
            let Some(first) = values.next() else {
                return Err(DatasetError::UnsupportedColorType {
                    detected: ColorColumnType::Empty.to_string(),
                });
            };
            let (low, high) = values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
            tracing::debug!("Continuous color mapping over [{low}, {high}]");
            Ok(ColorMapping::Continuous {
                low,
                high,
                palette: magma256(),
            })
        }
        ColorColumnType::Text => {
            let mut factors: Vec<String> = Vec::new();
            for row in dataset.rows() {
                if let Some(label) = &row.color {
                    let value = label.as_category();
                    if !factors.iter().any(|f| f.as_str() == value) {
                        factors.push(value.into_owned());
                    }
                }
            }
            tracing::debug!("Categorical color mapping with {} factors", factors.len());
            let palette = magma(factors.len());
            Ok(ColorMapping::Categorical { factors, palette })
        }
        ColorColumnType::Boolean | ColorColumnType::Empty => {
            Err(DatasetError::UnsupportedColorType {
                detected: kind.to_string(),
            })
        }
    }
}

impl ColorMapping {
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn is_continuous(&self) -> bool {
        matches!(self, Self::Continuous { .. })
    }

    /// Color of a point with the given label.
    ///
    /// Missing labels, unknown categories and non-finite numbers render with
    /// [`NO_DATA_COLOR`]. With an absent mapping every point uses the first
    /// magma entry.
    pub fn color_for(&self, label: Option<&Label>) -> Rgb {
        match (self, label) {
            (Self::Absent, _) => magma(1)[0],
            (_, None) => NO_DATA_COLOR,
            (
                Self::Continuous {
                    low,
                    high,
                    palette,
                },
                Some(label),
            ) => match label.as_number() {
                Some(v) if v.is_finite() => palette
                    .get(linear_bucket(v, *low, *high, palette.len()))
                    .copied()
                    .unwrap_or(NO_DATA_COLOR),
                _ => NO_DATA_COLOR,
            },
            (Self::Categorical { factors, palette }, Some(label)) => {
                let value = label.as_category();
                factors
                    .iter()
                    .position(|f| f.as_str() == value)
                    .and_then(|i| palette.get(i).copied())
                    .unwrap_or(NO_DATA_COLOR)
            }
        }
    }

    /// Legend entries: one per factor, or evenly spaced ticks for a color bar.
    pub fn legend(&self) -> Vec<LegendEntry> {
        match self {
            Self::Absent => Vec::new(),
            Self::Categorical { factors, palette } => factors
                .iter()
                .zip(palette)
                .map(|(f, c)| LegendEntry {
                    label: f.clone(),
                    color: *c,
                })
                .collect(),
            Self::Continuous { low, high, .. } => {
                if low == high {
                    let label = Label::Number(*low);
                    return vec![LegendEntry {
                        label: low.to_string(),
                        color: self.color_for(Some(&label)),
                    }];
                }
                (0..COLOR_BAR_TICKS)
                    .map(|i| {
                        let v = low + (high - low) * i as f64 / (COLOR_BAR_TICKS - 1) as f64;
                        LegendEntry {
                            label: format!("{v:.2}"),
                            color: self.color_for(Some(&Label::Number(v))),
                        }
                    })
                    .collect()
            }
        }
    }
}

/// Palette index for `value` on a linear scale with `n` buckets.
///
/// Values at or above `high` land in the last bucket, values below `low` in
/// the first.
fn linear_bucket(value: f64, low: f64, high: f64, n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    if value >= high {
        return n - 1;
    }
    if value <= low {
        return 0;
    }
    let t = (value - low) / (high - low);
    ((t * n as f64).floor() as usize).min(n - 1)
}

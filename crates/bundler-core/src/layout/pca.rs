//! Deterministic two-component PCA.

use ndarray::{Array1, Array2, Axis};

use super::LayoutReducer;
use crate::error::LayoutError;

const MAX_ITERATIONS: usize = 500;
const TOLERANCE: f64 = 1e-10;

/// Projects feature vectors onto their two leading principal components.
///
/// Components are found by power iteration on the covariance matrix with
/// deflation. The start vector and sign convention are fixed, so the same
/// input always produces the same layout.
#[derive(Debug, Clone, Default)]
pub struct PcaReducer;

impl PcaReducer {
    pub fn new() -> Self {
        Self
    }
}

impl LayoutReducer for PcaReducer {
    fn name(&self) -> &str {
        "pca"
    }

    fn reduce(&self, features: &Array2<f64>) -> Result<Vec<[f64; 2]>, LayoutError> {
        let (n, d) = features.dim();
        if n == 0 {
            return Ok(Vec::new());
        }
        if d == 0 {
            return Err(LayoutError::Degenerate(
                "feature vectors are empty".to_string(),
            ));
        }

        let mean = features
            .mean_axis(Axis(0))
            .ok_or_else(|| LayoutError::Degenerate("no rows to center".to_string()))?;
        let centered = features - &mean;

        let denom = (n.max(2) - 1) as f64;
        let mut covariance = centered.t().dot(&centered) / denom;

        let first = leading_component(&covariance);
        if let Some((value, vector)) = &first {
            deflate(&mut covariance, *value, vector);
        }
        let second = leading_component(&covariance);

        let project = |component: &Option<(f64, Array1<f64>)>| match component {
            Some((_, v)) => centered.dot(v),
            None => Array1::zeros(n),
        };
        let xs = project(&first);
        let ys = project(&second);

        Ok(xs.iter().zip(ys.iter()).map(|(&x, &y)| [x, y]).collect())
    }
}

/// Largest eigenpair of a symmetric matrix, `None` if the matrix is ~zero.
fn leading_component(matrix: &Array2<f64>) -> Option<(f64, Array1<f64>)> {
    // Start from the column with the largest norm; a fixed choice that is
    // never orthogonal to the dominant direction of a non-zero PSD matrix.
    let start = matrix
        .axis_iter(Axis(1))
        .max_by(|a, b| norm(a.view()).total_cmp(&norm(b.view())))?
        .to_owned();
    let mut v = normalized(start)?;

    for _ in 0..MAX_ITERATIONS {
        let next = normalized(matrix.dot(&v))?;
        let delta = (&next - &v).mapv(f64::abs).sum();
        v = next;
        if delta < TOLERANCE {
            break;
        }
    }

    let value = v.dot(&matrix.dot(&v));
    if value <= TOLERANCE {
        return None;
    }
    Some((value, fix_sign(v)))
}

fn deflate(matrix: &mut Array2<f64>, value: f64, vector: &Array1<f64>) {
    let d = vector.len();
    for i in 0..d {
        for j in 0..d {
            matrix[[i, j]] -= value * vector[i] * vector[j];
        }
    }
}

fn norm(v: ndarray::ArrayView1<f64>) -> f64 {
    v.dot(&v).sqrt()
}

fn normalized(v: Array1<f64>) -> Option<Array1<f64>> {
    let n = norm(v.view());
    if n <= f64::EPSILON {
        return None;
    }
    Some(v / n)
}

/// Flip the vector so its largest-magnitude entry is positive.
fn fix_sign(v: Array1<f64>) -> Array1<f64> {
    let pivot = v
        .iter()
        .copied()
        .max_by(|a, b| a.abs().total_cmp(&b.abs()))
        .unwrap_or(0.0);
    if pivot < 0.0 {
        -v
    } else {
        v
    }
}

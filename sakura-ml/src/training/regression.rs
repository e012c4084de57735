//! Ordinary least squares with an intercept.
//!
//! Features and targets are mean-centered before forming the normal
//! equations, which keeps the system well conditioned and lets the intercept
//! be recovered afterwards as `ȳ - β·x̄`.

use crate::error::MlError;

/// Fitted intercept and per-feature coefficients.
#[derive(Debug, Clone, PartialEq)]
pub struct OlsFit {
    pub intercept: f64,
    pub coefficients: Vec<f64>,
}

/// Fit `y ≈ intercept + Σ βᵢ·xᵢ` by least squares.
///
/// Every row of `design` must have the same width. Columns with no variance
/// (or that are exact linear combinations of earlier columns) receive a zero
/// coefficient instead of failing the fit.
pub fn fit_ols(design: &[Vec<f64>], targets: &[f64]) -> Result<OlsFit, MlError> {
    if design.is_empty() {
        return Err(MlError::training("Cannot fit a model on zero rows"));
    }
    if design.len() != targets.len() {
        return Err(MlError::training(format!(
            "Row count mismatch: {} feature rows, {} targets",
            design.len(),
            targets.len()
        )));
    }
    let width = design[0].len();
    if let Some(bad) = design.iter().position(|row| row.len() != width) {
        return Err(MlError::training(format!(
            "Row {bad} has {} features, expected {width}",
            design[bad].len()
        )));
    }
    if design.iter().flatten().chain(targets).any(|v| !v.is_finite()) {
        return Err(MlError::training("Training data contains non-finite values"));
    }

    let n = design.len() as f64;
    let mut x_mean = vec![0.0; width];
    for row in design {
        for (m, v) in x_mean.iter_mut().zip(row) {
            *m += v / n;
        }
    }
    let y_mean = targets.iter().sum::<f64>() / n;

    // Normal equations on centered data: (XᵀX) β = Xᵀy
    let mut xtx = vec![vec![0.0; width]; width];
    let mut xty = vec![0.0; width];
    for (row, y) in design.iter().zip(targets) {
        let centered: Vec<f64> = row.iter().zip(&x_mean).map(|(v, m)| v - m).collect();
        let yc = y - y_mean;
        for i in 0..width {
            xty[i] += centered[i] * yc;
            for j in i..width {
                xtx[i][j] += centered[i] * centered[j];
            }
        }
    }
    for i in 0..width {
        for j in 0..i {
            xtx[i][j] = xtx[j][i];
        }
    }

    let coefficients = solve_symmetric(xtx, xty);
    let intercept = y_mean
        - coefficients
            .iter()
            .zip(&x_mean)
            .map(|(b, m)| b * m)
            .sum::<f64>();

    if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
        return Err(MlError::training("Least squares solution is not finite"));
    }

    Ok(OlsFit {
        intercept,
        coefficients,
    })
}

/// Gaussian elimination with partial pivoting.
///
/// Columns whose best pivot falls below tolerance are left free and set to
/// zero. Normal equations are always consistent, so this still yields a
/// least-squares solution when the system is rank deficient.
fn solve_symmetric(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Vec<f64> {
    let n = b.len();
    let scale = (0..n).map(|i| a[i][i].abs()).fold(0.0, f64::max).max(1.0);
    let tolerance = scale * 1e-10;

    let mut pivot_cols = Vec::with_capacity(n);
    let mut row = 0;
    for col in 0..n {
        if row == n {
            break;
        }
        let best = (row..n)
            .max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))
            .unwrap_or(row);
        if a[best][col].abs() <= tolerance {
            tracing::debug!(column = col, "Dropping collinear column from fit");
            continue;
        }
        a.swap(row, best);
        b.swap(row, best);

        let pivot_row = a[row].clone();
        let pivot_b = b[row];
        for r in (row + 1)..n {
            let factor = a[r][col] / pivot_row[col];
            if factor == 0.0 {
                continue;
            }
            for c in col..n {
                a[r][c] -= factor * pivot_row[c];
            }
            b[r] -= factor * pivot_b;
        }
        pivot_cols.push(col);
        row += 1;
    }

    let mut x = vec![0.0; n];
    for (r, &col) in pivot_cols.iter().enumerate().rev() {
        let mut sum = b[r];
        for c in (col + 1)..n {
            sum -= a[r][c] * x[c];
        }
        x[col] = sum / a[r][col];
    }
    x
}

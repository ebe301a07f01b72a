// src/stats.rs
//! Batch sample statistics over in-memory sequences
//!
//! All functions are pure and operate on `ArrayView1<f64>`, so callers can
//! hand in owned arrays, slices of a larger sample, or views over `Vec`s via
//! `ArrayView1::from(&v[..])`. Variances and covariances are unbiased
//! (divisor `n - 1`).

use crate::error::{validation::require_observations, McError, McResult};
use ndarray::{ArrayView1, Zip};

/// Arithmetic mean; fails on an empty sequence
pub fn mean(x: ArrayView1<f64>) -> McResult<f64> {
    x.mean().ok_or_else(|| McError::InsufficientSamples {
        statistic: "mean".to_string(),
        required: 1,
        available: 0,
    })
}

/// Unbiased sample variance (ddof = 1)
pub fn sample_variance(x: ArrayView1<f64>) -> McResult<f64> {
    require_observations("sample variance", x.len(), 2)?;
    Ok(x.var(1.0))
}

/// Unbiased sample standard deviation (ddof = 1)
pub fn sample_std(x: ArrayView1<f64>) -> McResult<f64> {
    sample_variance(x).map(f64::sqrt)
}

/// Unbiased paired sample covariance; `x` and `y` must be index-aligned
pub fn sample_covariance(x: ArrayView1<f64>, y: ArrayView1<f64>) -> McResult<f64> {
    Ok(PairedMoments::new(x, y)?.covariance)
}

/// First and second sample moments of an index-aligned pair of sequences
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairedMoments {
    pub n: usize,
    pub mean_x: f64,
    pub mean_y: f64,
    pub var_x: f64,
    pub var_y: f64,
    pub covariance: f64,
}

impl PairedMoments {
    pub fn new(x: ArrayView1<f64>, y: ArrayView1<f64>) -> McResult<Self> {
        if x.len() != y.len() {
            return Err(McError::InvalidArgument {
                parameter: "paired sequence length".to_string(),
                value: y.len() as f64,
                constraint: format!("must equal the first sequence length ({})", x.len()),
            });
        }
        let n = x.len();
        require_observations("paired covariance", n, 2)?;

        let mean_x = mean(x)?;
        let mean_y = mean(y)?;
        let (sxx, syy, sxy) = Zip::from(&x).and(&y).fold(
            (0.0, 0.0, 0.0),
            |(sxx, syy, sxy), &a, &b| {
                let da = a - mean_x;
                let db = b - mean_y;
                (sxx + da * da, syy + db * db, sxy + da * db)
            },
        );
        let denom = (n - 1) as f64;

        Ok(Self {
            n,
            mean_x,
            mean_y,
            var_x: sxx / denom,
            var_y: syy / denom,
            covariance: sxy / denom,
        })
    }

    /// True when every moment is finite; overflow or NaN inputs leave inf/NaN here
    pub fn is_finite(&self) -> bool {
        self.mean_x.is_finite()
            && self.mean_y.is_finite()
            && self.var_x.is_finite()
            && self.var_y.is_finite()
            && self.covariance.is_finite()
    }

    /// Sample correlation, or `None` when either side has zero variance
    pub fn correlation(&self) -> Option<f64> {
        if self.var_x <= 0.0 || self.var_y <= 0.0 {
            return None;
        }
        let rho = self.covariance / (self.var_x * self.var_y).sqrt();
        // rounding can push |rho| a few ulps past 1 for perfectly linear pairs
        Some(rho.clamp(-1.0, 1.0))
    }

    /// Cov(X,Y)² / (Var(X)·Var(Y)), or `None` when undefined
    pub fn rho_squared(&self) -> Option<f64> {
        self.correlation().map(|rho| rho * rho)
    }
}

// src/mc/estimators.rs
//! Monte Carlo estimators for the European call
//!
//! # Estimators
//!
//! 1. **Plain**: mean of discounted payoffs Y
//!
//! 2. **Control variate**: the discounted terminal price X = e^(-rT) S_T has
//!    known mean S_0. With the optimal coefficient
//!    ```text
//!    b* = Cov(X, Y) / Var(X)
//!    Z  = Y - b*(X - S_0)
//!    ```
//!    E\[Z\] = E\[Y\] and Var(Z) = Var(Y)(1 - ρ²).
//!
//! 3. **Antithetic variate**: payoffs Y¹ from draws x and Y² from -x are
//!    concatenated into one sample of size 2·half_n; the paired covariance
//!    Cov(Y¹, Y²) is reported as a diagnostic.
//!
//! # Confidence Intervals
//!
//! Every estimator reduces to a set of i.i.d.-treated observations and reports
//! ```text
//! price  = mean(obs)
//! stderr = stdev(obs, ddof=1) / √n
//! CI     = price ± z_{1-ε/2} · stderr
//! ```
//!
//! Each estimator is available as a pure kernel over precomputed arrays and as
//! a stream-driven `estimate_*` function that samples first.

use crate::error::{validation::*, McError, McResult};
use crate::math_utils::two_sided_z;
use crate::mc::payoffs::{discounted_controls, EuropeanCall};
use crate::mc::sampler::{sample_terminal_prices, sample_terminal_prices_antithetic};
use crate::models::gbm::ModelParameters;
use crate::rng::RandomStream;
use crate::stats::{self, PairedMoments};
use ndarray::{Array1, ArrayView1};
use tracing::debug;

/// Estimator-specific extras attached to a result
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Diagnostics {
    None,
    ControlVariate {
        /// Fitted b*
        coefficient: f64,
        /// Cov(X,Y)² / (Var(X)·Var(Y)); 0 when the payoff sample is constant
        rho_squared: f64,
    },
    Antithetic {
        /// Paired Cov(Y¹, Y²)
        covariance: f64,
        /// Cov(Y¹, Y²) / (2·half_n)
        possible_reduction: f64,
    },
}

/// Point estimate with a symmetric Gaussian confidence interval
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimationResult {
    pub price: f64,
    pub stderr: f64,
    pub ci_low: f64,
    pub ci_high: f64,
    /// Number of observations behind `stderr`
    pub n: usize,
    pub diagnostics: Diagnostics,
}

impl EstimationResult {
    /// Build a result from observations
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if `epsilon` is outside (0, 1)
    /// - `InsufficientSamples` for fewer than two observations
    /// - `NumericalInstability` if the mean or standard error is not finite
    pub fn from_observations(
        observations: ArrayView1<f64>,
        epsilon: f64,
        method: &str,
    ) -> McResult<Self> {
        validate_open_unit("epsilon", epsilon)?;
        let n = observations.len();
        require_observations(method, n, 2)?;

        let price = stats::mean(observations)?;
        let stderr = stats::sample_std(observations)? / (n as f64).sqrt();

        if !price.is_finite() {
            return Err(McError::NumericalInstability {
                method: method.to_string(),
                reason: format!("Price estimate is not finite: {}", price),
            });
        }
        if !stderr.is_finite() {
            return Err(McError::NumericalInstability {
                method: method.to_string(),
                reason: format!("Standard error is not finite: {}", stderr),
            });
        }

        let half_width = two_sided_z(epsilon) * stderr;
        Ok(EstimationResult {
            price,
            stderr,
            ci_low: price - half_width,
            ci_high: price + half_width,
            n,
            diagnostics: Diagnostics::None,
        })
    }

    fn with_diagnostics(mut self, diagnostics: Diagnostics) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn half_width(&self) -> f64 {
        0.5 * (self.ci_high - self.ci_low)
    }

    pub fn contains(&self, value: f64) -> bool {
        self.ci_low <= value && value <= self.ci_high
    }

    pub fn relative_error(&self, reference: f64) -> f64 {
        (self.price - reference).abs() / reference.abs()
    }

    pub fn rho_squared(&self) -> Option<f64> {
        match self.diagnostics {
            Diagnostics::ControlVariate { rho_squared, .. } => Some(rho_squared),
            _ => None,
        }
    }

    pub fn possible_reduction(&self) -> Option<f64> {
        match self.diagnostics {
            Diagnostics::Antithetic {
                possible_reduction, ..
            } => Some(possible_reduction),
            _ => None,
        }
    }
}

/// Plain Monte Carlo over discounted payoffs
pub fn plain_estimate(payoffs: ArrayView1<f64>, epsilon: f64) -> McResult<EstimationResult> {
    EstimationResult::from_observations(payoffs, epsilon, "Plain Monte Carlo")
}

/// Control-variate estimate with control `controls` of known mean `control_mean`
///
/// # Errors
///
/// `DegenerateControl` when the control has zero sample variance, and
/// `NumericalInstability` when the sample moments or b* are not finite.
pub fn control_variate_estimate(
    payoffs: ArrayView1<f64>,
    controls: ArrayView1<f64>,
    control_mean: f64,
    epsilon: f64,
) -> McResult<EstimationResult> {
    const METHOD: &str = "Control Variate Monte Carlo";

    validate_open_unit("epsilon", epsilon)?;
    validate_finite("control_mean", control_mean)?;
    let moments = PairedMoments::new(controls, payoffs)?;

    if !moments.is_finite() {
        return Err(McError::NumericalInstability {
            method: METHOD.to_string(),
            reason: format!(
                "Sample moments are not finite: Var(control) = {}, Var(payoff) = {}, Cov = {}",
                moments.var_x, moments.var_y, moments.covariance
            ),
        });
    }
    if moments.var_x == 0.0 {
        return Err(McError::DegenerateControl {
            variance: moments.var_x,
        });
    }
    let b = moments.covariance / moments.var_x;
    if !b.is_finite() {
        return Err(McError::NumericalInstability {
            method: METHOD.to_string(),
            reason: format!(
                "Optimal coefficient is not finite: Cov = {}, Var(control) = {}",
                moments.covariance, moments.var_x
            ),
        });
    }

    let adjusted: Array1<f64> = ndarray::Zip::from(&payoffs)
        .and(&controls)
        .map_collect(|&y, &x| y - b * (x - control_mean));

    // a constant payoff sample (deep OTM) explains nothing
    let rho_squared = moments.rho_squared().unwrap_or(0.0);
    debug!(n = moments.n, b, rho_squared, "fitted control variate");

    Ok(
        EstimationResult::from_observations(adjusted.view(), epsilon, METHOD)?.with_diagnostics(
            Diagnostics::ControlVariate {
                coefficient: b,
                rho_squared,
            },
        ),
    )
}

/// Antithetic estimate from index-aligned payoff halves
pub fn antithetic_estimate(
    original: ArrayView1<f64>,
    antithetic: ArrayView1<f64>,
    epsilon: f64,
) -> McResult<EstimationResult> {
    validate_open_unit("epsilon", epsilon)?;
    let moments = PairedMoments::new(original, antithetic)?;
    let total = 2 * moments.n;
    let possible_reduction = moments.covariance / total as f64;

    let combined: Array1<f64> = original.iter().chain(antithetic.iter()).copied().collect();
    debug!(
        half_n = moments.n,
        covariance = moments.covariance,
        possible_reduction,
        "paired antithetic payoffs"
    );

    Ok(
        EstimationResult::from_observations(combined.view(), epsilon, "Antithetic Monte Carlo")?
            .with_diagnostics(Diagnostics::Antithetic {
                covariance: moments.covariance,
                possible_reduction,
            }),
    )
}

fn validate_request(params: &ModelParameters, n: usize, min_n: usize, epsilon: f64) -> McResult<()> {
    params.validate()?;
    validate_open_unit("epsilon", epsilon)?;
    validate_sample_size("n", n)?;
    require_observations("sample variance", n, min_n)
}

/// Sample `n` terminal prices from `stream` and run the plain estimator
pub fn estimate_plain(
    stream: &mut RandomStream,
    params: &ModelParameters,
    n: usize,
    epsilon: f64,
) -> McResult<EstimationResult> {
    validate_request(params, n, 2, epsilon)?;
    let sample = sample_terminal_prices(stream, params.s0, params.t, params.r, params.sigma, n)?;
    let payoffs = EuropeanCall::new(params.k).discounted_payoffs(sample.prices(), params.r, params.t);
    plain_estimate(payoffs.view(), epsilon)
}

/// Sample `n` terminal prices and run the control-variate estimator with
/// X = e^(-rT) S_T, E\[X\] = S_0
pub fn estimate_control_variate(
    stream: &mut RandomStream,
    params: &ModelParameters,
    n: usize,
    epsilon: f64,
) -> McResult<EstimationResult> {
    validate_request(params, n, 2, epsilon)?;
    let sample = sample_terminal_prices(stream, params.s0, params.t, params.r, params.sigma, n)?;
    let payoffs = EuropeanCall::new(params.k).discounted_payoffs(sample.prices(), params.r, params.t);
    let controls = discounted_controls(sample.prices(), params.r, params.t);
    control_variate_estimate(payoffs.view(), controls.view(), params.s0, epsilon)
}

/// Sample `half_n` antithetic pairs and run the antithetic estimator over
/// `2·half_n` observations
pub fn estimate_antithetic(
    stream: &mut RandomStream,
    params: &ModelParameters,
    half_n: usize,
    epsilon: f64,
) -> McResult<EstimationResult> {
    validate_request(params, half_n, 2, epsilon)?;
    let set = sample_terminal_prices_antithetic(
        stream,
        params.s0,
        params.t,
        params.r,
        params.sigma,
        half_n,
    )?;
    let call = EuropeanCall::new(params.k);
    let y1 = call.discounted_payoffs(set.original.prices(), params.r, params.t);
    let y2 = call.discounted_payoffs(set.antithetic.prices(), params.r, params.t);
    antithetic_estimate(y1.view(), y2.view(), epsilon)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_plain_estimate_small_sample() {
        let y = array![1.0, 2.0, 3.0, 4.0];
        let res = plain_estimate(y.view(), 0.05).unwrap();

        let stderr = (5.0f64 / 3.0).sqrt() / 2.0;
        assert_abs_diff_eq!(res.price, 2.5);
        assert_abs_diff_eq!(res.stderr, stderr, epsilon = 1e-15);
        assert_abs_diff_eq!(res.half_width(), 1.959963984540054 * stderr, epsilon = 1e-6);
        assert!(res.contains(res.price));
        assert_eq!(res.n, 4);
        assert_eq!(res.diagnostics, Diagnostics::None);
    }

    #[test]
    fn test_interval_is_symmetric() {
        let y = array![0.0, 0.5, 3.0, 7.5, 1.25];
        let res = plain_estimate(y.view(), 0.1).unwrap();
        assert_abs_diff_eq!(res.price - res.ci_low, res.ci_high - res.price, epsilon = 1e-12);
        assert!(res.ci_low <= res.price && res.price <= res.ci_high);
    }

    #[test]
    fn test_plain_requires_two_observations() {
        let y = array![1.0];
        assert!(matches!(
            plain_estimate(y.view(), 0.05),
            Err(McError::InsufficientSamples { required: 2, available: 1, .. })
        ));
    }

    #[test]
    fn test_epsilon_bounds() {
        let y = array![1.0, 2.0];
        assert!(matches!(plain_estimate(y.view(), 0.0), Err(McError::InvalidArgument { .. })));
        assert!(matches!(plain_estimate(y.view(), 1.0), Err(McError::InvalidArgument { .. })));
    }

    #[test]
    fn test_constant_sample_has_zero_stderr() {
        let y = array![2.0, 2.0, 2.0];
        let res = plain_estimate(y.view(), 0.05).unwrap();
        assert_eq!(res.stderr, 0.0);
        assert_eq!(res.ci_low, res.price);
        assert_eq!(res.ci_high, res.price);
    }

    #[test]
    fn test_control_variate_perfect_linear_control() {
        // Y = 2X exactly: b* = 2, Z is constant at 2·E[X]
        let x = array![1.0, 2.0, 3.0, 4.0];
        let y = x.mapv(|v| 2.0 * v);
        let res = control_variate_estimate(y.view(), x.view(), 3.0, 0.05).unwrap();

        assert_abs_diff_eq!(res.price, 6.0, epsilon = 1e-12);
        assert_abs_diff_eq!(res.stderr, 0.0, epsilon = 1e-12);
        match res.diagnostics {
            Diagnostics::ControlVariate { coefficient, rho_squared } => {
                assert_abs_diff_eq!(coefficient, 2.0, epsilon = 1e-12);
                assert_abs_diff_eq!(rho_squared, 1.0, epsilon = 1e-12);
            }
            other => panic!("unexpected diagnostics {:?}", other),
        }
    }

    #[test]
    fn test_control_variate_degenerate_control() {
        let x = array![5.0, 5.0, 5.0];
        let y = array![1.0, 2.0, 3.0];
        assert_eq!(
            control_variate_estimate(y.view(), x.view(), 5.0, 0.05),
            Err(McError::DegenerateControl { variance: 0.0 })
        );
    }

    #[test]
    fn test_control_variate_constant_payoff() {
        let x = array![1.0, 2.0, 3.0];
        let y = array![0.0, 0.0, 0.0];
        let res = control_variate_estimate(y.view(), x.view(), 2.0, 0.05).unwrap();
        assert_eq!(res.price, 0.0);
        assert_eq!(res.rho_squared(), Some(0.0));
    }

    #[test]
    fn test_control_variate_overflowing_coefficient() {
        // Var(X) ≈ 1e-320 is subnormal but non-zero; Cov(X,Y) ≈ 1
        let x = array![0.0, 1e-160, 2e-160];
        let y = array![0.0, 1e160, 2e160];
        assert!(matches!(
            control_variate_estimate(y.view(), x.view(), 1e-160, 0.05),
            Err(McError::NumericalInstability { .. })
        ));
    }

    #[test]
    fn test_control_variate_nan_control() {
        let x = array![1.0, f64::NAN, 3.0];
        let y = array![0.0, 1.0, 2.0];
        assert!(matches!(
            control_variate_estimate(y.view(), x.view(), 2.0, 0.05),
            Err(McError::NumericalInstability { .. })
        ));
    }

    #[test]
    fn test_relative_error() {
        let y = array![2.0, 4.0];
        let res = plain_estimate(y.view(), 0.05).unwrap();
        assert_abs_diff_eq!(res.relative_error(4.0), 0.25, epsilon = 1e-15);
        assert_abs_diff_eq!(res.relative_error(-2.0), 2.5, epsilon = 1e-15);
        assert_eq!(res.relative_error(3.0), 0.0);
    }

    #[test]
    fn test_antithetic_estimate_small_sample() {
        let y1 = array![0.0, 4.0, 0.0, 2.0];
        let y2 = array![3.0, 0.0, 1.0, 0.0];
        let res = antithetic_estimate(y1.view(), y2.view(), 0.05).unwrap();

        assert_eq!(res.n, 8);
        assert_abs_diff_eq!(res.price, 10.0 / 8.0, epsilon = 1e-15);
        let cov = sample_cov(&[0.0, 4.0, 0.0, 2.0], &[3.0, 0.0, 1.0, 0.0]);
        assert!(cov < 0.0);
        assert_abs_diff_eq!(res.possible_reduction().unwrap(), cov / 8.0, epsilon = 1e-15);
        assert!(res.rho_squared().is_none());
    }

    #[test]
    fn test_antithetic_halves_must_match() {
        let y1 = array![1.0, 2.0, 3.0];
        let y2 = array![1.0, 2.0];
        assert!(antithetic_estimate(y1.view(), y2.view(), 0.05).is_err());
    }

    #[test]
    fn test_stream_estimators_reject_bad_inputs_before_sampling() {
        let mut stream = RandomStream::new(1);
        let params = ModelParameters::default();
        let bad = ModelParameters { sigma: 0.0, ..params };

        assert!(matches!(
            estimate_plain(&mut stream, &params, 0, 0.05),
            Err(McError::InvalidArgument { .. })
        ));
        assert!(matches!(
            estimate_plain(&mut stream, &params, 1, 0.05),
            Err(McError::InsufficientSamples { .. })
        ));
        assert!(matches!(
            estimate_control_variate(&mut stream, &bad, 100, 0.05),
            Err(McError::InvalidArgument { .. })
        ));
        assert!(matches!(
            estimate_antithetic(&mut stream, &params, 1, 0.05),
            Err(McError::InsufficientSamples { .. })
        ));
        assert!(estimate_plain(&mut stream, &params, 100, 1.5).is_err());
        assert_eq!(stream.consumed(), 0);
    }

    #[test]
    fn test_stream_estimators_consume_expected_draws() {
        let mut stream = RandomStream::new(5);
        let params = ModelParameters::default();

        estimate_plain(&mut stream, &params, 1_000, 0.05).unwrap();
        assert_eq!(stream.consumed(), 1_000);
        estimate_control_variate(&mut stream, &params, 1_000, 0.05).unwrap();
        assert_eq!(stream.consumed(), 2_000);
        estimate_antithetic(&mut stream, &params, 500, 0.05).unwrap();
        assert_eq!(stream.consumed(), 2_500);
    }

    fn sample_cov(a: &[f64], b: &[f64]) -> f64 {
        let n = a.len() as f64;
        let ma = a.iter().sum::<f64>() / n;
        let mb = b.iter().sum::<f64>() / n;
        a.iter().zip(b).map(|(x, y)| (x - ma) * (y - mb)).sum::<f64>() / (n - 1.0)
    }
}

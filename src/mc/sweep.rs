// src/mc/sweep.rs
//! Control-variate effectiveness across strikes
//!
//! One fixed sample of terminal prices is reused for every strike, so the
//! per-strike correlations differ only through the payoff function and stay
//! directly comparable. For each strike the sweep reports the sample
//! correlation ρ between the discounted control e^(-rT) S_T and the
//! discounted payoff, and ρ². No coefficient is fitted.
//!
//! Correlation is expected to decay as the strike rises (the payoff becomes a
//! rarer, more nonlinear function of the control), but nothing here assumes
//! it.

use crate::error::{validation::*, McError, McResult};
use crate::mc::payoffs::{discounted_controls, EuropeanCall};
use crate::mc::sampler::SampleSet;
use crate::stats::PairedMoments;
use ndarray::ArrayView1;
use rayon::prelude::*;
use tracing::{debug, warn};

const SWEEP: &str = "Control Variate Strike Sweep";

/// Correlation diagnostic for one strike
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrikeCorrelation {
    pub strike: f64,
    pub rho: f64,
    pub rho_squared: f64,
}

/// Inclusive uniform grid of `count` strikes from `lower` to `upper`
pub fn uniform_strikes(lower: f64, upper: f64, count: usize) -> McResult<Vec<f64>> {
    validate_finite("lower", lower)?;
    validate_finite("upper", upper)?;
    if lower < 0.0 {
        return Err(McError::InvalidArgument {
            parameter: "lower".to_string(),
            value: lower,
            constraint: "must be non-negative (≥ 0)".to_string(),
        });
    }
    if upper <= lower {
        return Err(McError::InvalidArgument {
            parameter: "upper".to_string(),
            value: upper,
            constraint: format!("must exceed lower bound ({})", lower),
        });
    }
    if count < 2 {
        return Err(McError::InvalidArgument {
            parameter: "count".to_string(),
            value: count as f64,
            constraint: "grid needs at least 2 points".to_string(),
        });
    }

    let step = (upper - lower) / (count - 1) as f64;
    Ok((0..count)
        .map(|i| if i + 1 == count { upper } else { lower + step * i as f64 })
        .collect())
}

/// ρ and ρ² between discounted control and discounted payoff, per strike
///
/// Results come back in the order of `strikes`. Strikes are evaluated in
/// parallel; each is a pure function of `(strike, sample)`, so the output
/// matches a sequential run exactly.
///
/// A strike where every payoff is zero has no defined correlation and is
/// reported as ρ = 0.
///
/// # Errors
///
/// - `InvalidArgument` for a negative or non-finite strike, `t <= 0` or
///   non-finite `r`
/// - `InsufficientSamples` if the sample has fewer than two prices
/// - `DegenerateControl` if every simulated price is identical
/// - `NumericalInstability` if the control or a strike's payoff moments
///   overflow or pick up NaN from the sample
pub fn sweep_control_variate_correlation(
    sample: &SampleSet,
    r: f64,
    t: f64,
    strikes: &[f64],
) -> McResult<Vec<StrikeCorrelation>> {
    validate_finite("r", r)?;
    validate_positive("t", t)?;
    require_observations("strike sweep", sample.len(), 2)?;
    for &k in strikes {
        validate_finite("strike", k)?;
        if k < 0.0 {
            return Err(McError::InvalidArgument {
                parameter: "strike".to_string(),
                value: k,
                constraint: "must be non-negative (≥ 0)".to_string(),
            });
        }
    }

    let prices = sample.prices();
    let controls = discounted_controls(prices, r, t);
    let control_variance = crate::stats::sample_variance(controls.view())?;
    if !control_variance.is_finite() {
        return Err(McError::NumericalInstability {
            method: SWEEP.to_string(),
            reason: format!("Control variance is not finite: {}", control_variance),
        });
    }
    if control_variance == 0.0 {
        return Err(McError::DegenerateControl {
            variance: control_variance,
        });
    }

    debug!(
        strikes = strikes.len(),
        sample = sample.len(),
        "sweeping control variate correlation"
    );

    strikes
        .par_iter()
        .map(|&strike| strike_correlation(prices, controls.view(), r, t, strike))
        .collect()
}

fn strike_correlation(
    prices: ArrayView1<f64>,
    controls: ArrayView1<f64>,
    r: f64,
    t: f64,
    strike: f64,
) -> McResult<StrikeCorrelation> {
    let payoffs = EuropeanCall::new(strike).discounted_payoffs(prices, r, t);
    let moments = PairedMoments::new(controls, payoffs.view())?;
    if !moments.is_finite() {
        return Err(McError::NumericalInstability {
            method: SWEEP.to_string(),
            reason: format!(
                "Moments at strike {} are not finite: Var(payoff) = {}, Cov = {}",
                strike, moments.var_y, moments.covariance
            ),
        });
    }
    let rho = match moments.correlation() {
        Some(rho) => rho,
        None => {
            warn!(strike, "payoff sample is constant; reporting zero correlation");
            0.0
        }
    };
    Ok(StrikeCorrelation {
        strike,
        rho,
        rho_squared: rho * rho,
    })
}

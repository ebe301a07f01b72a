// src/analytics/bs_analytic.rs
//! Analytical Black-Scholes price for a European call
//!
//! # Mathematical Foundation
//!
//! Under the Black-Scholes model, the underlying asset follows:
//! ```text
//! dS_t = r S_t dt + σ S_t dW_t
//! ```
//!
//! The risk-neutral pricing formula gives:
//! ```text
//! V(S,t) = e^(-r(T-t)) * E^Q[payoff(S_T) | S_t = S]
//! ```
//!
//! For the European call this has a closed form in the cumulative normal
//! distribution function Φ(x). It is the reference oracle the Monte Carlo
//! estimators are checked against.

use crate::error::{validation::*, McResult};
use crate::math_utils::norm_cdf;
use crate::models::gbm::ModelParameters;

/// d₁ and d₂ of the Black-Scholes formula
fn d1_d2(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> (f64, f64) {
    let vol_sqrt_t = sigma * t.sqrt();
    let d1 = ((s / k).ln() + (r + 0.5 * sigma * sigma) * t) / vol_sqrt_t;
    (d1, d1 - vol_sqrt_t)
}

/// Black-Scholes European call option price
///
/// # Formula
/// ```text
/// C(S,K,r,σ,T) = S*Φ(d₁) - K*e^(-rT)*Φ(d₂)
/// ```
///
/// Where:
/// ```text
/// d₁ = [ln(S/K) + (r + σ²/2)T] / (σ√T)
/// d₂ = d₁ - σ√T
/// ```
///
/// # Parameters
/// - `s0`: Current stock price
/// - `k`: Strike price
/// - `r`: Risk-free rate
/// - `t`: Time to expiration
/// - `sigma`: Volatility
///
/// # Errors
///
/// `InvalidArgument` when `sigma <= 0` or `t <= 0` (d₁ undefined), or when
/// `s0`/`k` are not positive.
pub fn black_scholes_call(s0: f64, k: f64, r: f64, t: f64, sigma: f64) -> McResult<f64> {
    validate_positive("s0", s0)?;
    validate_positive("k", k)?;
    validate_positive("t", t)?;
    validate_positive("sigma", sigma)?;
    validate_finite("r", r)?;

    let (d1, d2) = d1_d2(s0, k, r, sigma, t);
    let price = s0 * norm_cdf(d1) - k * (-r * t).exp() * norm_cdf(d2);
    // Φ rounding can leave a deep OTM price a hair below zero
    Ok(price.max(0.0))
}

/// Analytical call price for a full parameter set
pub fn bs_call_price(params: &ModelParameters) -> McResult<f64> {
    black_scholes_call(params.s0, params.k, params.r, params.t, params.sigma)
}

// src/mc/payoffs.rs
//! European Call Payoff
//!
//! # Mathematical Definitions
//!
//! - **Payoff**: max(S_T - K, 0), the right to buy at strike K
//! - **Discounted payoff**: e^(-rT) * max(S_T - K, 0)
//! - **Discounted control**: e^(-rT) * S_T, whose risk-neutral mean is S_0
//!
//! All functions are pure and map a sample element-wise, preserving length
//! and order.

use ndarray::{Array1, ArrayView1};

/// max(S - K, 0)
#[inline]
pub fn payoff(s: f64, k: f64) -> f64 {
    (s - k).max(0.0)
}

/// e^(-rT) * max(S - K, 0)
#[inline]
pub fn discounted(s: f64, k: f64, r: f64, t: f64) -> f64 {
    (-r * t).exp() * payoff(s, k)
}

/// European call option on the terminal price
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EuropeanCall {
    pub k: f64,
}

impl EuropeanCall {
    pub fn new(k: f64) -> Self {
        EuropeanCall { k }
    }

    /// Discounted payoffs over a whole sample
    pub fn discounted_payoffs(&self, prices: ArrayView1<f64>, r: f64, t: f64) -> Array1<f64> {
        let discount = (-r * t).exp();
        let k = self.k;
        prices.mapv(|s| discount * payoff(s, k))
    }
}

/// Discounted terminal prices e^(-rT) * S_T, the control variable
pub fn discounted_controls(prices: ArrayView1<f64>, r: f64, t: f64) -> Array1<f64> {
    let discount = (-r * t).exp();
    prices.mapv(|s| discount * s)
}

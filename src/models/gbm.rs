// src/models/gbm.rs
//! Geometric Brownian Motion under the risk-neutral measure
//!
//! ```text
//! dS_t = r S_t dt + σ S_t dW_t
//! S_T  = S_0 * exp((r - σ²/2)T + σ√T * Z),   Z ~ N(0,1)
//! ```
//!
//! The terminal law is known in closed form, so a single normal draw per
//! observation samples S_T exactly (no discretization error).

use crate::error::{validation::*, McResult};

/// Black-Scholes model and contract inputs for one pricing call
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModelParameters {
    pub s0: f64,    // Initial stock price
    pub k: f64,     // Strike
    pub t: f64,     // Maturity in years
    pub r: f64,     // Risk-free rate
    pub sigma: f64, // Volatility
}

impl ModelParameters {
    pub fn new(s0: f64, k: f64, t: f64, r: f64, sigma: f64) -> McResult<Self> {
        let params = Self { s0, k, t, r, sigma };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> McResult<()> {
        validate_positive("s0", self.s0)?;
        validate_positive("k", self.k)?;
        validate_positive("t", self.t)?;
        validate_finite("r", self.r)?;
        validate_positive("sigma", self.sigma)?;
        validate_finite("s0", self.s0)?;
        validate_finite("k", self.k)?;
        validate_finite("t", self.t)?;
        validate_finite("sigma", self.sigma)?;
        Ok(())
    }
}

impl Default for ModelParameters {
    fn default() -> Self {
        ModelParameters {
            s0: 50.0,
            k: 50.0,
            t: 0.25,
            r: 0.05,
            sigma: 0.3,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Gbm {
    pub s0: f64,
    pub r: f64,
    pub sigma: f64,
}

impl Gbm {
    pub fn new(s0: f64, r: f64, sigma: f64) -> Self {
        Gbm { s0, r, sigma }
    }

    /// Validate the diffusion inputs together with a horizon `t`
    pub fn validate(&self, t: f64) -> McResult<()> {
        validate_positive("s0", self.s0)?;
        validate_finite("s0", self.s0)?;
        validate_finite("r", self.r)?;
        validate_positive("sigma", self.sigma)?;
        validate_finite("sigma", self.sigma)?;
        validate_positive("t", t)?;
        validate_finite("t", t)?;
        Ok(())
    }

    /// (r - σ²/2)T and σ√T, the two coefficients of the exact terminal map
    pub fn terminal_coefficients(&self, t: f64) -> (f64, f64) {
        (
            (self.r - 0.5 * self.sigma * self.sigma) * t,
            self.sigma * t.sqrt(),
        )
    }

    /// Exact terminal price for one standard-normal draw
    pub fn terminal_price(&self, t: f64, normal_draw: f64) -> f64 {
        let (drift, vol) = self.terminal_coefficients(t);
        self.s0 * (drift + vol * normal_draw).exp()
    }
}

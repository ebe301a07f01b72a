// src/math_utils.rs
use statrs::function::erf;
use std::f64::consts::SQRT_2;

pub fn norm_cdf(x: f64) -> f64 {
    0.5 * (1.0 + erf::erf(x / SQRT_2))
}

/// Standard normal quantile Φ⁻¹(p) for p in (0, 1)
pub fn norm_ppf(p: f64) -> f64 {
    SQRT_2 * erf::erf_inv(2.0 * p - 1.0)
}

/// Upper quantile z_{1-ε/2} used for a two-sided (1-ε) interval
pub fn two_sided_z(epsilon: f64) -> f64 {
    // Φ⁻¹(1 - ε/2) = √2 · erf⁻¹(1 - ε)
    SQRT_2 * erf::erf_inv(1.0 - epsilon)
}

pub struct Timer {
    start_time: std::time::Instant,
}

impl Timer {
    pub fn new() -> Timer {
        Timer {
            start_time: std::time::Instant::now(),
        }
    }

    pub fn start(&mut self) {
        self.start_time = std::time::Instant::now();
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64() * 1000.0
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

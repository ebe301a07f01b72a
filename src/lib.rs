//! # fast-mc: Monte Carlo Pricing with Variance Reduction
//!
//! Prices a European call under Black-Scholes by Monte Carlo and compares plain
//! simulation with two variance-reduction estimators.
//!
//! ## Key Features
//!
//! - **Exact GBM sampling**: terminal prices drawn from the closed-form lognormal law
//! - **Three estimators**: plain, control variate (optimal b*), antithetic variates
//! - **Confidence intervals**: standard error and two-sided Gaussian intervals
//! - **Strike sweep**: control-variate ρ² across strikes on one fixed sample
//! - **Reproducible**: every sampling call takes an explicit seeded stream
//!
//! ## Quick Start
//!
//! ```rust
//! use fast_mc::analytics::bs_analytic::black_scholes_call;
//! use fast_mc::mc::estimators::{estimate_control_variate, estimate_plain};
//! use fast_mc::models::gbm::ModelParameters;
//! use fast_mc::rng::RandomStream;
//!
//! let params = ModelParameters::new(50.0, 50.0, 0.25, 0.05, 0.3).expect("Valid parameters");
//! let mut stream = RandomStream::new(42);
//!
//! let plain = estimate_plain(&mut stream, &params, 20_000, 0.05).expect("Valid inputs");
//! let cv = estimate_control_variate(&mut stream, &params, 20_000, 0.05).expect("Valid inputs");
//! let exact = black_scholes_call(50.0, 50.0, 0.05, 0.25, 0.3).expect("Valid inputs");
//!
//! println!("exact {:.4}  plain {:.4} ± {:.4}  cv {:.4} ± {:.4}",
//!     exact, plain.price, plain.stderr, cv.price, cv.stderr);
//! assert!(cv.stderr < plain.stderr);
//! ```
//!
//! ## Pipeline
//!
//! ```text
//! RandomStream → terminal prices → discounted payoffs → estimator → EstimationResult
//! ```
//!
//! The stream only moves forward, so estimators run in sequence against one
//! stream read disjoint slices of it. Fix the call order when comparing.

// Module declarations
pub mod analytics;
pub mod error;
pub mod math_utils;
pub mod mc;
pub mod models;
pub mod rng;
pub mod stats;

// Re-export commonly used types for convenience
pub use analytics::bs_analytic::black_scholes_call;
pub use error::{McError, McResult};
pub use mc::estimators::{
    estimate_antithetic, estimate_control_variate, estimate_plain, Diagnostics, EstimationResult,
};
pub use mc::sampler::{
    sample_terminal_prices, sample_terminal_prices_antithetic, AntitheticSampleSet, SampleSet,
};
pub use mc::sweep::{sweep_control_variate_correlation, StrikeCorrelation};
pub use models::gbm::ModelParameters;
pub use rng::RandomStream;

// src/mc/sampler.rs
//! Terminal price sampling under risk-neutral GBM
//!
//! Two variants:
//! 1. **Plain**: `n` draws → `n` terminal prices
//! 2. **Antithetic**: `half_n` draws `x_i` → two index-aligned sequences from
//!    `x_i` and `-x_i`, plus their concatenation (original first)
//!
//! The antithetic pair shares one index per draw. Nothing downstream may
//! reorder the two halves independently, because the paired covariance
//! diagnostic reads them index by index.

use crate::error::McResult;
use crate::models::gbm::Gbm;
use crate::rng::RandomStream;
use ndarray::{Array1, ArrayView1};
use tracing::debug;

/// Ordered sequence of simulated terminal stock prices
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSet {
    prices: Array1<f64>,
}

impl SampleSet {
    pub fn from_prices(prices: Array1<f64>) -> Self {
        SampleSet { prices }
    }

    pub fn prices(&self) -> ArrayView1<'_, f64> {
        self.prices.view()
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

impl From<Vec<f64>> for SampleSet {
    fn from(prices: Vec<f64>) -> Self {
        SampleSet::from_prices(Array1::from(prices))
    }
}

/// Antithetic sample: `original[i]` and `antithetic[i]` come from `x_i` and `-x_i`
#[derive(Debug, Clone, PartialEq)]
pub struct AntitheticSampleSet {
    pub original: SampleSet,
    pub antithetic: SampleSet,
    pub combined: SampleSet,
}

impl AntitheticSampleSet {
    fn from_pair(original: Array1<f64>, antithetic: Array1<f64>) -> Self {
        let combined: Array1<f64> = original.iter().chain(antithetic.iter()).copied().collect();
        AntitheticSampleSet {
            original: SampleSet::from_prices(original),
            antithetic: SampleSet::from_prices(antithetic),
            combined: SampleSet::from_prices(combined),
        }
    }

    /// Number of draws consumed, i.e. the length of each half
    pub fn half_n(&self) -> usize {
        self.original.len()
    }

    /// (original, antithetic, combined)
    pub fn into_parts(self) -> (SampleSet, SampleSet, SampleSet) {
        (self.original, self.antithetic, self.combined)
    }
}

/// Map standard-normal draws to exact terminal prices
pub fn terminal_prices_from_draws(gbm: &Gbm, t: f64, draws: ArrayView1<f64>) -> Array1<f64> {
    let (drift, vol) = gbm.terminal_coefficients(t);
    let s0 = gbm.s0;
    draws.mapv(|z| s0 * (drift + vol * z).exp())
}

/// Sample `n` terminal prices S_i = S0 · exp((r − σ²/2)T + σ√T · x_i)
///
/// Advances `stream` by exactly `n` draws.
pub fn sample_terminal_prices(
    stream: &mut RandomStream,
    s0: f64,
    t: f64,
    r: f64,
    sigma: f64,
    n: usize,
) -> McResult<SampleSet> {
    let gbm = Gbm::new(s0, r, sigma);
    gbm.validate(t)?;
    let draws = stream.draw(n)?;
    debug!(n, seed = stream.seed(), "sampled terminal prices");
    Ok(SampleSet::from_prices(terminal_prices_from_draws(
        &gbm,
        t,
        draws.view(),
    )))
}

/// Sample `half_n` antithetic pairs
///
/// Advances `stream` by exactly `half_n` draws; the negated draws are not
/// taken from the stream.
pub fn sample_terminal_prices_antithetic(
    stream: &mut RandomStream,
    s0: f64,
    t: f64,
    r: f64,
    sigma: f64,
    half_n: usize,
) -> McResult<AntitheticSampleSet> {
    let gbm = Gbm::new(s0, r, sigma);
    gbm.validate(t)?;
    let draws = stream.draw(half_n)?;
    let negated = draws.mapv(|z| -z);
    debug!(half_n, seed = stream.seed(), "sampled antithetic terminal prices");
    Ok(AntitheticSampleSet::from_pair(
        terminal_prices_from_draws(&gbm, t, draws.view()),
        terminal_prices_from_draws(&gbm, t, negated.view()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::McError;
    use approx::assert_relative_eq;

    #[test]
    fn test_plain_sample_matches_manual_map() {
        let mut stream = RandomStream::new(42);
        let sample = sample_terminal_prices(&mut stream, 50.0, 0.25, 0.05, 0.3, 100).unwrap();

        let mut replay = RandomStream::new(42);
        let draws = replay.draw(100).unwrap();
        let gbm = Gbm::new(50.0, 0.05, 0.3);

        assert_eq!(sample.len(), 100);
        assert!(!sample.is_empty());
        for (s, z) in sample.prices().iter().zip(draws.iter()) {
            assert_eq!(*s, gbm.terminal_price(0.25, *z));
        }
        assert_eq!(stream.consumed(), 100);
    }

    #[test]
    fn test_antithetic_pairs_are_index_aligned() {
        let mut stream = RandomStream::new(3);
        let set = sample_terminal_prices_antithetic(&mut stream, 100.0, 1.0, 0.05, 0.2, 50).unwrap();
        let gbm = Gbm::new(100.0, 0.05, 0.2);
        let (drift, _) = gbm.terminal_coefficients(1.0);

        assert_eq!(set.half_n(), 50);
        assert_eq!(set.combined.len(), 100);
        assert_eq!(stream.consumed(), 50);

        // S¹·S² = S0² · exp(2·drift) for every pair because the draws cancel
        let expected = 100.0 * 100.0 * (2.0 * drift).exp();
        for (a, b) in set.original.prices().iter().zip(set.antithetic.prices().iter()) {
            assert_relative_eq!(a * b, expected, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_combined_is_original_then_antithetic() {
        let mut stream = RandomStream::new(9);
        let (original, antithetic, combined) =
            sample_terminal_prices_antithetic(&mut stream, 50.0, 0.25, 0.05, 0.3, 10)
                .unwrap()
                .into_parts();

        let c = combined.prices();
        for i in 0..10 {
            assert_eq!(c[i], original.prices()[i]);
            assert_eq!(c[10 + i], antithetic.prices()[i]);
        }
    }

    #[test]
    fn test_invalid_inputs_do_not_advance_stream() {
        let mut stream = RandomStream::new(1);
        assert!(matches!(
            sample_terminal_prices(&mut stream, 50.0, 0.25, 0.05, 0.0, 10),
            Err(McError::InvalidArgument { .. })
        ));
        assert!(sample_terminal_prices(&mut stream, 50.0, -1.0, 0.05, 0.3, 10).is_err());
        assert!(sample_terminal_prices_antithetic(&mut stream, 50.0, 0.25, 0.05, 0.3, 0).is_err());
        assert_eq!(stream.consumed(), 0);
    }
}

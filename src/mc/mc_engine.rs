// src/mc/mc_engine.rs
use crate::analytics::bs_analytic;
use crate::error::{validation::*, McError, McResult};
use crate::mc::estimators::{
    estimate_antithetic, estimate_control_variate, estimate_plain, EstimationResult,
};
use crate::models::gbm::ModelParameters;
use crate::rng::RandomStream;
use bitflags::bitflags;
use std::fmt;
use tracing::info;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct EstimatorSet: u32 {
        const NONE            = 0;
        const PLAIN           = 1 << 0;
        const CONTROL_VARIATE = 1 << 1;
        const ANTITHETIC      = 1 << 2;
        const ALL = Self::PLAIN.bits() | Self::CONTROL_VARIATE.bits() | Self::ANTITHETIC.bits();
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EstimatorKind {
    Plain,
    ControlVariate,
    Antithetic,
}

impl fmt::Display for EstimatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EstimatorKind::Plain => write!(f, "Plain"),
            EstimatorKind::ControlVariate => write!(f, "Control Variate"),
            EstimatorKind::Antithetic => write!(f, "Antithetic"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct McConfig {
    /// Total draw count per estimator; the antithetic run uses `paths / 2`
    /// pairs, so `paths` must be even when `ANTITHETIC` is selected
    pub paths: usize,
    pub seed: u64,
    /// Complement of the two-sided confidence level (0.05 → 95%)
    pub epsilon: f64,
    pub estimators: EstimatorSet,
}

impl McConfig {
    /// Validate the Monte Carlo configuration
    pub fn validate(&self) -> McResult<()> {
        validate_sample_size("paths", self.paths)?;
        validate_open_unit("epsilon", self.epsilon)?;
        if self.estimators.contains(EstimatorSet::ANTITHETIC) {
            // two pairs minimum for the paired covariance
            require_observations("antithetic pairs", self.paths / 2, 2)?;
            if self.paths % 2 != 0 {
                return Err(McError::InvalidArgument {
                    parameter: "paths".to_string(),
                    value: self.paths as f64,
                    constraint: "must be even when the antithetic estimator is selected".to_string(),
                });
            }
        } else {
            require_observations("sample variance", self.paths, 2)?;
        }
        if self.estimators.is_empty() {
            return Err(McError::InvalidArgument {
                parameter: "estimators".to_string(),
                value: 0.0,
                constraint: "select at least one estimator".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for McConfig {
    fn default() -> Self {
        McConfig {
            paths: 200_000,
            seed: 12345,
            epsilon: 0.05,
            estimators: EstimatorSet::ALL,
        }
    }
}

/// One estimator's outcome within a comparison run
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EstimatorRun {
    pub kind: EstimatorKind,
    pub result: EstimationResult,
    /// |price - analytical|
    pub abs_error: f64,
}

/// Analytical price plus the selected estimators, in run order
#[derive(Clone, Debug, PartialEq)]
pub struct Comparison {
    pub analytic_price: f64,
    pub runs: Vec<EstimatorRun>,
}

impl Comparison {
    pub fn get(&self, kind: EstimatorKind) -> Option<&EstimatorRun> {
        self.runs.iter().find(|run| run.kind == kind)
    }

    /// (stderr_plain / stderr_kind)², `None` without a plain run or when the
    /// ratio is undefined
    pub fn variance_reduction(&self, kind: EstimatorKind) -> Option<f64> {
        let plain = self.get(EstimatorKind::Plain)?.result.stderr;
        let other = self.get(kind)?.result.stderr;
        if other > 0.0 {
            Some((plain / other).powi(2))
        } else {
            None
        }
    }
}

/// Price the call analytically and with each selected estimator
///
/// A single stream seeded with `cfg.seed` is shared and the estimators always
/// run in the order plain → control variate → antithetic, so each consumes a
/// disjoint, reproducible slice of the stream. Every estimator uses the same
/// total draw count: `paths` for plain and control variate, `paths / 2`
/// antithetic pairs.
pub fn compare_estimators(params: &ModelParameters, cfg: &McConfig) -> McResult<Comparison> {
    params.validate()?;
    cfg.validate()?;

    let analytic_price = bs_analytic::bs_call_price(params)?;
    let mut stream = RandomStream::new(cfg.seed);
    let mut runs = Vec::with_capacity(3);

    let order = [
        (EstimatorSet::PLAIN, EstimatorKind::Plain),
        (EstimatorSet::CONTROL_VARIATE, EstimatorKind::ControlVariate),
        (EstimatorSet::ANTITHETIC, EstimatorKind::Antithetic),
    ];

    for (flag, kind) in order {
        if !cfg.estimators.contains(flag) {
            continue;
        }
        let result = match kind {
            EstimatorKind::Plain => estimate_plain(&mut stream, params, cfg.paths, cfg.epsilon)?,
            EstimatorKind::ControlVariate => {
                estimate_control_variate(&mut stream, params, cfg.paths, cfg.epsilon)?
            }
            EstimatorKind::Antithetic => {
                estimate_antithetic(&mut stream, params, cfg.paths / 2, cfg.epsilon)?
            }
        };
        let abs_error = (result.price - analytic_price).abs();
        info!(
            estimator = %kind,
            price = result.price,
            stderr = result.stderr,
            abs_error,
            "estimator finished"
        );
        runs.push(EstimatorRun {
            kind,
            result,
            abs_error,
        });
    }

    Ok(Comparison {
        analytic_price,
        runs,
    })
}

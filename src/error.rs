// src/error.rs
use thiserror::Error;

/// Error kinds raised by the fast-mc pricing pipeline
///
/// Every failure is detected before or immediately after sampling and is
/// reported as-is; no partial `EstimationResult` ever escapes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum McError {
    /// Invalid parameter values (non-positive T, sigma, S0, K or sample size,
    /// epsilon outside (0, 1), non-finite inputs)
    #[error("Invalid parameter '{parameter}' = {value}: {constraint}")]
    InvalidArgument {
        parameter: String,
        value: f64,
        constraint: String,
    },

    /// Too few observations to form an unbiased sample variance
    #[error("Insufficient samples for {statistic}: got {available}, need at least {required}")]
    InsufficientSamples {
        statistic: String,
        required: usize,
        available: usize,
    },

    /// The control variable has zero sample variance so b* is undefined
    #[error("Degenerate control variate: sample variance {variance} leaves the optimal coefficient undefined")]
    DegenerateControl { variance: f64 },

    /// Non-finite coefficient, price or standard error
    #[error("Numerical instability in {method}: {reason}")]
    NumericalInstability { method: String, reason: String },
}

/// Result type alias for fast-mc operations
pub type McResult<T> = Result<T, McError>;

/// Validation utilities
pub mod validation {
    use super::{McError, McResult};

    /// Validate that a parameter is positive
    pub fn validate_positive(name: &str, value: f64) -> McResult<()> {
        // NaN fails the comparison as well
        if !(value > 0.0) {
            Err(McError::InvalidArgument {
                parameter: name.to_string(),
                value,
                constraint: "must be positive (> 0)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a value is finite and not NaN
    pub fn validate_finite(name: &str, value: f64) -> McResult<()> {
        if !value.is_finite() {
            Err(McError::InvalidArgument {
                parameter: name.to_string(),
                value,
                constraint: "must be finite (not NaN or infinite)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a parameter lies strictly inside (0, 1)
    pub fn validate_open_unit(name: &str, value: f64) -> McResult<()> {
        if !(value > 0.0 && value < 1.0) {
            Err(McError::InvalidArgument {
                parameter: name.to_string(),
                value,
                constraint: "must be in the open interval (0, 1)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate a requested sample size
    pub fn validate_sample_size(name: &str, n: usize) -> McResult<()> {
        if n == 0 {
            Err(McError::InvalidArgument {
                parameter: name.to_string(),
                value: 0.0,
                constraint: "must be greater than 0".to_string(),
            })
        } else if n > 1_000_000_000 {
            Err(McError::InvalidArgument {
                parameter: name.to_string(),
                value: n as f64,
                constraint: "exceeds maximum allowed (1 billion)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Require at least `required` observations for `statistic`
    pub fn require_observations(statistic: &str, available: usize, required: usize) -> McResult<()> {
        if available < required {
            Err(McError::InsufficientSamples {
                statistic: statistic.to_string(),
                required,
                available,
            })
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::validation::*;
    use super::*;

    #[test]
    fn test_validate_positive() {
        assert!(validate_positive("sigma", 0.2).is_ok());
        assert!(validate_positive("sigma", 0.0).is_err());
        assert!(validate_positive("sigma", -0.1).is_err());
        assert!(validate_positive("sigma", f64::NAN).is_err());
    }

    #[test]
    fn test_validate_open_unit() {
        assert!(validate_open_unit("epsilon", 0.05).is_ok());
        assert!(validate_open_unit("epsilon", 0.0).is_err());
        assert!(validate_open_unit("epsilon", 1.0).is_err());
        assert!(validate_open_unit("epsilon", -0.5).is_err());
        assert!(validate_open_unit("epsilon", f64::NAN).is_err());
    }

    #[test]
    fn test_validate_finite() {
        assert!(validate_finite("value", 1.0).is_ok());
        assert!(validate_finite("value", f64::NAN).is_err());
        assert!(validate_finite("value", f64::INFINITY).is_err());
        assert!(validate_finite("value", f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_validate_sample_size() {
        assert!(validate_sample_size("n", 1).is_ok());
        assert!(matches!(
            validate_sample_size("n", 0),
            Err(McError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_require_observations() {
        assert!(require_observations("variance", 2, 2).is_ok());
        assert_eq!(
            require_observations("variance", 1, 2),
            Err(McError::InsufficientSamples {
                statistic: "variance".to_string(),
                required: 2,
                available: 1,
            })
        );
    }

    #[test]
    fn test_error_display() {
        let error = McError::InvalidArgument {
            parameter: "sigma".to_string(),
            value: -0.1,
            constraint: "must be positive".to_string(),
        };

        let display = format!("{}", error);
        assert!(display.contains("sigma"));
        assert!(display.contains("-0.1"));
        assert!(display.contains("positive"));
    }

    #[test]
    fn test_degenerate_control_display() {
        let error = McError::DegenerateControl { variance: 0.0 };
        let display = format!("{}", error);
        assert!(display.contains("Degenerate control"));
    }
}

#![forbid(unsafe_code)]

//! Configuration errors.
//!
//! Effects themselves never fail at runtime; only configuration supplied by
//! the host can be rejected.

use std::fmt;

/// Why an effect configuration was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A sampling range is inverted, non-finite, or outside its domain.
    InvalidRange {
        field: &'static str,
        min: f64,
        max: f64,
    },
    /// The confetti palette has no colors.
    EmptyPalette,
    /// A duration that must be positive is zero.
    ZeroDuration(&'static str),
    /// The configuration text could not be parsed.
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRange { field, min, max } => {
                write!(f, "invalid range for {field}: [{min}, {max})")
            }
            Self::EmptyPalette => f.write_str("confetti palette must contain at least one color"),
            Self::ZeroDuration(field) => write!(f, "{field} must be greater than zero"),
            Self::Parse(msg) => write!(f, "failed to parse configuration: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_field() {
        let err = ConfigError::InvalidRange {
            field: "particles.radius",
            min: 3.0,
            max: 1.0,
        };
        assert_eq!(err.to_string(), "invalid range for particles.radius: [3, 1)");
        assert_eq!(
            ConfigError::ZeroDuration("counter.duration_ms").to_string(),
            "counter.duration_ms must be greater than zero"
        );
    }
}

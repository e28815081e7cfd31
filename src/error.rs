//! Arena-specific error types.
//!
//! The per-frame simulation never fails: pool queries on empty slots return
//! neutral values and fire requests on cooldown are ordinary flow control.
//! Everything in this module is raised while loading and validating the
//! configuration, before the first frame runs.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use grapple_arena::error::ArenaResult;
//!
//! fn startup() -> ArenaResult<()> {
//!     let config = ArenaConfig::load("assets/arena.toml")?;
//!     config.validate()?;
//!     Ok(())
//! }
//! ```

use std::fmt;

/// Top-level error enum for configuration and content problems.
#[derive(Debug)]
pub enum ArenaError {
    /// The config file exists but could not be read.
    ConfigIo {
        path: String,
        source: std::io::Error,
    },

    /// The config file is not valid TOML, or contains a key outside the
    /// closed set of tunables.
    ConfigParse {
        path: String,
        message: String,
    },

    /// A named constant lookup used a name that is not a tunable.
    UnknownConstant {
        name: String,
    },

    /// A tunable is outside its safe operating range.
    UnsafeConstant {
        /// Name of the constant (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f32,
        /// Human-readable description of the safe range.
        safe_range: &'static str,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArenaError::ConfigIo { path, source } => {
                write!(f, "failed to read config '{}': {}", path, source)
            }
            ArenaError::ConfigParse { path, message } => {
                write!(f, "failed to parse config '{}': {}", path, message)
            }
            ArenaError::UnknownConstant { name } => {
                write!(f, "unknown constant '{}'", name)
            }
            ArenaError::UnsafeConstant {
                name,
                value,
                safe_range,
            } => write!(
                f,
                "constant '{}' = {} is outside safe range {}",
                name, value, safe_range
            ),
        }
    }
}

impl std::error::Error for ArenaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ArenaError::ConfigIo { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience alias: a `Result` using `ArenaError` as the error type.
pub type ArenaResult<T> = Result<T, ArenaError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Returns an error if `value` is negative or not finite.
pub fn validate_non_negative(name: &'static str, value: f32) -> ArenaResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ArenaError::UnsafeConstant {
            name,
            value,
            safe_range: "[0.0, ∞)",
        })
    }
}

/// Returns an error if `value` is not strictly positive.
///
/// Used for divisors and per-frame steps that would stall a countdown at zero.
pub fn validate_positive(name: &'static str, value: f32) -> ArenaResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ArenaError::UnsafeConstant {
            name,
            value,
            safe_range: "(0.0, ∞)",
        })
    }
}

/// Returns an error if the pitch limit does not leave the camera below vertical.
pub fn validate_max_pitch(value: f32) -> ArenaResult<()> {
    if value > 0.0 && value < std::f32::consts::FRAC_PI_2 {
        Ok(())
    } else {
        Err(ArenaError::UnsafeConstant {
            name: "max_pitch",
            value,
            safe_range: "(0.0, π/2)",
        })
    }
}

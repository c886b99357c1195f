/*
 * Error Module
 *
 * Configuration errors reported when bounds or steering constants are
 * rejected. The simulation tick itself never fails.
 */

use std::fmt;

/// Errors raised while configuring a flock.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// `min >= max` (or a non-finite value) on one axis of the bounds.
    InvalidBounds { axis: char, min: f32, max: f32 },
    /// A steering constant outside its valid range.
    InvalidParam { name: &'static str, value: f32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidBounds { axis, min, max } => write!(
                f,
                "Invalid bounds on {} axis: min ({}) must be finite and strictly less than max ({})",
                axis, min, max
            ),
            ConfigError::InvalidParam { name, value } => {
                write!(f, "Invalid value for {}: {}", name, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

//! Error type shared by the filter, compass and primitives

use thiserror::Error;

/// Errors reported by the AHRS primitives and filter
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum Error {
    /// A vector or quaternion was too close to zero to normalize
    ///
    /// The filter treats this as a rejected update and leaves its state
    /// untouched; the compass swallows it and returns a neutral orientation.
    #[error("cannot normalize input with norm {norm:e} (minimum {min:e})", min = crate::math::NORM_EPSILON)]
    DegenerateInput {
        /// Norm of the rejected input
        norm: f64,
    },

    /// A filter setting was out of range at construction time
    #[error("invalid configuration: {parameter} = {value}")]
    Configuration {
        /// Name of the offending setting
        parameter: &'static str,
        /// Value that was supplied
        value: f64,
    },

    /// The time step passed to an update was negative or not finite
    #[error("invalid time step: {dt}")]
    InvalidTimeStep {
        /// Rejected time step in seconds
        dt: f64,
    },
}

impl Error {
    /// Whether this error came from normalizing a near-zero input
    pub fn is_degenerate(&self) -> bool {
        matches!(self, Error::DegenerateInput { .. })
    }
}

/// Result alias used throughout the crate
pub type Result<T> = core::result::Result<T, Error>;

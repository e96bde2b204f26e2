//! Gyroscope bias estimation for the AHRS filter

use nalgebra::{Quaternion, UnitQuaternion, Vector3};

use crate::types::{BiasSettings, GyroUnits};

/// Gyroscope bias estimator
///
/// First-order estimator nested inside [`AhrsFilter`](crate::AhrsFilter). Every
/// cycle it integrates the angular-rate error implied by the filter's
/// normalized gradient step, `2 q* ⊗ ∇f`, scaled by the drift-rate gain `ζ`.
/// The estimate is kept in rad/s regardless of the filter's gyro units.
#[derive(Debug, Clone, Copy)]
pub(crate) struct GyroBias {
    /// Bias gain ζ in rad/s²
    zeta: f64,
    /// Current bias estimate in rad/s
    bias: Vector3<f64>,
}

impl GyroBias {
    /// Create an estimator with a zero bias
    ///
    /// `ζ = √(3/4) · drift_rate`, with the drift rate converted to rad/s².
    pub fn new(settings: BiasSettings, units: GyroUnits) -> Self {
        let zeta = (0.75f64).sqrt() * settings.drift_rate * units.to_radians_factor();
        Self {
            zeta,
            bias: Vector3::zeros(),
        }
    }

    /// Advance the estimate by one filter cycle
    ///
    /// `step` must be the same normalized gradient the filter applies as its
    /// correction this cycle (zero when the correction degenerated).
    pub fn update(&mut self, quaternion: &UnitQuaternion<f64>, step: &Quaternion<f64>, dt: f64) {
        let rate_error = quaternion.quaternion().conjugate() * step * 2.0;
        self.bias += rate_error.imag() * (self.zeta * dt);
    }

    /// Subtract the current estimate from a gyroscope reading in rad/s
    pub fn correct(&self, gyroscope: Vector3<f64>) -> Vector3<f64> {
        gyroscope - self.bias
    }

    /// Current bias estimate in rad/s
    pub fn bias(&self) -> Vector3<f64> {
        self.bias
    }

    /// Clear the bias estimate
    pub fn reset(&mut self) {
        self.bias = Vector3::zeros();
    }
}

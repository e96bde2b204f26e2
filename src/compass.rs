//! Tilt-compensated compass
//!
//! Stateless roll/pitch/heading from a single accelerometer and magnetometer
//! sample. The compass is best-effort: a degenerate sample yields a neutral
//! orientation instead of an error, unlike [`AhrsFilter`](crate::AhrsFilter)
//! which refuses the update.

use core::f64::consts::FRAC_PI_2;

use nalgebra::{UnitQuaternion, Vector3};

use crate::error::Result;
use crate::math::{RAD_TO_DEG, Vector3Ext, clamped_asin, wrap_360, wrap_two_pi};
use crate::types::{AngleUnits, EulerAngles};

/// Orientation estimated from one sample, angles in radians
///
/// Roll and pitch follow the gravity vector; heading is clockwise from
/// magnetic north and always in `[0, 2π)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Attitude {
    /// Rotation about the sensor X axis in radians
    pub roll: f64,
    /// Rotation about the sensor Y axis in radians
    pub pitch: f64,
    /// Clockwise heading from magnetic north in radians
    pub heading: f64,
}

impl Attitude {
    /// Angles in radians, heading in `[0, 2π)`
    pub fn to_radians(&self) -> EulerAngles {
        EulerAngles {
            roll: self.roll,
            pitch: self.pitch,
            heading: self.heading,
        }
    }

    /// Angles in degrees, heading in `[0, 360)`
    pub fn to_degrees(&self) -> EulerAngles {
        EulerAngles {
            roll: self.roll * RAD_TO_DEG,
            pitch: self.pitch * RAD_TO_DEG,
            heading: wrap_360(self.heading * RAD_TO_DEG),
        }
    }

    /// Sensor-to-earth rotation matching this attitude
    ///
    /// Uses the same frame as the filter quaternion (X = magnetic north,
    /// Z = up), so a converged filter and the compass agree.
    pub fn to_quaternion(&self) -> UnitQuaternion<f64> {
        UnitQuaternion::from_euler_angles(self.roll, self.pitch, -self.heading)
    }

    /// Express this attitude in the requested representation
    pub fn in_units(&self, units: AngleUnits) -> Orientation {
        match units {
            AngleUnits::Degrees => Orientation::Euler(self.to_degrees()),
            AngleUnits::Radians => Orientation::Euler(self.to_radians()),
            AngleUnits::Quaternion => Orientation::Quaternion(self.to_quaternion()),
        }
    }
}

/// Compass output in the representation chosen by [`AngleUnits`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Orientation {
    /// Roll, pitch and heading in degrees or radians
    Euler(EulerAngles),
    /// Unit quaternion
    Quaternion(UnitQuaternion<f64>),
}

impl Orientation {
    /// The Euler angles, if this is an Euler orientation
    pub fn euler(&self) -> Option<EulerAngles> {
        match self {
            Orientation::Euler(angles) => Some(*angles),
            Orientation::Quaternion(_) => None,
        }
    }

    /// The quaternion, if this is a quaternion orientation
    pub fn quaternion(&self) -> Option<UnitQuaternion<f64>> {
        match self {
            Orientation::Euler(_) => None,
            Orientation::Quaternion(q) => Some(*q),
        }
    }
}

/// Compute a tilt-compensated attitude, reporting degenerate input
///
/// # Arguments
/// * `accelerometer` - Accelerometer reading, any units (only direction is used)
/// * `magnetometer` - Calibrated magnetometer reading, any units
///
/// # Errors
/// [`Error::DegenerateInput`](crate::Error::DegenerateInput) when either vector
/// is too short to normalize.
///
/// # Example
/// ```
/// use nalgebra::Vector3;
/// use ahrs_nav::compass::tilt_compensate;
///
/// let accel = Vector3::new(0.0, 0.0, 1.0); // level
/// let mag = Vector3::new(0.0, 1.0, 0.0);   // north on the left: facing east
/// let attitude = tilt_compensate(accel, mag).unwrap();
/// assert!((attitude.to_degrees().heading - 90.0).abs() < 1e-9);
/// ```
pub fn tilt_compensate(accelerometer: Vector3<f64>, magnetometer: Vector3<f64>) -> Result<Attitude> {
    let m = magnetometer.unit()?;
    let a = accelerometer.unit()?;

    let pitch = clamped_asin(-a.x);
    let roll = if pitch.abs() >= FRAC_PI_2 {
        0.0
    } else {
        clamped_asin(a.y / pitch.cos())
    };

    let (sin_roll, cos_roll) = roll.sin_cos();
    let (sin_pitch, cos_pitch) = pitch.sin_cos();

    // Magnetic field rotated back into the horizontal plane
    let x = m.x * cos_pitch + (m.y * sin_roll + m.z * cos_roll) * sin_pitch;
    let y = m.y * cos_roll - m.z * sin_roll;

    Ok(Attitude {
        roll,
        pitch,
        heading: wrap_two_pi(y.atan2(x)),
    })
}

/// Best-effort tilt-compensated compass
///
/// Same computation as [`tilt_compensate`], but a degenerate sample yields
/// zero angles (or the identity quaternion) so callers can treat it as
/// "orientation unavailable this sample".
///
/// # Example
/// ```
/// use nalgebra::Vector3;
/// use ahrs_nav::{AngleUnits, compass::compensate};
///
/// let level = Vector3::new(0.0, 0.0, 1.0);
/// let north = Vector3::new(1.0, 0.0, 0.0);
/// let euler = compensate(AngleUnits::Degrees, level, north).euler().unwrap();
/// assert!(euler.heading.abs() < 1e-9);
/// ```
pub fn compensate(
    units: AngleUnits,
    accelerometer: Vector3<f64>,
    magnetometer: Vector3<f64>,
) -> Orientation {
    match tilt_compensate(accelerometer, magnetometer) {
        Ok(attitude) => attitude.in_units(units),
        Err(err) => {
            log::warn!("compass sample unavailable: {err}");
            Attitude::default().in_units(units)
        }
    }
}

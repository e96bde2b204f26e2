//! Mathematical utilities and nalgebra extensions

use core::f64::consts::{PI, TAU};

use nalgebra::{Quaternion, UnitQuaternion, Vector3};

use crate::error::{Error, Result};
use crate::types::EulerAngles;

/// Mathematical constants
pub const DEG_TO_RAD: f64 = PI / 180.0;
pub const RAD_TO_DEG: f64 = 180.0 / PI;

/// Smallest norm that normalization accepts
pub const NORM_EPSILON: f64 = 1e-6;

fn check_norm(norm: f64) -> Result<f64> {
    if norm.is_finite() && norm >= NORM_EPSILON {
        Ok(norm)
    } else {
        Err(Error::DegenerateInput { norm })
    }
}

/// Return the unit vector along `(x, y, z)`
///
/// # Example
/// ```
/// use ahrs_nav::normalize3;
///
/// let (x, y, z) = normalize3(3.0, 0.0, 4.0).unwrap();
/// assert!((x - 0.6).abs() < 1e-12 && y == 0.0 && (z - 0.8).abs() < 1e-12);
/// assert!(normalize3(0.0, 0.0, 1e-9).is_err());
/// ```
pub fn normalize3(x: f64, y: f64, z: f64) -> Result<(f64, f64, f64)> {
    let unit = Vector3::new(x, y, z).unit()?;
    Ok((unit.x, unit.y, unit.z))
}

/// Return the unit quaternion along `(w, x, y, z)`
pub fn normalize_quaternion(w: f64, x: f64, y: f64, z: f64) -> Result<(f64, f64, f64, f64)> {
    let unit = Quaternion::new(w, x, y, z).unit()?;
    let q = unit.quaternion();
    Ok((q.w, q.i, q.j, q.k))
}

/// Wrap an angle in radians into `[0, 2π)`
pub fn wrap_two_pi(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid rounds tiny negative inputs up to exactly TAU
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Wrap an angle in degrees into `[0, 360)`
pub fn wrap_360(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// `asin` with its argument clamped to `[-1, 1]`
///
/// Round-off can push a sine computed from unit vectors slightly past ±1.
pub fn clamped_asin(value: f64) -> f64 {
    value.clamp(-1.0, 1.0).asin()
}

/// Convert an orientation quaternion to roll, pitch and heading in degrees
///
/// The quaternion rotates sensor-frame vectors into the earth frame
/// (X = magnetic north, Z = up), as produced by [`AhrsFilter`](crate::AhrsFilter).
/// Heading is measured clockwise from north and wrapped into `[0, 360)`.
///
/// # Example
/// ```
/// use nalgebra::UnitQuaternion;
/// use ahrs_nav::quaternion_to_euler;
///
/// let euler = quaternion_to_euler(&UnitQuaternion::identity());
/// assert_eq!((euler.roll, euler.pitch, euler.heading), (0.0, 0.0, 0.0));
/// ```
pub fn quaternion_to_euler(q: &UnitQuaternion<f64>) -> EulerAngles {
    let q = q.quaternion();
    let (q0, q1, q2, q3) = (q.w, q.i, q.j, q.k);

    let roll = (2.0 * (q0 * q1 + q2 * q3)).atan2(1.0 - 2.0 * (q1 * q1 + q2 * q2));
    let pitch = clamped_asin(2.0 * (q0 * q2 - q3 * q1));
    let yaw = (2.0 * (q0 * q3 + q1 * q2)).atan2(1.0 - 2.0 * (q2 * q2 + q3 * q3));

    EulerAngles {
        roll: roll * RAD_TO_DEG,
        pitch: pitch * RAD_TO_DEG,
        heading: wrap_360(-yaw * RAD_TO_DEG),
    }
}

/// Extension trait for Vector3 operations
pub trait Vector3Ext {
    /// Normalize the vector, failing when its norm is below [`NORM_EPSILON`]
    fn unit(&self) -> Result<Vector3<f64>>;

    /// Convert degrees to radians
    fn deg_to_rad(&self) -> Vector3<f64>;

    /// Convert radians to degrees
    fn rad_to_deg(&self) -> Vector3<f64>;
}

impl Vector3Ext for Vector3<f64> {
    fn unit(&self) -> Result<Vector3<f64>> {
        let norm = check_norm(self.norm())?;
        Ok(*self / norm)
    }

    fn deg_to_rad(&self) -> Vector3<f64> {
        *self * DEG_TO_RAD
    }

    fn rad_to_deg(&self) -> Vector3<f64> {
        *self * RAD_TO_DEG
    }
}

/// Extension trait for Quaternion operations
pub trait QuaternionExt {
    /// Normalize the quaternion, failing when its norm is below [`NORM_EPSILON`]
    fn unit(&self) -> Result<UnitQuaternion<f64>>;
}

impl QuaternionExt for Quaternion<f64> {
    fn unit(&self) -> Result<UnitQuaternion<f64>> {
        let norm = check_norm(self.norm())?;
        Ok(UnitQuaternion::new_unchecked(*self / norm))
    }
}

//! Madgwick gradient-descent orientation filter

use nalgebra::{Quaternion, UnitQuaternion, Vector3};

use crate::bias::GyroBias;
use crate::error::{Error, Result};
use crate::math::{QuaternionExt, Vector3Ext, quaternion_to_euler};
use crate::types::{EulerAngles, FilterSettings, SensorSample};

/// Madgwick AHRS filter
///
/// Fuses gyroscope, accelerometer and (optionally) magnetometer samples into
/// a unit quaternion that rotates sensor-frame vectors into the earth frame
/// (X = magnetic north, Z = up). Each update integrates the gyroscope rate and
/// pulls the estimate down the normalized gradient of the gravity (and
/// magnetic field) alignment error, scaled by the gain β.
///
/// Updates are all-or-nothing: a sample that cannot be normalized is refused
/// with an error and the filter state is left exactly as it was.
///
/// # Example
/// ```
/// use nalgebra::Vector3;
/// use ahrs_nav::AhrsFilter;
///
/// let mut filter = AhrsFilter::new(0.1, None).unwrap();
/// let q = filter
///     .update(
///         Vector3::new(0.0, 0.0, 1.0),       // accelerometer, g
///         Vector3::new(0.0, 0.0, 0.0),       // gyroscope, deg/s
///         Some(Vector3::new(20.0, 0.0, -40.0)), // magnetometer, µT
///         0.01,
///     )
///     .unwrap();
/// assert!((q.norm() - 1.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct AhrsFilter {
    /// Filter settings
    settings: FilterSettings,
    /// Current orientation quaternion (WXYZ format)
    quaternion: UnitQuaternion<f64>,
    /// Bias estimator, present when bias compensation is enabled
    bias: Option<GyroBias>,
}

impl AhrsFilter {
    /// Create a filter with gain `beta` and default settings otherwise
    ///
    /// `initial` is normalized before use; `None` starts at the identity.
    ///
    /// # Errors
    /// [`Error::Configuration`] for a negative or non-finite `beta`,
    /// [`Error::DegenerateInput`] for a near-zero initial quaternion.
    pub fn new(beta: f64, initial: Option<Quaternion<f64>>) -> Result<Self> {
        let settings = FilterSettings {
            beta,
            ..FilterSettings::default()
        };
        Self::with_settings(settings, initial)
    }

    /// Create a filter with the specified settings
    pub fn with_settings(settings: FilterSettings, initial: Option<Quaternion<f64>>) -> Result<Self> {
        validate_settings(&settings)?;
        let quaternion = initial_quaternion(initial)?;

        log::debug!(
            "AHRS filter: beta={}, gyroscope units {:?}, bias compensation {:?}",
            settings.beta,
            settings.gyroscope_units,
            settings.bias
        );

        Ok(Self {
            settings,
            quaternion,
            bias: settings
                .bias
                .map(|bias| GyroBias::new(bias, settings.gyroscope_units)),
        })
    }

    /// Reset the orientation and clear the bias estimate
    pub fn reset(&mut self, initial: Option<Quaternion<f64>>) -> Result<()> {
        self.quaternion = initial_quaternion(initial)?;
        if let Some(bias) = self.bias.as_mut() {
            bias.reset();
        }
        Ok(())
    }

    /// Get current filter settings
    pub fn settings(&self) -> FilterSettings {
        self.settings
    }

    /// Get current orientation quaternion
    pub fn orientation(&self) -> UnitQuaternion<f64> {
        self.quaternion
    }

    /// Set orientation quaternion directly
    pub fn set_orientation(&mut self, quaternion: UnitQuaternion<f64>) {
        self.quaternion = quaternion;
    }

    /// Current orientation as roll, pitch and heading in degrees
    pub fn euler(&self) -> EulerAngles {
        quaternion_to_euler(&self.quaternion)
    }

    /// Current gyroscope bias estimate in the configured gyro units
    ///
    /// `None` when bias compensation is disabled.
    pub fn gyro_bias(&self) -> Option<Vector3<f64>> {
        let factor = self.settings.gyroscope_units.to_radians_factor();
        self.bias.as_ref().map(|bias| bias.bias() / factor)
    }

    /// Run one filter cycle
    ///
    /// # Arguments
    /// * `accelerometer` - Accelerometer reading, any units (only direction is used)
    /// * `gyroscope` - Gyroscope reading in the configured [`GyroUnits`](crate::GyroUnits)
    /// * `magnetometer` - Magnetometer reading, `None` for 6-axis operation
    /// * `delta_time` - Time since the previous sample in seconds
    ///
    /// Returns the updated orientation.
    ///
    /// # Errors
    /// [`Error::InvalidTimeStep`] for a negative or non-finite `delta_time`,
    /// [`Error::DegenerateInput`] when the accelerometer or magnetometer
    /// cannot be normalized. On error nothing is modified.
    pub fn update(
        &mut self,
        accelerometer: Vector3<f64>,
        gyroscope: Vector3<f64>,
        magnetometer: Option<Vector3<f64>>,
        delta_time: f64,
    ) -> Result<UnitQuaternion<f64>> {
        self.step(accelerometer, gyroscope, magnetometer, delta_time)
            .inspect_err(|err| log::debug!("AHRS update rejected: {err}"))
    }

    /// Run one filter cycle from a bundled sample
    pub fn update_sample(&mut self, sample: &SensorSample) -> Result<UnitQuaternion<f64>> {
        self.update(sample.accel, sample.gyro, sample.mag, sample.dt)
    }

    /// Integrate the gyroscope alone, without any correction
    ///
    /// The current bias estimate is still subtracted but not adapted. Useful
    /// while the accelerometer is known to be unreliable.
    pub fn update_gyro(&mut self, gyroscope: Vector3<f64>, delta_time: f64) -> Result<UnitQuaternion<f64>> {
        check_time_step(delta_time)?;
        let omega = self.angular_rate(gyroscope, self.bias.as_ref());
        let q = *self.quaternion.quaternion();
        self.quaternion = integrate(&q, &(rate_of_change(&q, omega)), delta_time)?;
        Ok(self.quaternion)
    }

    fn step(
        &mut self,
        accelerometer: Vector3<f64>,
        gyroscope: Vector3<f64>,
        magnetometer: Option<Vector3<f64>>,
        delta_time: f64,
    ) -> Result<UnitQuaternion<f64>> {
        check_time_step(delta_time)?;

        let a = accelerometer.unit()?;
        let m = magnetometer.map(|m| m.unit()).transpose()?;

        let q = *self.quaternion.quaternion();
        let gradient = match m {
            Some(m) => marg_gradient(&q, &a, &m),
            None => imu_gradient(&q, &a),
        };

        // At the optimum the gradient vanishes and there is nothing to correct
        let correction = match gradient.unit() {
            Ok(direction) => direction.into_inner(),
            Err(_) => {
                log::trace!("zero objective gradient, skipping correction");
                Quaternion::new(0.0, 0.0, 0.0, 0.0)
            }
        };

        let mut bias = self.bias;
        if let Some(bias) = bias.as_mut() {
            bias.update(&self.quaternion, &correction, delta_time);
        }

        let omega = self.angular_rate(gyroscope, bias.as_ref());
        let q_dot = rate_of_change(&q, omega) - correction * self.settings.beta;
        let quaternion = integrate(&q, &q_dot, delta_time)?;

        self.quaternion = quaternion;
        self.bias = bias;
        Ok(quaternion)
    }

    /// Gyroscope reading in rad/s with the bias estimate removed
    fn angular_rate(&self, gyroscope: Vector3<f64>, bias: Option<&GyroBias>) -> Vector3<f64> {
        let omega = gyroscope * self.settings.gyroscope_units.to_radians_factor();
        match bias {
            Some(bias) => bias.correct(omega),
            None => omega,
        }
    }
}

impl Default for AhrsFilter {
    fn default() -> Self {
        Self {
            settings: FilterSettings::default(),
            quaternion: UnitQuaternion::identity(),
            bias: None,
        }
    }
}

fn validate_settings(settings: &FilterSettings) -> Result<()> {
    check_non_negative("beta", settings.beta)?;
    if let Some(bias) = settings.bias {
        check_non_negative("drift_rate", bias.drift_rate)?;
    }
    Ok(())
}

fn check_non_negative(parameter: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(Error::Configuration { parameter, value })
    }
}

fn check_time_step(dt: f64) -> Result<()> {
    if dt.is_finite() && dt >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidTimeStep { dt })
    }
}

fn initial_quaternion(initial: Option<Quaternion<f64>>) -> Result<UnitQuaternion<f64>> {
    match initial {
        Some(q) => q.unit(),
        None => Ok(UnitQuaternion::identity()),
    }
}

/// Quaternion derivative from the body rate: `q̇ = ½ q ⊗ (0, ω)`
fn rate_of_change(q: &Quaternion<f64>, omega: Vector3<f64>) -> Quaternion<f64> {
    *q * Quaternion::from_parts(0.0, omega) * 0.5
}

/// First-order integration followed by renormalization
fn integrate(q: &Quaternion<f64>, q_dot: &Quaternion<f64>, dt: f64) -> Result<UnitQuaternion<f64>> {
    (*q + *q_dot * dt).unit()
}

/// Gradient of the gravity alignment objective
///
/// `a` must already be normalized.
fn imu_gradient(q: &Quaternion<f64>, a: &Vector3<f64>) -> Quaternion<f64> {
    let (q0, q1, q2, q3) = (q.w, q.i, q.j, q.k);
    let (ax, ay, az) = (a.x, a.y, a.z);

    let two_q0 = 2.0 * q0;
    let two_q1 = 2.0 * q1;
    let two_q2 = 2.0 * q2;
    let two_q3 = 2.0 * q3;
    let four_q0 = 4.0 * q0;
    let four_q1 = 4.0 * q1;
    let four_q2 = 4.0 * q2;
    let eight_q1 = 8.0 * q1;
    let eight_q2 = 8.0 * q2;
    let q0q0 = q0 * q0;
    let q1q1 = q1 * q1;
    let q2q2 = q2 * q2;
    let q3q3 = q3 * q3;

    let s0 = four_q0 * q2q2 + two_q2 * ax + four_q0 * q1q1 - two_q1 * ay;
    let s1 = four_q1 * q3q3 - two_q3 * ax + 4.0 * q0q0 * q1 - two_q0 * ay - four_q1
        + eight_q1 * q1q1
        + eight_q1 * q2q2
        + four_q1 * az;
    let s2 = 4.0 * q0q0 * q2 + two_q0 * ax + four_q2 * q3q3 - two_q3 * ay - four_q2
        + eight_q2 * q1q1
        + eight_q2 * q2q2
        + four_q2 * az;
    let s3 = 4.0 * q1q1 * q3 - two_q1 * ax + 4.0 * q2q2 * q3 - two_q2 * ay;

    Quaternion::new(s0, s1, s2, s3)
}

/// Gradient of the combined gravity and magnetic field alignment objective
///
/// The reference field is re-derived every cycle from the measured field
/// rotated into the earth frame, keeping only its horizontal magnitude and
/// vertical component. `a` and `m` must already be normalized.
fn marg_gradient(q: &Quaternion<f64>, a: &Vector3<f64>, m: &Vector3<f64>) -> Quaternion<f64> {
    let (q0, q1, q2, q3) = (q.w, q.i, q.j, q.k);
    let (ax, ay, az) = (a.x, a.y, a.z);
    let (mx, my, mz) = (m.x, m.y, m.z);

    let two_q0mx = 2.0 * q0 * mx;
    let two_q0my = 2.0 * q0 * my;
    let two_q0mz = 2.0 * q0 * mz;
    let two_q1mx = 2.0 * q1 * mx;
    let two_q0 = 2.0 * q0;
    let two_q1 = 2.0 * q1;
    let two_q2 = 2.0 * q2;
    let two_q3 = 2.0 * q3;
    let two_q0q2 = 2.0 * q0 * q2;
    let two_q2q3 = 2.0 * q2 * q3;
    let q0q0 = q0 * q0;
    let q0q1 = q0 * q1;
    let q0q2 = q0 * q2;
    let q0q3 = q0 * q3;
    let q1q1 = q1 * q1;
    let q1q2 = q1 * q2;
    let q1q3 = q1 * q3;
    let q2q2 = q2 * q2;
    let q2q3 = q2 * q3;
    let q3q3 = q3 * q3;

    // Earth-frame direction of the measured field
    let hx = mx * q0q0 - two_q0my * q3 + two_q0mz * q2 + mx * q1q1 + two_q1 * my * q2
        + two_q1 * mz * q3
        - mx * q2q2
        - mx * q3q3;
    let hy = two_q0mx * q3 + my * q0q0 - two_q0mz * q1 + two_q1mx * q2 - my * q1q1
        + my * q2q2
        + two_q2 * mz * q3
        - my * q3q3;
    let two_bx = (hx * hx + hy * hy).sqrt();
    let two_bz = -two_q0mx * q2 + two_q0my * q1 + mz * q0q0 + two_q1mx * q3 - mz * q1q1
        + two_q2 * my * q3
        - mz * q2q2
        + mz * q3q3;
    let four_bx = 2.0 * two_bx;
    let four_bz = 2.0 * two_bz;

    // Objective residuals: predicted minus measured
    let fax = 2.0 * q1q3 - two_q0q2 - ax;
    let fay = 2.0 * q0q1 + two_q2q3 - ay;
    let faz = 1.0 - 2.0 * q1q1 - 2.0 * q2q2 - az;
    let fmx = two_bx * (0.5 - q2q2 - q3q3) + two_bz * (q1q3 - q0q2) - mx;
    let fmy = two_bx * (q1q2 - q0q3) + two_bz * (q0q1 + q2q3) - my;
    let fmz = two_bx * (q0q2 + q1q3) + two_bz * (0.5 - q1q1 - q2q2) - mz;

    let s0 = -two_q2 * fax + two_q1 * fay - two_bz * q2 * fmx
        + (-two_bx * q3 + two_bz * q1) * fmy
        + two_bx * q2 * fmz;
    let s1 = two_q3 * fax + two_q0 * fay - 4.0 * q1 * faz
        + two_bz * q3 * fmx
        + (two_bx * q2 + two_bz * q0) * fmy
        + (two_bx * q3 - four_bz * q1) * fmz;
    let s2 = -two_q0 * fax + two_q3 * fay - 4.0 * q2 * faz
        + (-four_bx * q2 - two_bz * q0) * fmx
        + (two_bx * q1 + two_bz * q3) * fmy
        + (two_bx * q0 - four_bz * q2) * fmz;
    let s3 = two_q1 * fax + two_q2 * fay
        + (-four_bx * q3 + two_bz * q1) * fmx
        + (-two_bx * q0 + two_bz * q2) * fmy
        + two_bx * q1 * fmz;

    Quaternion::new(s0, s1, s2, s3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BiasSettings, GyroUnits};
    use approx::assert_abs_diff_eq;
    use nalgebra::{Matrix3x4, Vector4};

    fn level() -> Vector3<f64> {
        Vector3::z()
    }

    fn north() -> Vector3<f64> {
        Vector3::x()
    }

    fn as_vector(q: &Quaternion<f64>) -> Vector4<f64> {
        Vector4::new(q.w, q.i, q.j, q.k)
    }

    /// Jacobian-transpose form of the gradient, written out term by term
    fn reference_gradient(q: &Quaternion<f64>, a: &Vector3<f64>, m: Option<&Vector3<f64>>) -> Vector4<f64> {
        let (q0, q1, q2, q3) = (q.w, q.i, q.j, q.k);

        let f_g = Vector3::new(
            2.0 * (q1 * q3 - q0 * q2) - a.x,
            2.0 * (q0 * q1 + q2 * q3) - a.y,
            2.0 * (0.5 - q1 * q1 - q2 * q2) - a.z,
        );
        #[rustfmt::skip]
        let j_g = Matrix3x4::new(
            -2.0 * q2, 2.0 * q3, -2.0 * q0, 2.0 * q1,
            2.0 * q1, 2.0 * q0, 2.0 * q3, 2.0 * q2,
            0.0, -4.0 * q1, -4.0 * q2, 0.0,
        );
        let mut gradient = j_g.transpose() * f_g;

        if let Some(m) = m {
            let h = UnitQuaternion::new_unchecked(*q) * m;
            // Reference field scaled as in the closed form: half of the horizontal/vertical split
            let bx = (h.x * h.x + h.y * h.y).sqrt() / 2.0;
            let bz = h.z / 2.0;

            let f_b = Vector3::new(
                2.0 * bx * (0.5 - q2 * q2 - q3 * q3) + 2.0 * bz * (q1 * q3 - q0 * q2) - m.x,
                2.0 * bx * (q1 * q2 - q0 * q3) + 2.0 * bz * (q0 * q1 + q2 * q3) - m.y,
                2.0 * bx * (q0 * q2 + q1 * q3) + 2.0 * bz * (0.5 - q1 * q1 - q2 * q2) - m.z,
            );
            #[rustfmt::skip]
            let j_b = Matrix3x4::new(
                -2.0 * bz * q2, 2.0 * bz * q3, -4.0 * bx * q2 - 2.0 * bz * q0, -4.0 * bx * q3 + 2.0 * bz * q1,
                -2.0 * bx * q3 + 2.0 * bz * q1, 2.0 * bx * q2 + 2.0 * bz * q0, 2.0 * bx * q1 + 2.0 * bz * q3, -2.0 * bx * q0 + 2.0 * bz * q2,
                2.0 * bx * q2, 2.0 * bx * q3 - 4.0 * bz * q1, 2.0 * bx * q0 - 4.0 * bz * q2, 2.0 * bx * q1,
            );
            gradient += j_b.transpose() * f_b;
        }

        gradient
    }

    #[test]
    fn test_new_filter() {
        let filter = AhrsFilter::new(0.1, None).unwrap();
        assert_eq!(filter.orientation(), UnitQuaternion::identity());
        assert_eq!(filter.settings().beta, 0.1);
        assert!(filter.gyro_bias().is_none());

        let filter = AhrsFilter::default();
        assert_eq!(filter.settings(), FilterSettings::default());
    }

    #[test]
    fn test_initial_quaternion_is_normalized() {
        let filter = AhrsFilter::new(0.1, Some(Quaternion::new(2.0, 0.0, 0.0, 0.0))).unwrap();
        assert_eq!(filter.orientation(), UnitQuaternion::identity());

        let err = AhrsFilter::new(0.1, Some(Quaternion::new(0.0, 0.0, 0.0, 0.0))).unwrap_err();
        assert!(err.is_degenerate());
    }

    #[test]
    fn test_invalid_settings() {
        assert!(matches!(
            AhrsFilter::new(-0.1, None),
            Err(Error::Configuration { parameter: "beta", .. })
        ));
        assert!(AhrsFilter::new(f64::NAN, None).is_err());

        let settings = FilterSettings {
            bias: Some(BiasSettings { drift_rate: -1.0 }),
            ..FilterSettings::default()
        };
        assert!(matches!(
            AhrsFilter::with_settings(settings, None),
            Err(Error::Configuration {
                parameter: "drift_rate",
                ..
            })
        ));
    }

    #[test]
    fn test_imu_gradient_matches_jacobian() {
        let q = Quaternion::new(0.9, 0.2, -0.3, 0.25);
        let q = q / q.norm();
        let a = Vector3::new(0.1, -0.3, 0.9).normalize();

        let closed_form = as_vector(&imu_gradient(&q, &a));
        let reference = reference_gradient(&q, &a, None);
        assert_abs_diff_eq!(closed_form, reference, epsilon = 1e-12);
    }

    #[test]
    fn test_marg_gradient_matches_jacobian() {
        let q = Quaternion::new(0.7, -0.1, 0.4, 0.5);
        let q = q / q.norm();
        let a = Vector3::new(-0.2, 0.4, 0.8).normalize();
        let m = Vector3::new(0.3, -0.5, -0.7).normalize();

        let closed_form = as_vector(&marg_gradient(&q, &a, &m));
        let reference = reference_gradient(&q, &a, Some(&m));
        assert_abs_diff_eq!(closed_form, reference, epsilon = 1e-12);
    }

    #[test]
    fn test_gradient_vanishes_when_aligned() {
        let q = Quaternion::identity();
        assert_eq!(as_vector(&imu_gradient(&q, &level())), Vector4::zeros());

        let dipped = Vector3::new(0.6, 0.0, -0.8);
        let gradient = marg_gradient(&q, &level(), &dipped);
        assert_abs_diff_eq!(as_vector(&gradient), Vector4::zeros(), epsilon = 1e-12);
    }

    #[test]
    fn test_stationary_identity_is_fixed_point() {
        let mut filter = AhrsFilter::new(0.1, None).unwrap();
        for _ in 0..100 {
            filter.update(level(), Vector3::zeros(), Some(north()), 0.01).unwrap();
        }
        assert_abs_diff_eq!(
            as_vector(filter.orientation().quaternion()),
            Vector4::new(1.0, 0.0, 0.0, 0.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_degenerate_accelerometer_rejected() {
        let settings = FilterSettings {
            bias: Some(BiasSettings::default()),
            ..FilterSettings::default()
        };
        let initial = Quaternion::new(0.9, 0.1, 0.2, 0.3);
        let mut filter = AhrsFilter::with_settings(settings, Some(initial)).unwrap();
        filter
            .update(Vector3::new(0.1, 0.2, 1.0), Vector3::new(1.0, -2.0, 0.5), Some(north()), 0.01)
            .unwrap();
        let before = filter.orientation();
        let bias_before = filter.gyro_bias();

        let err = filter
            .update(Vector3::zeros(), Vector3::new(10.0, 0.0, 0.0), Some(north()), 0.01)
            .unwrap_err();
        assert!(err.is_degenerate());
        assert_eq!(filter.orientation(), before);
        assert_eq!(filter.gyro_bias(), bias_before);
    }

    #[test]
    fn test_degenerate_magnetometer_rejected() {
        let mut filter = AhrsFilter::new(0.1, None).unwrap();
        let result = filter.update(level(), Vector3::new(5.0, 0.0, 0.0), Some(Vector3::zeros()), 0.01);
        assert!(result.unwrap_err().is_degenerate());
        assert_eq!(filter.orientation(), UnitQuaternion::identity());
    }

    #[test]
    fn test_invalid_time_step() {
        let mut filter = AhrsFilter::new(0.1, None).unwrap();
        for dt in [-0.01, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                filter.update(level(), Vector3::zeros(), None, dt),
                Err(Error::InvalidTimeStep { .. })
            ));
            assert!(filter.update_gyro(Vector3::zeros(), dt).is_err());
        }
        assert_eq!(filter.orientation(), UnitQuaternion::identity());

        // A zero time step is accepted and changes nothing
        let q = filter.update(level(), Vector3::new(30.0, 0.0, 0.0), None, 0.0).unwrap();
        assert_eq!(q, UnitQuaternion::identity());
    }

    #[test]
    fn test_gyroscope_units() {
        let mut degrees = AhrsFilter::new(0.1, None).unwrap();
        let mut radians = AhrsFilter::with_settings(
            FilterSettings {
                gyroscope_units: GyroUnits::RadiansPerSecond,
                ..FilterSettings::default()
            },
            None,
        )
        .unwrap();

        let gyro = Vector3::new(12.0, -30.0, 45.0);
        let accel = Vector3::new(0.1, 0.0, 0.95);
        for _ in 0..50 {
            let a = degrees.update(accel, gyro, Some(north()), 0.01).unwrap();
            let b = radians.update(accel, gyro.deg_to_rad(), Some(north()), 0.01).unwrap();
            assert_abs_diff_eq!(as_vector(a.quaternion()), as_vector(b.quaternion()), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_update_sample_matches_update() {
        let mut a = AhrsFilter::new(0.2, None).unwrap();
        let mut b = AhrsFilter::new(0.2, None).unwrap();
        let sample = SensorSample {
            accel: Vector3::new(0.0, 0.3, 0.9),
            gyro: Vector3::new(1.0, 2.0, 3.0),
            mag: None,
            dt: 0.02,
        };

        let qa = a.update_sample(&sample).unwrap();
        let qb = b.update(sample.accel, sample.gyro, sample.mag, sample.dt).unwrap();
        assert_eq!(qa, qb);
    }

    #[test]
    fn test_update_gyro_ignores_accelerometer_state() {
        let mut filter = AhrsFilter::new(0.1, None).unwrap();
        let q = filter.update_gyro(Vector3::new(0.0, 0.0, 90.0), 0.01).unwrap();
        let expected = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), 0.9f64.to_radians());
        assert!(q.angle_to(&expected) < 1e-6);
    }

    #[test]
    fn test_reset() {
        let settings = FilterSettings {
            bias: Some(BiasSettings::default()),
            ..FilterSettings::default()
        };
        let mut filter = AhrsFilter::with_settings(settings, None).unwrap();
        for _ in 0..20 {
            filter
                .update(Vector3::new(0.3, 0.0, 1.0), Vector3::new(2.0, 0.0, 0.0), Some(north()), 0.01)
                .unwrap();
        }
        assert_ne!(filter.gyro_bias(), Some(Vector3::zeros()));

        filter.reset(None).unwrap();
        assert_eq!(filter.orientation(), UnitQuaternion::identity());
        assert_eq!(filter.gyro_bias(), Some(Vector3::zeros()));

        let target = UnitQuaternion::from_euler_angles(0.1, 0.2, 0.3);
        filter.set_orientation(target);
        assert_eq!(filter.orientation(), target);
        assert_abs_diff_eq!(filter.euler().roll, 0.1f64.to_degrees(), epsilon = 1e-9);
    }
}

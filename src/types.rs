//! Core types and conventions for the AHRS and navigation layers

use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Local tangent-plane axes convention
///
/// Selects how a [`NavigationFrame`](crate::NavigationFrame) orders and signs
/// its local axes.
///
/// # Conventions
/// - **NED**: North-East-Down (X=North, Y=East, Z=Down)
/// - **ENU**: East-North-Up (X=East, Y=North, Z=Up)
///
/// # Example
/// ```
/// use ahrs_nav::{Convention, NavigationFrame};
///
/// let frame = NavigationFrame::from_origin(45.0, 7.0, 300.0);
/// assert_eq!(frame.convention(), Convention::Ned);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Convention {
    /// North-East-Down coordinate system
    ///
    /// - X axis points North
    /// - Y axis points East
    /// - Z axis points Down
    #[default]
    Ned,
    /// East-North-Up coordinate system
    ///
    /// - X axis points East
    /// - Y axis points North
    /// - Z axis points Up
    Enu,
}

/// Unit of the angular rate samples fed to a filter
///
/// Fixed per filter instance; the filter never guesses units from the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GyroUnits {
    /// Degrees per second
    #[default]
    DegreesPerSecond,
    /// Radians per second
    RadiansPerSecond,
}

impl GyroUnits {
    /// Factor converting a reading in these units to rad/s
    pub fn to_radians_factor(self) -> f64 {
        match self {
            GyroUnits::DegreesPerSecond => crate::math::DEG_TO_RAD,
            GyroUnits::RadiansPerSecond => 1.0,
        }
    }
}

/// Output representation of the tilt-compensated compass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AngleUnits {
    /// Roll, pitch and heading in degrees, heading in `[0, 360)`
    #[default]
    Degrees,
    /// Roll, pitch and heading in radians, heading in `[0, 2π)`
    Radians,
    /// Orientation as a unit quaternion
    Quaternion,
}

/// Gyroscope bias estimation settings
///
/// # Example
/// ```
/// use ahrs_nav::BiasSettings;
///
/// let settings = BiasSettings { drift_rate: 0.5 }; // deg/s per second
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BiasSettings {
    /// Expected gyroscope drift rate, in the filter's gyro units per second
    ///
    /// Sets how fast the bias estimate is allowed to move. Larger values track
    /// bias changes faster but let more orientation error leak into the estimate.
    pub drift_rate: f64,
}

impl Default for BiasSettings {
    fn default() -> Self {
        Self { drift_rate: 0.2 }
    }
}

/// AHRS filter settings
///
/// # Example
/// ```
/// use ahrs_nav::{BiasSettings, FilterSettings, GyroUnits};
///
/// let settings = FilterSettings {
///     beta: 0.05,                              // smoother, slower correction
///     gyroscope_units: GyroUnits::RadiansPerSecond,
///     bias: Some(BiasSettings::default()),     // estimate gyro drift
/// };
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FilterSettings {
    /// Gradient-descent gain (β)
    ///
    /// Trades noise rejection against lag. Must be finite and non-negative;
    /// zero disables the accelerometer/magnetometer correction entirely.
    pub beta: f64,
    /// Unit of the gyroscope samples
    pub gyroscope_units: GyroUnits,
    /// Gyroscope bias compensation, disabled when `None`
    pub bias: Option<BiasSettings>,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            beta: 0.1,
            gyroscope_units: GyroUnits::default(),
            bias: None,
        }
    }
}

/// One sensor cycle as delivered by a driver layer
///
/// Units follow the filter's configuration: accelerometer in g or m/s² (only
/// the direction is used), gyroscope in the configured [`GyroUnits`],
/// magnetometer in µT.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SensorSample {
    /// Accelerometer reading
    pub accel: Vector3<f64>,
    /// Gyroscope reading
    pub gyro: Vector3<f64>,
    /// Magnetometer reading, `None` for 6-axis operation
    pub mag: Option<Vector3<f64>>,
    /// Elapsed time since the previous sample in seconds
    pub dt: f64,
}

/// Roll, pitch and heading triple
///
/// Units depend on where it came from; [`quaternion_to_euler`](crate::quaternion_to_euler)
/// and [`Attitude::to_degrees`](crate::compass::Attitude::to_degrees) produce degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EulerAngles {
    /// Rotation about the sensor X axis
    pub roll: f64,
    /// Rotation about the sensor Y axis
    pub pitch: f64,
    /// Clockwise angle from magnetic north, never negative
    pub heading: f64,
}

/// Geodetic position on an ellipsoid
///
/// Latitude and longitude in degrees, height in metres above the ellipsoid.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Llh {
    /// Geodetic latitude in degrees, north positive
    pub lat: f64,
    /// Longitude in degrees, east positive
    pub lon: f64,
    /// Ellipsoidal height in metres
    pub height: f64,
}

impl Llh {
    /// Create a geodetic position
    pub fn new(lat: f64, lon: f64, height: f64) -> Self {
        Self { lat, lon, height }
    }
}

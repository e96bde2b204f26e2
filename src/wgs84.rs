//! WGS84 ellipsoid and geodetic conversions
//!
//! Latitude and longitude are in degrees at every public boundary; heights and
//! ECEF coordinates are in metres.

use nalgebra::Vector3;

use crate::math::{DEG_TO_RAD, RAD_TO_DEG, clamped_asin};
use crate::types::Llh;

/// Earth rotation rate in rad/s
pub const EARTH_RATE: f64 = 7.2921157e-5;

/// Sidereal rotation period in seconds
pub const ROTATION_PERIOD: f64 = 23.0 * 3600.0 + 56.0 * 60.0 + 4.09053;

/// Schuler frequency in rad/s
pub const SCHULER_FREQUENCY: f64 = 1.2383e-3;

/// Normal gravity at the equator in m/s²
pub const EQUATORIAL_GRAVITY: f64 = 9.7803253359;

/// Horizontal distance under which a point is treated as lying on the polar axis
const POLAR_AXIS_TOLERANCE: f64 = 1e-9;

/// WGS84 reference ellipsoid
pub const WGS84: Ellipsoid = Ellipsoid::from_flattening(6378137.0, 1.0 / 298.257223563);

/// Reference ellipsoid of revolution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    /// Semi-major (equatorial) axis in metres
    pub a: f64,
    /// Flattening
    pub f: f64,
    /// Semi-minor (polar) axis in metres
    pub b: f64,
    /// First eccentricity squared
    pub e2: f64,
    /// Second eccentricity squared
    pub ep2: f64,
    /// Mean radius `(2a + b) / 3` in metres
    pub mean_radius: f64,
}

impl Ellipsoid {
    /// Build an ellipsoid from its semi-major axis and flattening
    pub const fn from_flattening(a: f64, f: f64) -> Self {
        let b = a * (1.0 - f);
        let a2 = a * a;
        let b2 = b * b;
        Self {
            a,
            f,
            b,
            e2: 1.0 - b2 / a2,
            ep2: (a2 - b2) / b2,
            mean_radius: (2.0 * a + b) / 3.0,
        }
    }

    /// Sea-level normal gravity in m/s² at geodetic latitude `lat` (degrees)
    ///
    /// Series form of the international gravity formula.
    pub fn gravity(&self, lat: f64) -> f64 {
        let lat = lat * DEG_TO_RAD;
        let sin_lat = lat.sin();
        let sin_2lat = (2.0 * lat).sin();
        EQUATORIAL_GRAVITY * (1.0 + 0.0053024 * sin_lat * sin_lat - 0.0000058 * sin_2lat * sin_2lat)
    }

    /// Distance from the Earth's centre to the surface at latitude `lat` (degrees)
    pub fn geocentric_radius(&self, lat: f64) -> f64 {
        let (sin_lat, cos_lat) = (lat * DEG_TO_RAD).sin_cos();
        let (a, b) = (self.a, self.b);

        let num = (a * a * cos_lat).powi(2) + (b * b * sin_lat).powi(2);
        let den = (a * cos_lat).powi(2) + (b * sin_lat).powi(2);
        (num / den).sqrt()
    }

    /// Prime vertical radius of curvature N at latitude `lat` (degrees)
    pub fn normal_radius(&self, lat: f64) -> f64 {
        let sin_lat = (lat * DEG_TO_RAD).sin();
        self.a / (1.0 - self.e2 * sin_lat * sin_lat).sqrt()
    }

    /// Meridian radius of curvature M at latitude `lat` (degrees)
    pub fn meridian_radius(&self, lat: f64) -> f64 {
        let sin_lat = (lat * DEG_TO_RAD).sin();
        self.a * (1.0 - self.e2) / (1.0 - self.e2 * sin_lat * sin_lat).powf(1.5)
    }

    /// Great-circle distance in metres between two positions
    ///
    /// Heights are ignored; the sphere has the ellipsoid's mean radius.
    pub fn haversine(&self, from: &Llh, to: &Llh) -> f64 {
        let dlat = (to.lat - from.lat) * DEG_TO_RAD;
        let dlon = (to.lon - from.lon) * DEG_TO_RAD;

        let sin_half_dlat = (0.5 * dlat).sin();
        let sin_half_dlon = (0.5 * dlon).sin();
        let m = sin_half_dlat * sin_half_dlat
            + (from.lat * DEG_TO_RAD).cos() * (to.lat * DEG_TO_RAD).cos() * sin_half_dlon * sin_half_dlon;

        self.mean_radius * 2.0 * clamped_asin(m.sqrt())
    }

    /// Geodetic position to Earth-Centered Earth-Fixed coordinates
    pub fn to_ecef(&self, position: &Llh) -> Vector3<f64> {
        let (sin_lat, cos_lat) = (position.lat * DEG_TO_RAD).sin_cos();
        let (sin_lon, cos_lon) = (position.lon * DEG_TO_RAD).sin_cos();
        let h = position.height;

        let n = self.a / (1.0 - self.e2 * sin_lat * sin_lat).sqrt();

        Vector3::new(
            (n + h) * cos_lat * cos_lon,
            (n + h) * cos_lat * sin_lon,
            ((1.0 - self.e2) * n + h) * sin_lat,
        )
    }

    /// Earth-Centered Earth-Fixed coordinates to geodetic position
    ///
    /// Closed-form solution (Heikkinen), no iteration. On the polar axis the
    /// longitude is undefined and reported as 0.
    pub fn to_llh(&self, ecef: &Vector3<f64>) -> Llh {
        let (x, y, z) = (ecef.x, ecef.y, ecef.z);
        let (a, b, e2, ep2) = (self.a, self.b, self.e2, self.ep2);
        let a2 = a * a;
        let b2 = b * b;
        let z2 = z * z;
        let p2 = x * x + y * y;
        let p = p2.sqrt();

        let f = 54.0 * b2 * z2;
        let g = p2 + (1.0 - e2) * z2 - e2 * (a2 - b2);
        let c = e2 * e2 * f * p2 / (g * g * g);
        let s = (1.0 + c + (c * c + 2.0 * c).sqrt()).cbrt();
        let k = s + 1.0 + 1.0 / s;
        let pp = f / (3.0 * k * k * g * g);
        let q = (1.0 + 2.0 * e2 * e2 * pp).sqrt();

        // The radicand cancels to ~0 near the poles and round-off can drive it negative
        let radicand = 0.5 * a2 * (1.0 + 1.0 / q) - pp * (1.0 - e2) * z2 / (q * (1.0 + q)) - 0.5 * pp * p2;
        let ro = -(pp * e2 * p) / (1.0 + q) + radicand.max(0.0).sqrt();

        let p_ro = p - e2 * ro;
        let u = (p_ro * p_ro + z2).sqrt();
        let v = (p_ro * p_ro + (1.0 - e2) * z2).sqrt();
        let zo = b2 * z / (a * v);

        let height = u * (1.0 - b2 / (a * v));
        let lat = (z + ep2 * zo).atan2(p);
        let lon = if p < POLAR_AXIS_TOLERANCE { 0.0 } else { y.atan2(x) };

        Llh {
            lat: lat * RAD_TO_DEG,
            lon: lon * RAD_TO_DEG,
            height,
        }
    }
}

/// Geodetic latitude/longitude (degrees) and height (metres) to WGS84 ECEF
///
/// # Example
/// ```
/// use ahrs_nav::wgs84::llh_to_ecef;
///
/// let ecef = llh_to_ecef(0.0, 45.0, 1000.0);
/// assert!((ecef.x - 4_510_731.0).abs() < 1.0);
/// assert!(ecef.z.abs() < 1e-6);
/// ```
pub fn llh_to_ecef(lat: f64, lon: f64, height: f64) -> Vector3<f64> {
    WGS84.to_ecef(&Llh::new(lat, lon, height))
}

/// WGS84 ECEF coordinates (metres) to geodetic position
///
/// # Example
/// ```
/// use ahrs_nav::wgs84::ecef_to_llh;
///
/// let llh = ecef_to_llh(4_510_731.0, 4_510_731.0, 0.0);
/// assert!(llh.lat.abs() < 0.01);
/// assert!((llh.lon - 45.0).abs() < 0.01);
/// assert!((llh.height - 999.956).abs() < 1.0);
/// ```
pub fn ecef_to_llh(x: f64, y: f64, z: f64) -> Llh {
    WGS84.to_llh(&Vector3::new(x, y, z))
}

/// Great-circle distance in metres on the WGS84 mean sphere
pub fn haversine(from: &Llh, to: &Llh) -> f64 {
    WGS84.haversine(from, to)
}

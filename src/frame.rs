//! Local tangent-plane navigation frames (NED/ENU)

use nalgebra::{ArrayStorage, Matrix3, Vector3};

use crate::math::DEG_TO_RAD;
use crate::types::{Convention, Llh};
use crate::wgs84::WGS84;

/// Axis swap between NED and ENU
///
/// Symmetric and its own inverse, so the same matrix converts both ways.
pub const NED_ENU: Matrix3<f64> = Matrix3::from_array_storage(ArrayStorage([
    [0.0, 1.0, 0.0],
    [1.0, 0.0, 0.0],
    [0.0, 0.0, -1.0],
]));

/// Direction cosine matrix from ECEF to a local-level navigation frame
///
/// The frame is NED rotated about Down by the wander azimuth `wander_azimuth`
/// (degrees, clockwise from north). With zero wander azimuth the rows are the
/// North, East and Down unit vectors expressed in ECEF.
///
/// # Arguments
/// * `lat` - Geodetic latitude in degrees
/// * `lon` - Longitude in degrees
/// * `wander_azimuth` - Rotation of the level axes in degrees
pub fn llh_to_dcm(lat: f64, lon: f64, wander_azimuth: f64) -> Matrix3<f64> {
    let (sin_lat, cos_lat) = (lat * DEG_TO_RAD).sin_cos();
    let (sin_lon, cos_lon) = (lon * DEG_TO_RAD).sin_cos();
    let (sin_wa, cos_wa) = (wander_azimuth * DEG_TO_RAD).sin_cos();

    // ECEF to geographic NED
    #[rustfmt::skip]
    let c_eg = Matrix3::new(
        -sin_lat * cos_lon, -sin_lat * sin_lon, cos_lat,
        -sin_lon, cos_lon, 0.0,
        -cos_lat * cos_lon, -cos_lat * sin_lon, -sin_lat,
    );

    // Geographic to wander-azimuth frame
    #[rustfmt::skip]
    let c_gn = Matrix3::new(
        cos_wa, sin_wa, 0.0,
        -sin_wa, cos_wa, 0.0,
        0.0, 0.0, 1.0,
    );

    c_gn * c_eg
}

/// Local tangent-plane frame anchored at a reference point
///
/// Holds the origin in ECEF and the rotation taking local axes to ECEF axes,
/// computed once at construction and reused for every conversion.
///
/// # Example
/// ```
/// use ahrs_nav::NavigationFrame;
///
/// let frame = NavigationFrame::from_origin(45.0, 7.0, 300.0);
/// let above = frame.llh_to_local(&ahrs_nav::Llh::new(45.0, 7.0, 310.0));
/// assert!((above.z + 10.0).abs() < 1e-6); // 10 m up is -10 m Down
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavigationFrame {
    /// Origin in ECEF
    origin: Vector3<f64>,
    /// Origin as a geodetic position
    origin_llh: Llh,
    /// Local-to-ECEF rotation
    rotation: Matrix3<f64>,
    /// Local axes convention
    convention: Convention,
    /// Rotation of the level axes about the vertical, degrees
    wander_azimuth: f64,
}

impl NavigationFrame {
    /// NED frame at a geodetic origin (degrees, degrees, metres)
    pub fn from_origin(lat: f64, lon: f64, height: f64) -> Self {
        Self::build(Llh::new(lat, lon, height), None, Convention::Ned, 0.0)
    }

    /// ENU frame at a geodetic origin (degrees, degrees, metres)
    pub fn from_origin_enu(lat: f64, lon: f64, height: f64) -> Self {
        Self::build(Llh::new(lat, lon, height), None, Convention::Enu, 0.0)
    }

    /// NED frame at an origin given in ECEF
    pub fn from_ecef(origin: Vector3<f64>) -> Self {
        Self::build(WGS84.to_llh(&origin), Some(origin), Convention::Ned, 0.0)
    }

    /// Same origin and convention with the level axes rotated by `wander_azimuth` degrees
    pub fn with_wander_azimuth(self, wander_azimuth: f64) -> Self {
        Self::build(self.origin_llh, Some(self.origin), self.convention, wander_azimuth)
    }

    /// Same origin with the axes in another convention
    pub fn with_convention(self, convention: Convention) -> Self {
        Self::build(self.origin_llh, Some(self.origin), convention, self.wander_azimuth)
    }

    fn build(origin_llh: Llh, origin: Option<Vector3<f64>>, convention: Convention, wander_azimuth: f64) -> Self {
        let ecef_to_ned = llh_to_dcm(origin_llh.lat, origin_llh.lon, wander_azimuth);
        let ecef_to_local = match convention {
            Convention::Ned => ecef_to_ned,
            Convention::Enu => NED_ENU * ecef_to_ned,
        };

        Self {
            origin: origin.unwrap_or_else(|| WGS84.to_ecef(&origin_llh)),
            origin_llh,
            rotation: ecef_to_local.transpose(),
            convention,
            wander_azimuth,
        }
    }

    /// Origin in ECEF
    pub fn origin(&self) -> Vector3<f64> {
        self.origin
    }

    /// Origin as a geodetic position
    pub fn origin_llh(&self) -> Llh {
        self.origin_llh
    }

    /// Rotation taking local-frame vectors to ECEF
    pub fn rotation(&self) -> Matrix3<f64> {
        self.rotation
    }

    /// Axes convention of this frame
    pub fn convention(&self) -> Convention {
        self.convention
    }

    /// Wander azimuth in degrees
    pub fn wander_azimuth(&self) -> f64 {
        self.wander_azimuth
    }

    /// ECEF point to local coordinates relative to the origin
    pub fn ecef_to_local(&self, ecef: &Vector3<f64>) -> Vector3<f64> {
        self.rotation.tr_mul(&(ecef - self.origin))
    }

    /// Local coordinates back to an ECEF point
    pub fn local_to_ecef(&self, local: &Vector3<f64>) -> Vector3<f64> {
        self.origin + self.rotation * local
    }

    /// Geodetic position to local coordinates
    pub fn llh_to_local(&self, position: &Llh) -> Vector3<f64> {
        self.ecef_to_local(&WGS84.to_ecef(position))
    }

    /// Local coordinates to geodetic position
    pub fn local_to_llh(&self, local: &Vector3<f64>) -> Llh {
        WGS84.to_llh(&self.local_to_ecef(local))
    }

    /// Re-express a NED vector in ENU axes
    pub fn ned_to_enu(ned: &Vector3<f64>) -> Vector3<f64> {
        NED_ENU * ned
    }

    /// Re-express an ENU vector in NED axes
    pub fn enu_to_ned(enu: &Vector3<f64>) -> Vector3<f64> {
        NED_ENU * enu
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_ned_enu_swap() {
        let ned = Vector3::new(500.0, 600.0, -400.0);
        let enu = NavigationFrame::ned_to_enu(&ned);
        assert_eq!(enu, Vector3::new(600.0, 500.0, 400.0));
        assert_eq!(NavigationFrame::enu_to_ned(&enu), ned);
        assert_eq!(NED_ENU, NED_ENU.transpose());
        assert_eq!(NED_ENU * NED_ENU, Matrix3::identity());
    }

    #[test]
    fn test_dcm_rows_at_equator() {
        let dcm = llh_to_dcm(0.0, 0.0, 0.0);
        // North = +Z, East = +Y, Down = -X in ECEF
        #[rustfmt::skip]
        let expected = Matrix3::new(
            0.0, 0.0, 1.0,
            0.0, 1.0, 0.0,
            -1.0, 0.0, 0.0,
        );
        assert_abs_diff_eq!(dcm, expected, epsilon = 1e-15);
    }

    #[test]
    fn test_dcm_is_orthonormal() {
        let dcm = llh_to_dcm(-33.9, 151.2, 25.0);
        assert_abs_diff_eq!(dcm * dcm.transpose(), Matrix3::identity(), epsilon = 1e-12);
        assert_abs_diff_eq!(dcm.determinant(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_origin_maps_to_zero() {
        let frame = NavigationFrame::from_origin(51.5, -0.12, 35.0);
        let local = frame.ecef_to_local(&frame.origin());
        assert_eq!(local, Vector3::zeros());
        assert_eq!(frame.origin_llh(), Llh::new(51.5, -0.12, 35.0));
    }

    #[test]
    fn test_vertical_offset() {
        let ned = NavigationFrame::from_origin(51.5, -0.12, 35.0);
        let above = Llh::new(51.5, -0.12, 135.0);
        assert_abs_diff_eq!(ned.llh_to_local(&above), Vector3::new(0.0, 0.0, -100.0), epsilon = 1e-6);

        let enu = NavigationFrame::from_origin_enu(51.5, -0.12, 35.0);
        assert_eq!(enu.convention(), Convention::Enu);
        assert_abs_diff_eq!(enu.llh_to_local(&above), Vector3::new(0.0, 0.0, 100.0), epsilon = 1e-6);
    }

    #[test]
    fn test_northward_offset() {
        let frame = NavigationFrame::from_origin(10.0, 20.0, 0.0);
        let north = frame.llh_to_local(&Llh::new(10.001, 20.0, 0.0));
        let expected = WGS84.meridian_radius(10.0) * 0.001 * DEG_TO_RAD;
        assert_abs_diff_eq!(north.x, expected, epsilon = 1e-3);
        assert_abs_diff_eq!(north.y, 0.0, epsilon = 1e-6);
        assert!(north.z > 0.0, "curvature should drop the point below the tangent plane");
    }

    #[test]
    fn test_wander_azimuth() {
        let frame = NavigationFrame::from_origin(10.0, 20.0, 0.0);
        let wander = frame.with_wander_azimuth(90.0);
        assert_eq!(wander.wander_azimuth(), 90.0);
        assert_eq!(wander.origin(), frame.origin());

        // Level axes turned a quarter turn: X points east, Y points south
        let east = frame.local_to_ecef(&Vector3::new(0.0, 50.0, 0.0));
        assert_abs_diff_eq!(wander.ecef_to_local(&east), Vector3::new(50.0, 0.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_from_ecef_matches_from_origin() {
        let from_llh = NavigationFrame::from_origin(-26.145055, 28.050255, 1660.86);
        let from_ecef = NavigationFrame::from_ecef(from_llh.origin());
        assert_abs_diff_eq!(from_ecef.rotation(), from_llh.rotation(), epsilon = 1e-12);
        assert_eq!(from_ecef.origin(), from_llh.origin());
    }

    #[test]
    fn test_local_round_trip() {
        let frame = NavigationFrame::from_origin_enu(35.0, 139.7, 40.0);
        let local = Vector3::new(1234.5, -678.9, 12.0);
        let ecef = frame.local_to_ecef(&local);
        assert_abs_diff_eq!(frame.ecef_to_local(&ecef), local, epsilon = 1e-6);

        let llh = frame.local_to_llh(&local);
        assert_abs_diff_eq!(frame.llh_to_local(&llh), local, epsilon = 1e-6);

        let ned = frame.with_convention(Convention::Ned);
        assert_abs_diff_eq!(
            ned.ecef_to_local(&ecef),
            NavigationFrame::enu_to_ned(&frame.ecef_to_local(&ecef)),
            epsilon = 1e-9
        );
    }
}

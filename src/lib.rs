//! AHRS Nav - attitude estimation and geodetic frames for navigation
//!
//! This library fuses gyroscope, accelerometer and magnetometer samples into an
//! orientation estimate, and places positions in the Earth-fixed and local
//! tangent-plane frames needed to use that orientation for navigation.
//!
//! # Features
//!
//! - Madgwick gradient-descent filter, 6-axis (IMU) and 9-axis (MARG)
//! - Optional online gyroscope bias estimation
//! - Stateless tilt-compensated compass
//! - WGS84 ellipsoid: LLH ↔ ECEF, normal gravity, radii of curvature, haversine
//! - NED/ENU local frames with optional wander azimuth
//!
//! # Conventions
//!
//! The filter quaternion rotates sensor-frame vectors into an earth frame with
//! X towards magnetic north and Z up. Headings are clockwise from north and
//! never negative. Geodetic angles are in degrees at every public boundary.
//!
//! # Quick Start
//!
//! ```rust
//! use nalgebra::Vector3;
//! use ahrs_nav::{AhrsFilter, NavigationFrame};
//!
//! let mut filter = AhrsFilter::new(0.1, None).unwrap();
//!
//! // Sensor readings
//! let accelerometer = Vector3::new(0.0, 0.0, 1.0);  // g
//! let gyroscope = Vector3::new(0.1, 0.2, 0.3);      // deg/s
//! let magnetometer = Vector3::new(20.0, 0.0, -40.0); // µT
//!
//! // Update the filter
//! filter.update(accelerometer, gyroscope, Some(magnetometer), 0.01).unwrap(); // 10ms
//!
//! // Roll, pitch and heading in degrees
//! let euler = filter.euler();
//! assert!(euler.heading >= 0.0 && euler.heading < 360.0);
//!
//! // Local frame around a reference position
//! let frame = NavigationFrame::from_origin(-26.145055, 28.050255, 1660.86);
//! let ned = frame.llh_to_local(&ahrs_nav::Llh::new(-26.145, 28.0503, 1650.0));
//! assert!(ned.x > 0.0);
//! ```

mod ahrs;
mod bias;
pub mod compass;
mod error;
pub mod frame;
mod math;
mod types;
pub mod wgs84;

// Re-export all public types and functions
pub use ahrs::AhrsFilter;
pub use error::{Error, Result};
pub use frame::NavigationFrame;
pub use math::{
    DEG_TO_RAD, NORM_EPSILON, QuaternionExt, RAD_TO_DEG, Vector3Ext, normalize_quaternion, normalize3,
    quaternion_to_euler,
};
pub use types::*;
pub use wgs84::{Ellipsoid, WGS84};

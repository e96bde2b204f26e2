use ahrs_nav::{AhrsFilter, Llh, NavigationFrame};
use nalgebra::Vector3;

const SAMPLE_PERIOD: f64 = 0.01; // 10 ms sample period

fn main() -> Result<(), ahrs_nav::Error> {
    let mut filter = AhrsFilter::new(0.1, None)?;

    for _ in 0..10 {
        // this loop should repeat each time new sensor data is available
        let accelerometer = Vector3::new(0.0, 0.0, 1.0); // replace this with actual accelerometer data in g
        let gyroscope = Vector3::new(0.0, 0.0, 0.0); // replace this with actual gyroscope data in degrees/s
        let magnetometer = Vector3::new(22.0, 0.0, -42.0); // replace this with actual magnetometer data in µT

        filter.update(accelerometer, gyroscope, Some(magnetometer), SAMPLE_PERIOD)?;

        let euler = filter.euler();
        println!(
            "Roll: {:.2}, Pitch: {:.2}, Heading: {:.2}",
            euler.roll, euler.pitch, euler.heading
        );
    }

    // Express a GPS fix relative to a local NED frame at the start position
    let frame = NavigationFrame::from_origin(-26.145055, 28.050255, 1660.86);
    let fix = Llh::new(-26.144, 28.0515, 1662.0);
    let ned = frame.llh_to_local(&fix);
    println!("North: {:.2} m, East: {:.2} m, Down: {:.2} m", ned.x, ned.y, ned.z);

    Ok(())
}

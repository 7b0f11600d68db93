//! Mathematical structs and functions.

use cgmath::{MetricSpace, Point2};

/// A 2D point
pub type Point2d = Point2<f64>;

/// Converts a speed in km/h to m/s.
pub fn kmh_to_ms(speed_kmh: f64) -> f64 {
    speed_kmh / 3.6
}

/// Computes the straight line distance between two points, in m,
/// and the time in s needed to cover it at `speed` m/s.
pub fn travel(from: Point2d, to: Point2d, speed: f64) -> (f64, f64) {
    let distance = from.distance(to);
    (distance, distance / speed)
}

#[cfg(test)]
mod test {
    use super::{kmh_to_ms, travel, Point2d};
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn travel_time_at_40_kmh() {
        let speed = kmh_to_ms(40.0);
        let (distance, time) = travel(Point2d::new(0.0, 200.0), Point2d::new(0.0, 450.0), speed);
        assert_approx_eq!(distance, 250.0);
        assert_approx_eq!(time, 22.5);

        let (distance, _) = travel(Point2d::new(0.0, 0.0), Point2d::new(30.0, 40.0), speed);
        assert_approx_eq!(distance, 50.0);
    }
}

use nalgebra::{Point3, Rotation3, Vector3};

/// In-plane displacement of `length` along the direction at `angle` (radians)
/// from the x axis, rotated about z.
pub fn lateral_shift(angle: f64, length: f64) -> Vector3<f64> {
    Rotation3::from_axis_angle(&Vector3::z_axis(), angle) * Vector3::x() * length
}

/// Arithmetic mean of the selected points, or `None` for an empty selection.
pub fn centroid<'a>(points: impl IntoIterator<Item = &'a Point3<f64>>) -> Option<Point3<f64>> {
    let (sum, count) = points
        .into_iter()
        .fold((Vector3::zeros(), 0usize), |(sum, n), p| (sum + p.coords, n + 1));
    (count > 0).then(|| Point3::from(sum / count as f64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_6;

    fn assert_vec_eq(a: Vector3<f64>, b: Vector3<f64>) {
        assert!((a - b).norm() < 1e-12, "{:?} != {:?}", a, b);
    }

    #[test]
    fn lateral_shift_follows_polar_convention() {
        assert_vec_eq(lateral_shift(0.0, 2.0), Vector3::new(2.0, 0.0, 0.0));
        assert_vec_eq(
            lateral_shift(FRAC_PI_6, 2.0),
            Vector3::new(3f64.sqrt(), 1.0, 0.0),
        );
    }

    #[test]
    fn centroid_averages_points() {
        let points = [Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 4.0, -6.0)];
        assert_eq!(centroid(&points), Some(Point3::new(1.0, 2.0, -3.0)));
        assert_eq!(centroid(&[]), None);
    }
}

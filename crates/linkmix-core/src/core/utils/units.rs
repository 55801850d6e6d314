//! Unit conversions into the atomic units stored in checkpoint files.

/// One ångström in bohr.
pub const ANGSTROM: f64 = 1.0 / 0.529_177_210_8;

/// One degree in radians.
pub const DEGREE: f64 = std::f64::consts::PI / 180.0;

#[inline]
pub fn angstrom_to_bohr(value: f64) -> f64 {
    value * ANGSTROM
}

#[inline]
pub fn bohr_to_angstrom(value: f64) -> f64 {
    value / ANGSTROM
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angstrom_matches_bohr_radius() {
        assert!((ANGSTROM - 1.889_726_124_993_589_7).abs() < 1e-12);
        assert!((bohr_to_angstrom(angstrom_to_bohr(2.5)) - 2.5).abs() < 1e-12);
    }

    #[test]
    fn degree_converts_right_angle() {
        assert!((90.0 * DEGREE - std::f64::consts::FRAC_PI_2).abs() < 1e-15);
    }
}

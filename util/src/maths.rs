//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

/// Clamp `value` into the range [`min`, `max`].
pub fn clamp<T>(value: &T, min: &T, max: &T) -> T 
where
    T: Float
{
    let mut ret = *value;

    if ret > *max {
        ret = *max
    }
    if ret < *min {
        ret = *min
    }

    ret
}

/// Wrap an angle in degrees into the half-open range (-180, 180].
///
/// Inputs are expected to be within (-540, 540], which is always the case for
/// the difference of two angles already in (-180, 180]. A value of exactly
/// -180 maps to 180.
pub fn wrap_deg_180<T>(value: T) -> T
where
    T: Float
{
    let half_turn = T::from(180.0).unwrap();
    let full_turn = half_turn + half_turn;

    if value > half_turn {
        value - full_turn
    }
    else if value <= -half_turn {
        value + full_turn
    }
    else {
        value
    }
}

/// Map a value in the range [-pi, pi] to [0, 2pi]
pub fn map_pi_to_2pi<T>(value: T) -> T 
where
    T: Float
{
    if value < T::zero() {
        T::from(std::f64::consts::TAU).unwrap() + value
    }
    else {
        value
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(&5f64, &0f64, &1f64), 1f64);
        assert_eq!(clamp(&-5f64, &0f64, &1f64), 0f64);
        assert_eq!(clamp(&0.5f64, &0f64, &1f64), 0.5f64);
    }

    #[test]
    fn test_wrap_deg_180() {
        assert_eq!(wrap_deg_180(0f64), 0f64);
        assert_eq!(wrap_deg_180(180f64), 180f64);
        assert_eq!(wrap_deg_180(-180f64), 180f64);
        assert_eq!(wrap_deg_180(270f64), -90f64);
        assert_eq!(wrap_deg_180(-270f64), 90f64);
        assert_eq!(wrap_deg_180(359f64), -1f64);
        assert_eq!(wrap_deg_180(-179.5f64), -179.5f64);
    }

    #[test]
    fn test_map_pi_to_2pi() {
        const PI: f64 = std::f64::consts::PI;

        assert_eq!(map_pi_to_2pi(0f64), 0f64);
        assert_eq!(map_pi_to_2pi(PI / 2.0), PI / 2.0);
        assert!((map_pi_to_2pi(-PI / 2.0) - 1.5 * PI).abs() < 1e-12);
    }
}

//! Turn angle between two consecutive legs

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use super::{GeometryError, Leg};
use util::maths::wrap_deg_180;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Change of heading needed to go from leg `u` onto leg `v`.
///
/// The angle is in degrees, in the range (-180, 180], positive for a turn to the right. A full
/// reversal gives 180.
pub fn turn_angle_deg(u: &Leg, v: &Leg) -> Result<f64, GeometryError> {
    let bearing_u_rad = u.bearing_rad()?;
    let bearing_v_rad = v.bearing_rad()?;

    Ok(wrap_deg_180((bearing_v_rad - bearing_u_rad).to_degrees()))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::waypoint::GeoWaypoint;

    fn leg(lat_0: f64, lon_0: f64, lat_1: f64, lon_1: f64) -> Leg {
        Leg::between(
            &GeoWaypoint::new(0, lat_0, lon_0),
            &GeoWaypoint::new(1, lat_1, lon_1),
        )
    }

    #[test]
    fn test_straight() {
        let u = leg(48.39, -4.486, 48.395, -4.48);
        assert_eq!(turn_angle_deg(&u, &u).unwrap(), 0.0);
    }

    #[test]
    fn test_right_and_left() {
        let north = leg(-1.0, 0.0, 0.0, 0.0);
        let east = leg(0.0, 0.0, 0.0, 1.0);
        let west = leg(0.0, 0.0, 0.0, -1.0);

        assert!((turn_angle_deg(&north, &east).unwrap() - 90.0).abs() < 1e-9);
        assert!((turn_angle_deg(&north, &west).unwrap() + 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_wraps_across_north() {
        // Heading 350 then heading 10 is a 20 degree right turn, not -340
        let u = leg(0.0, 0.0, 10f64.to_radians().cos(), -10f64.to_radians().sin());
        let v = leg(0.0, 0.0, 10f64.to_radians().cos(), 10f64.to_radians().sin());

        let theta = turn_angle_deg(&u, &v).unwrap();
        assert!(theta > 0.0 && theta < 180.0);
        assert!((theta - 20.0).abs() < 0.1);

        let theta = turn_angle_deg(&v, &u).unwrap();
        assert!((theta + 20.0).abs() < 0.1);
    }

    #[test]
    fn test_reversal_is_plus_180() {
        let east = leg(0.0, 0.0, 0.0, 1.0);
        let west = leg(0.0, 1.0, 0.0, 0.0);

        // Raw differences of +180 and -180 both map to +180
        assert_eq!(turn_angle_deg(&east, &west).unwrap(), 180.0);
        assert_eq!(turn_angle_deg(&west, &east).unwrap(), 180.0);
    }

    #[test]
    fn test_degenerate_leg() {
        let u = leg(48.0, -4.0, 48.0, -4.0);
        let v = leg(48.0, -4.0, 48.1, -4.0);

        assert_eq!(turn_angle_deg(&u, &v), Err(GeometryError::CoincidentPoints));
        assert_eq!(turn_angle_deg(&v, &u), Err(GeometryError::CoincidentPoints));
    }
}

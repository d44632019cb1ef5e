//! Great-circle bearing calculations

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Serialize;

use super::GeometryError;
use crate::waypoint::GeoWaypoint;
use util::maths::map_pi_to_2pi;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Smallest angular separation (radians) between the ends of a leg for its bearing to be defined.
///
/// Around 6 micrometers on the surface of the earth.
pub const MIN_LEG_SEPARATION_RAD: f64 = 1e-12;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A leg of travel between two geographic points.
///
/// Units: radians
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Leg {
    pub lat_start_rad: f64,
    pub lon_start_rad: f64,
    pub lat_end_rad: f64,
    pub lon_end_rad: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Leg {
    /// Leg travelling from `start` to `end`.
    pub fn between(start: &GeoWaypoint, end: &GeoWaypoint) -> Self {
        Self {
            lat_start_rad: start.lat_rad(),
            lon_start_rad: start.lon_rad(),
            lat_end_rad: end.lat_rad(),
            lon_end_rad: end.lon_rad(),
        }
    }

    /// Initial bearing of the leg in radians, in the range [-pi, pi].
    ///
    /// Fails if the ends of the leg coincide or any coordinate isn't finite.
    pub fn bearing_rad(&self) -> Result<f64, GeometryError> {
        let coords = [
            self.lat_start_rad,
            self.lon_start_rad,
            self.lat_end_rad,
            self.lon_end_rad,
        ];
        if coords.iter().any(|c| !c.is_finite()) {
            return Err(GeometryError::NonFinite);
        }

        let (x, y) = bearing_components(
            self.lat_start_rad,
            self.lon_start_rad,
            self.lat_end_rad,
            self.lon_end_rad,
        );

        // Both components vanish when the points are the same
        if x.hypot(y) < MIN_LEG_SEPARATION_RAD {
            return Err(GeometryError::CoincidentPoints);
        }

        Ok(y.atan2(x))
    }

    /// Compass heading of the leg in degrees, in the range [0, 360).
    pub fn heading_deg(&self) -> Result<f64, GeometryError> {
        let heading_deg = map_pi_to_2pi(self.bearing_rad()?).to_degrees();

        // -0 maps to 360 after rounding, keep it at 0
        if heading_deg >= 360.0 {
            Ok(heading_deg - 360.0)
        } else {
            Ok(heading_deg)
        }
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Initial bearing of the great circle going from point 1 to point 2.
///
/// All inputs are in radians, the output is in radians in [-pi, pi], measured clockwise from
/// north. The result is arbitrary if the points coincide, use [`Leg::bearing_rad`] to have that
/// case detected.
pub fn bearing_rad(lat_1_rad: f64, lon_1_rad: f64, lat_2_rad: f64, lon_2_rad: f64) -> f64 {
    let (x, y) = bearing_components(lat_1_rad, lon_1_rad, lat_2_rad, lon_2_rad);
    y.atan2(x)
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Northward (x) and eastward (y) components of the initial direction of travel.
fn bearing_components(lat_1_rad: f64, lon_1_rad: f64, lat_2_rad: f64, lon_2_rad: f64) -> (f64, f64) {
    let d_lon = lon_2_rad - lon_1_rad;

    let x = lat_1_rad.cos() * lat_2_rad.sin() - lat_1_rad.sin() * lat_2_rad.cos() * d_lon.cos();
    let y = d_lon.sin() * lat_2_rad.cos();

    (x, y)
}

#[cfg(test)]
mod test {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI, TAU};

    #[test]
    fn test_cardinal_bearings() {
        let one = 1f64.to_radians();

        // North along a meridian
        assert_eq!(bearing_rad(0.0, 0.0, one, 0.0), 0.0);
        // East along the equator
        assert_eq!(bearing_rad(0.0, 0.0, 0.0, one), FRAC_PI_2);
        // West along the equator
        assert_eq!(bearing_rad(0.0, 0.0, 0.0, -one), -FRAC_PI_2);
        // South along a meridian
        assert!((bearing_rad(0.0, 0.0, -one, 0.0).abs() - PI).abs() < 1e-12);
    }

    #[test]
    fn test_bearing_invariant_to_full_turn_of_longitude() {
        let lat_1 = 48.39f64.to_radians();
        let lon_1 = -4.486f64.to_radians();
        let lat_2 = 48.395f64.to_radians();
        let lon_2 = -4.48f64.to_radians();

        let b = bearing_rad(lat_1, lon_1, lat_2, lon_2);

        assert!((b - bearing_rad(lat_1, lon_1 + TAU, lat_2, lon_2 + TAU)).abs() < 1e-9);
        assert!((b - bearing_rad(lat_1, lon_1, lat_2, lon_2 + TAU)).abs() < 1e-9);
        assert!((b - bearing_rad(lat_1, lon_1 - TAU, lat_2, lon_2)).abs() < 1e-9);
    }

    #[test]
    fn test_leg_bearing() {
        let a = GeoWaypoint::new(0, 48.0, -4.0);
        let b = GeoWaypoint::new(1, 48.0, -3.0);

        // Great circle going east from 48 N starts slightly north of east
        let b_rad = Leg::between(&a, &b).bearing_rad().unwrap();
        assert!(b_rad > 0.0 && b_rad < FRAC_PI_2);

        // And the way back starts slightly north of west
        let h_deg = Leg::between(&b, &a).heading_deg().unwrap();
        assert!(h_deg > 270.0 && h_deg < 360.0);
    }

    #[test]
    fn test_leg_degenerate() {
        let a = GeoWaypoint::new(0, 48.0, -4.0);

        assert_eq!(
            Leg::between(&a, &a).bearing_rad(),
            Err(GeometryError::CoincidentPoints)
        );

        let nan = GeoWaypoint::new(1, std::f64::NAN, -4.0);
        assert_eq!(
            Leg::between(&a, &nan).bearing_rad(),
            Err(GeometryError::NonFinite)
        );
    }

    #[test]
    fn test_heading_range() {
        let origin = GeoWaypoint::new(0, 0.0, 0.0);
        let north = GeoWaypoint::new(1, 1.0, 0.0);
        let west = GeoWaypoint::new(2, 0.0, -1.0);

        assert_eq!(Leg::between(&origin, &north).heading_deg().unwrap(), 0.0);
        assert!((Leg::between(&origin, &west).heading_deg().unwrap() - 270.0).abs() < 1e-9);
    }
}

//! Trajectory analysis, turn angles at every interior waypoint of a survey

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::trace;
use serde::Serialize;

use super::{turn_angle_deg, GeometryError, Leg};
use crate::waypoint::GeoWaypoint;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Turn made at an interior waypoint of the survey.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TurnAngle {
    /// Index of the waypoint the turn is made at
    pub index: usize,

    /// Change of heading, positive to the right.
    ///
    /// Units: degrees, range (-180, 180]
    pub angle_deg: f64,
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Compute the turn angle at each interior waypoint.
///
/// The first and last waypoints have no turn, so `N` waypoints give `N - 2` angles in waypoint
/// order, and fewer than 3 waypoints give none.
pub fn find_trajectory(waypoints: &[GeoWaypoint]) -> Result<Vec<TurnAngle>, GeometryError> {
    waypoints
        .windows(3)
        .map(|wps| {
            let u = Leg::between(&wps[0], &wps[1]);
            let v = Leg::between(&wps[1], &wps[2]);

            let angle_deg = turn_angle_deg(&u, &v)?;

            trace!("Turn of {:.3} deg at waypoint {}", angle_deg, wps[1].index);

            Ok(TurnAngle {
                index: wps[1].index,
                angle_deg,
            })
        })
        .collect()
}

/// Compass heading in degrees of every leg of the survey, `N - 1` values for `N` waypoints.
pub fn leg_headings_deg(waypoints: &[GeoWaypoint]) -> Result<Vec<f64>, GeometryError> {
    waypoints
        .windows(2)
        .map(|wps| Leg::between(&wps[0], &wps[1]).heading_deg())
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    fn survey(coords: &[(f64, f64)]) -> Vec<GeoWaypoint> {
        coords
            .iter()
            .enumerate()
            .map(|(i, (lat, lon))| GeoWaypoint::new(i, *lat, *lon))
            .collect()
    }

    #[test]
    fn test_number_of_angles() {
        let coords = [
            (48.390, -4.486),
            (48.391, -4.486),
            (48.391, -4.485),
            (48.390, -4.485),
            (48.390, -4.484),
            (48.391, -4.484),
        ];

        for n in 0..=coords.len() {
            let angles = find_trajectory(&survey(&coords[..n])).unwrap();
            assert_eq!(angles.len(), n.saturating_sub(2));
            for (i, a) in angles.iter().enumerate() {
                assert_eq!(a.index, i + 1);
                assert!(a.angle_deg > -180.0 && a.angle_deg <= 180.0);
            }
        }
    }

    #[test]
    fn test_right_angle_turn() {
        // North up the prime meridian to the equator then east along it
        let wps = survey(&[(-1.0, 0.0), (0.0, 0.0), (0.0, 1.0), (0.0, 2.0)]);

        let angles = find_trajectory(&wps).unwrap();

        assert_eq!(angles.len(), 2);
        assert_eq!(angles[0].index, 1);
        assert!((angles[0].angle_deg - 90.0).abs() < 1e-6);
        assert_eq!(angles[1].index, 2);
        assert!(angles[1].angle_deg.abs() < 1e-6);
    }

    #[test]
    fn test_lawnmower_alternates() {
        // Survey lines going north then south, stepping east between lines
        let wps = survey(&[
            (48.390, -4.486),
            (48.395, -4.486),
            (48.395, -4.485),
            (48.390, -4.485),
            (48.390, -4.484),
            (48.395, -4.484),
        ]);

        let angles: Vec<f64> = find_trajectory(&wps)
            .unwrap()
            .iter()
            .map(|a| a.angle_deg)
            .collect();

        // Right, right, left, left
        assert!(angles[0] > 80.0 && angles[0] < 100.0);
        assert!(angles[1] > 80.0 && angles[1] < 100.0);
        assert!(angles[2] < -80.0 && angles[2] > -100.0);
        assert!(angles[3] < -80.0 && angles[3] > -100.0);
    }

    #[test]
    fn test_repeated_waypoint_is_an_error() {
        let wps = survey(&[(48.39, -4.486), (48.39, -4.486), (48.40, -4.486)]);

        assert_eq!(find_trajectory(&wps), Err(GeometryError::CoincidentPoints));
    }

    #[test]
    fn test_leg_headings() {
        let wps = survey(&[(-1.0, 0.0), (0.0, 0.0), (0.0, 1.0)]);

        let headings = leg_headings_deg(&wps).unwrap();

        assert_eq!(headings.len(), 2);
        assert_eq!(headings[0], 0.0);
        assert!((headings[1] - 90.0).abs() < 1e-9);
        assert!(leg_headings_deg(&wps[..1]).unwrap().is_empty());
    }
}

//! Trajectory adaptation, replaces sharp corners of a survey with giration arcs

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::{debug, warn};

use super::{giration, GirationParams};
use crate::{traj::GeometryError, waypoint::PlanarWaypoint};

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Adapt a planar survey into a trajectory the vehicle can follow.
///
/// Every interior waypoint where the heading changes by at least `params.min_turn_deg` is
/// replaced by the points of its giration (entry being the previous waypoint and exit the next
/// one). Other waypoints are kept as they are. The output is renumbered from 0.
///
/// An arc is only used if both its tangent points lie on their legs, and the one on the incoming
/// leg lies after the end of the previous arc. Otherwise the corner is kept, so the trajectory
/// never goes back along a leg.
pub fn adapt_trajectory(
    waypoints: &[PlanarWaypoint],
    params: &GirationParams,
) -> Result<Vec<PlanarWaypoint>, GeometryError> {
    params.validate()?;

    let mut points = Vec::with_capacity(waypoints.len());
    let mut num_girations = 0;

    // Length at the end of the incoming leg taken up by the previous arc
    let mut used_in_m = 0.0;

    for (i, wp) in waypoints.iter().enumerate() {
        // First and last waypoints have no corner
        if i == 0 || i + 1 == waypoints.len() {
            points.push(*wp);
            continue;
        }

        let g = giration(&waypoints[i - 1], wp, &waypoints[i + 1], params)?;

        if g.turn_deg.abs() < params.min_turn_deg || g.waypoints.is_empty() {
            points.push(*wp);
            used_in_m = 0.0;
            continue;
        }

        let free_in_m = waypoints[i - 1].distance_to(wp) - used_in_m;
        let free_out_m = wp.distance_to(&waypoints[i + 1]);

        if g.tangent_dist_m > free_in_m || g.tangent_dist_m > free_out_m {
            warn!(
                "Keeping the corner at waypoint {}: its arc needs {:.1} m along each leg, only \
                {:.1} m in and {:.1} m out are free",
                wp.index, g.tangent_dist_m, free_in_m, free_out_m
            );
            points.push(*wp);
            used_in_m = 0.0;
            continue;
        }

        points.extend(g.waypoints);
        used_in_m = g.tangent_dist_m;
        num_girations += 1;
    }

    debug!(
        "Adapted trajectory has {} points ({} girations over {} waypoints)",
        points.len(),
        num_girations,
        waypoints.len()
    );

    Ok(points
        .into_iter()
        .enumerate()
        .map(|(i, p)| PlanarWaypoint::new(i, p.easting_m, p.northing_m))
        .collect())
}

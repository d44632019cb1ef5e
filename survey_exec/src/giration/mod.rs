//! # Giration module
//!
//! A giration is the turning maneuver joining the leg arriving at a waypoint to the leg leaving
//! it, so the vehicle is already on the right heading when it starts the next acquisition line.
//!
//! The maneuver is a circular arc of radius `r = d/2 + margin`, where `d` is the distance between
//! the entry and exit waypoints, tangent to both legs (a fillet of the corner at the pivot):
//!
//! ```text
//!   entry          exit
//!      \           /
//!       T1 . . . T2        T1, T2: tangent points, the first and last points of the arc
//!        \  C    /         C: centre of the arc, on the bisector of the corner
//!         \     /
//!          pivot
//! ```

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod adapt;
mod params;

// ---------------------------------------------------------------------------
// EXPORTS
// ---------------------------------------------------------------------------

pub use adapt::*;
pub use params::*;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::{debug, warn};
use nalgebra::Vector2;
use serde::Serialize;
use std::f64::consts::PI;

use crate::{traj::GeometryError, waypoint::PlanarWaypoint};
use util::maths::clamp;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Number of waypoints defining a giration (entry, pivot, exit).
pub const NUM_GIRATION_WAYPOINTS: usize = 3;

/// Legs shorter than this are treated as having coincident ends.
///
/// Units: meters
const MIN_LEG_LENGTH_M: f64 = 1e-6;

/// Corner angles closer than this to 0 (reversal) or pi (straight on) are treated as such.
///
/// Units: radians
const ANGLE_EPSILON_RAD: f64 = 1e-9;

/// Most segments a single arc is sampled into, whatever the spacing asked for.
pub const MAX_ARC_SEGMENTS: usize = 10_000;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A turning maneuver at a pivot waypoint.
#[derive(Debug, Clone, Serialize)]
pub struct Giration {
    /// Index of the pivot waypoint
    pub pivot_index: usize,

    /// Distance between the entry and exit waypoints.
    ///
    /// Units: meters
    pub distance_m: f64,

    /// Radius of the turning arc, `distance_m / 2 + margin`.
    ///
    /// Units: meters
    pub radius_m: f64,

    /// Change of heading over the maneuver, positive for a turn to the right (clockwise).
    ///
    /// Units: degrees, range (-180, 180)
    pub turn_deg: f64,

    /// Distance from the pivot to each tangent point, along the legs. Zero if the legs are
    /// aligned.
    ///
    /// Units: meters
    pub tangent_dist_m: f64,

    /// Centre of the turning arc, `None` if the legs are aligned and no turn is needed.
    ///
    /// Units: meters
    pub centre_m: Option<Vector2<f64>>,

    /// Points of the arc from the incoming tangent point to the outgoing one, numbered from 0.
    ///
    /// Empty if the legs are aligned.
    pub waypoints: Vec<PlanarWaypoint>,
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Radius of the turning arc between the entry and exit waypoints.
///
/// `r = distance(entry, exit) / 2 + margin_m`
pub fn giration_radius(entry: &PlanarWaypoint, exit: &PlanarWaypoint, margin_m: f64) -> f64 {
    entry.distance_to(exit) / 2.0 + margin_m
}

/// Build the giration from a slice of exactly three waypoints, entry, pivot and exit.
pub fn giration_from_slice(
    waypoints: &[PlanarWaypoint],
    params: &GirationParams,
) -> Result<Giration, GeometryError> {
    match waypoints {
        [entry, pivot, exit] => giration(entry, pivot, exit, params),
        _ => Err(GeometryError::WrongNumberOfWaypoints {
            expected: NUM_GIRATION_WAYPOINTS,
            found: waypoints.len(),
        }),
    }
}

/// Build the giration turning from the leg `entry -> pivot` onto the leg `pivot -> exit`.
pub fn giration(
    entry: &PlanarWaypoint,
    pivot: &PlanarWaypoint,
    exit: &PlanarWaypoint,
    params: &GirationParams,
) -> Result<Giration, GeometryError> {
    params.validate()?;

    let pivot_m = pivot.position_m();
    let to_entry = entry.position_m() - pivot_m;
    let to_exit = exit.position_m() - pivot_m;

    let coords = [
        entry.easting_m,
        entry.northing_m,
        pivot.easting_m,
        pivot.northing_m,
        exit.easting_m,
        exit.northing_m,
    ];
    if coords.iter().any(|c| !c.is_finite()) {
        return Err(GeometryError::NonFinite);
    }

    let len_in_m = to_entry.norm();
    let len_out_m = to_exit.norm();
    if len_in_m < MIN_LEG_LENGTH_M || len_out_m < MIN_LEG_LENGTH_M {
        return Err(GeometryError::CoincidentPoints);
    }

    let distance_m = entry.distance_to(exit);
    let radius_m = giration_radius(entry, exit, params.margin_m);

    debug!(
        "Giration at waypoint {}: d = {:.3} m, r = {:.3} m",
        pivot.index, distance_m, radius_m
    );

    // Unit vectors pointing back along the incoming leg and forward along the outgoing one
    let dir_entry = to_entry / len_in_m;
    let dir_exit = to_exit / len_out_m;

    // Interior angle of the corner at the pivot
    let corner_rad = clamp(&dir_entry.dot(&dir_exit), &-1.0, &1.0).acos();

    if corner_rad < ANGLE_EPSILON_RAD {
        return Err(GeometryError::Reversal(pivot.index));
    }

    if PI - corner_rad < ANGLE_EPSILON_RAD {
        return Ok(Giration {
            pivot_index: pivot.index,
            distance_m,
            radius_m,
            turn_deg: 0.0,
            tangent_dist_m: 0.0,
            centre_m: None,
            waypoints: Vec::new(),
        });
    }

    // Heading change magnitude, and its direction from the sign of heading_in x heading_out,
    // positive being anticlockwise in the (easting, northing) plane
    let heading_in = -dir_entry;
    let cross = heading_in.x * dir_exit.y - heading_in.y * dir_exit.x;
    let sweep_rad = (PI - corner_rad).copysign(cross);

    let half_corner_rad = corner_rad / 2.0;
    let tangent_dist_m = radius_m / half_corner_rad.tan();
    let centre_dist_m = radius_m / half_corner_rad.sin();

    let bisector = (dir_entry + dir_exit).normalize();
    let centre_m = pivot_m + centre_dist_m * bisector;
    let start_m = pivot_m + tangent_dist_m * dir_entry;

    if tangent_dist_m > len_in_m || tangent_dist_m > len_out_m {
        debug!(
            "Giration at waypoint {} starts {:.1} m from the pivot, beyond the legs ({:.1} m in, \
            {:.1} m out)",
            pivot.index, tangent_dist_m, len_in_m, len_out_m
        );
    }

    let waypoints = sample_arc(
        centre_m,
        radius_m,
        start_m - centre_m,
        sweep_rad,
        params.arc_point_sep_m,
    );

    Ok(Giration {
        pivot_index: pivot.index,
        distance_m,
        radius_m,
        turn_deg: -sweep_rad.to_degrees(),
        tangent_dist_m,
        centre_m: Some(centre_m),
        waypoints,
    })
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Sample an arc around `centre_m`, starting at `centre_m + start_offset_m` and sweeping
/// `sweep_rad` (anticlockwise positive), with at most `point_sep_m` between points.
///
/// Both ends of the arc are included. Arcs needing more than `MAX_ARC_SEGMENTS` segments are
/// sampled more coarsely than asked.
fn sample_arc(
    centre_m: Vector2<f64>,
    radius_m: f64,
    start_offset_m: Vector2<f64>,
    sweep_rad: f64,
    point_sep_m: f64,
) -> Vec<PlanarWaypoint> {
    let start_angle_rad = start_offset_m.y.atan2(start_offset_m.x);
    let arc_length_m = sweep_rad.abs() * radius_m;
    let wanted = (arc_length_m / point_sep_m).ceil();
    let num_segments = if wanted > MAX_ARC_SEGMENTS as f64 {
        warn!(
            "Arc of {:.1} m needs {} points at {} m spacing, limiting to {}",
            arc_length_m,
            wanted,
            point_sep_m,
            MAX_ARC_SEGMENTS + 1
        );
        MAX_ARC_SEGMENTS
    } else {
        (wanted as usize).max(1)
    };

    (0..=num_segments)
        .map(|i| {
            let angle_rad = start_angle_rad + sweep_rad * i as f64 / num_segments as f64;
            PlanarWaypoint::from_position(
                i,
                centre_m + radius_m * Vector2::new(angle_rad.cos(), angle_rad.sin()),
            )
        })
        .collect()
}

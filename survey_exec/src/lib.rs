//! # Survey library.
//!
//! Adapts the waypoints of a survey mission into a trajectory for the Ulysse vehicle: headings
//! and turn angles along the survey, projection of the waypoints into a planar reference system
//! and turning maneuvers (girations) at the corners.
//!
//! The pipeline is linear, each stage only uses the output of the previous ones:
//!
//! 1. [`loader`] reads the geographic waypoints from a mission file,
//! 2. [`traj`] computes the bearing of each leg and the turn at each interior waypoint,
//! 3. [`proj`] projects the waypoints into a planar system,
//! 4. [`giration`] builds the turning arcs on the planar waypoints.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Turning maneuvers - arcs joining consecutive legs of the survey
pub mod giration;

/// Waypoint loader - reads surveys from mission files
pub mod loader;

/// Executable parameters
pub mod params;

/// Projection - geographic to planar coordinates
pub mod proj;

/// Trajectory - bearings and turn angles
pub mod traj;

/// Waypoint types
pub mod waypoint;

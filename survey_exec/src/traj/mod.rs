//! # Trajectory module
//!
//! Headings and turn angles along a survey. Bearings are great-circle initial bearings measured
//! clockwise from north, turn angles are the change of bearing at a waypoint in degrees, positive
//! for a turn to the right (clockwise).

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod analyser;
mod bearing;
mod turn_angle;

// ---------------------------------------------------------------------------
// EXPORTS
// ---------------------------------------------------------------------------

pub use analyser::*;
pub use bearing::*;
pub use turn_angle::*;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors raised by degenerate geometry.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum GeometryError {
    #[error("The start and end of the leg coincide, its bearing is undefined")]
    CoincidentPoints,

    #[error("Got a non-finite coordinate")]
    NonFinite,

    #[error("A turning maneuver needs exactly {expected} waypoints, found {found}")]
    WrongNumberOfWaypoints { expected: usize, found: usize },

    #[error("The legs at waypoint {0} reverse onto each other, no turning arc can join them")]
    Reversal(usize),

    #[error("Invalid maneuver parameter {0}: {1}")]
    InvalidParameter(&'static str, f64),
}

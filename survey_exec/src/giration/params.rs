//! Parameters structure for the turning maneuver generator

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use crate::traj::GeometryError;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Clearance added to half the entry-exit distance to get the turning radius.
///
/// Units: meters
pub const DEFAULT_GIRATION_MARGIN_M: f64 = 3.0;

/// Units: meters
pub const DEFAULT_ARC_POINT_SEP_M: f64 = 1.0;

/// Finest spacing accepted between the points of an arc.
///
/// Units: meters
pub const MIN_ARC_POINT_SEP_M: f64 = 0.01;

/// Units: degrees
pub const DEFAULT_MIN_GIRATION_TURN_DEG: f64 = 30.0;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for turning maneuvers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GirationParams {
    /// Clearance added to half the entry-exit distance to get the turning radius.
    ///
    /// Units: meters, same as the planar projection
    pub margin_m: f64,

    /// Maximum distance between two consecutive points of a generated arc.
    ///
    /// Units: meters
    pub arc_point_sep_m: f64,

    /// Smallest absolute turn at a waypoint for it to be replaced by an arc when adapting a
    /// trajectory. Gentler turns are left as they are.
    ///
    /// Units: degrees
    pub min_turn_deg: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl GirationParams {
    /// Check the parameters describe a usable maneuver.
    pub fn validate(&self) -> Result<(), GeometryError> {
        if !(self.margin_m.is_finite() && self.margin_m > 0.0) {
            return Err(GeometryError::InvalidParameter("margin_m", self.margin_m));
        }
        if !(self.arc_point_sep_m.is_finite() && self.arc_point_sep_m >= MIN_ARC_POINT_SEP_M) {
            return Err(GeometryError::InvalidParameter(
                "arc_point_sep_m",
                self.arc_point_sep_m,
            ));
        }
        if !(self.min_turn_deg >= 0.0 && self.min_turn_deg <= 180.0) {
            return Err(GeometryError::InvalidParameter(
                "min_turn_deg",
                self.min_turn_deg,
            ));
        }

        Ok(())
    }
}

impl Default for GirationParams {
    fn default() -> Self {
        Self {
            margin_m: DEFAULT_GIRATION_MARGIN_M,
            arc_point_sep_m: DEFAULT_ARC_POINT_SEP_M,
            min_turn_deg: DEFAULT_MIN_GIRATION_TURN_DEG,
        }
    }
}

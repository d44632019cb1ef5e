//! # Waypoints
//!
//! Geographic waypoints as read from a survey file, and their image in a planar projection.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A survey waypoint in geographic coordinates.
///
/// Coordinates are decimal degrees, as found in mission files.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoWaypoint {
    /// Position of the waypoint in the survey, starting at 0
    pub index: usize,

    /// Latitude, positive north.
    ///
    /// Units: degrees
    pub lat_deg: f64,

    /// Longitude, positive east.
    ///
    /// Units: degrees
    pub lon_deg: f64,
}

/// A waypoint in a planar projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanarWaypoint {
    /// Index of the geographic waypoint this point was projected from
    pub index: usize,

    /// Units: meters
    pub easting_m: f64,

    /// Units: meters
    pub northing_m: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl GeoWaypoint {
    pub fn new(index: usize, lat_deg: f64, lon_deg: f64) -> Self {
        Self {
            index,
            lat_deg,
            lon_deg,
        }
    }

    pub fn lat_rad(&self) -> f64 {
        self.lat_deg.to_radians()
    }

    pub fn lon_rad(&self) -> f64 {
        self.lon_deg.to_radians()
    }
}

impl PlanarWaypoint {
    pub fn new(index: usize, easting_m: f64, northing_m: f64) -> Self {
        Self {
            index,
            easting_m,
            northing_m,
        }
    }

    /// Build a waypoint from a position vector (easting, northing).
    pub fn from_position(index: usize, position_m: Vector2<f64>) -> Self {
        Self::new(index, position_m[0], position_m[1])
    }

    /// Position as a vector of (easting, northing).
    pub fn position_m(&self) -> Vector2<f64> {
        Vector2::new(self.easting_m, self.northing_m)
    }

    /// Euclidean distance to another planar waypoint.
    pub fn distance_to(&self, other: &Self) -> f64 {
        (other.position_m() - self.position_m()).norm()
    }
}

//! # Projection module
//!
//! Converts waypoints between geographic coordinates and a planar projection. Only the French
//! conformal conic projections on RGF93 are supported, their parameters are built in so no
//! external projection database is needed.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod lcc;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::debug;

use crate::waypoint::{GeoWaypoint, PlanarWaypoint};
pub use lcc::{ConicParams, Ellipsoid, LambertConic, GRS80};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// EPSG code of Lambert-93, the default projection.
pub const LAMBERT_93_EPSG: u32 = 2154;

/// EPSG codes of the first and last of the nine conic conformal zones (CC42 to CC50).
pub const CC_ZONES_EPSG: (u32, u32) = (3942, 3950);

/// Longitude band in which all supported projections are valid.
///
/// Units: degrees
const FRANCE_LON_RANGE_DEG: (f64, f64) = (-9.86, 10.38);

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Geographic area in which a projection may be used.
///
/// Units: degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    pub lat_min_deg: f64,
    pub lat_max_deg: f64,
    pub lon_min_deg: f64,
    pub lon_max_deg: f64,
}

/// A coordinate reference system with its projection.
#[derive(Debug, Clone, Copy)]
pub struct Crs {
    pub epsg: u32,
    pub name: &'static str,
    pub domain: Domain,
    projection: LambertConic,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ProjectionError {
    #[error("EPSG:{0} is not a supported coordinate reference system")]
    UnsupportedCrs(u32),

    #[error(
        "Waypoint {index} ({lat_deg}, {lon_deg}) is outside the domain of validity of EPSG:{epsg}"
    )]
    OutsideDomain {
        index: usize,
        lat_deg: f64,
        lon_deg: f64,
        epsg: u32,
    },

    #[error("Planar waypoint {index} ({easting_m}, {northing_m}) cannot be converted back by EPSG:{epsg}")]
    NotInvertible {
        index: usize,
        easting_m: f64,
        northing_m: f64,
        epsg: u32,
    },
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Domain {
    /// True if the point lies in the domain, always false for non-finite coordinates.
    pub fn contains(&self, lat_deg: f64, lon_deg: f64) -> bool {
        lat_deg >= self.lat_min_deg
            && lat_deg <= self.lat_max_deg
            && lon_deg >= self.lon_min_deg
            && lon_deg <= self.lon_max_deg
    }
}

impl Crs {
    /// Get the reference system for an EPSG code.
    pub fn from_epsg(epsg: u32) -> Result<Self, ProjectionError> {
        if epsg == LAMBERT_93_EPSG {
            return Ok(Self {
                epsg,
                name: "RGF93 / Lambert-93",
                domain: Domain {
                    lat_min_deg: 41.15,
                    lat_max_deg: 51.56,
                    lon_min_deg: FRANCE_LON_RANGE_DEG.0,
                    lon_max_deg: FRANCE_LON_RANGE_DEG.1,
                },
                projection: LambertConic::new(&ConicParams {
                    ellipsoid: GRS80,
                    lat_origin_deg: 46.5,
                    lon_origin_deg: 3.0,
                    std_parallel_1_deg: 49.0,
                    std_parallel_2_deg: 44.0,
                    false_easting_m: 700_000.0,
                    false_northing_m: 6_600_000.0,
                }),
            });
        }

        if epsg >= CC_ZONES_EPSG.0 && epsg <= CC_ZONES_EPSG.1 {
            // Zone number is the latitude of origin, the standard parallels sit 0.75 deg either
            // side of it and each zone's false northing is a million meters above the previous
            let zone = epsg - 3900;
            let lat_origin_deg = zone as f64;

            return Ok(Self {
                epsg,
                name: CC_ZONE_NAMES[(epsg - CC_ZONES_EPSG.0) as usize],
                domain: Domain {
                    lat_min_deg: lat_origin_deg - 1.0,
                    lat_max_deg: lat_origin_deg + 1.0,
                    lon_min_deg: FRANCE_LON_RANGE_DEG.0,
                    lon_max_deg: FRANCE_LON_RANGE_DEG.1,
                },
                projection: LambertConic::new(&ConicParams {
                    ellipsoid: GRS80,
                    lat_origin_deg,
                    lon_origin_deg: 3.0,
                    std_parallel_1_deg: lat_origin_deg - 0.75,
                    std_parallel_2_deg: lat_origin_deg + 0.75,
                    false_easting_m: 1_700_000.0,
                    false_northing_m: (zone - 41) as f64 * 1_000_000.0 + 200_000.0,
                }),
            });
        }

        Err(ProjectionError::UnsupportedCrs(epsg))
    }

    /// Project a single geographic waypoint, keeping its index.
    pub fn project(&self, wp: &GeoWaypoint) -> Result<PlanarWaypoint, ProjectionError> {
        if !self.domain.contains(wp.lat_deg, wp.lon_deg) {
            return Err(ProjectionError::OutsideDomain {
                index: wp.index,
                lat_deg: wp.lat_deg,
                lon_deg: wp.lon_deg,
                epsg: self.epsg,
            });
        }

        let (easting_m, northing_m) = self.projection.forward(wp.lat_rad(), wp.lon_rad());

        Ok(PlanarWaypoint::new(wp.index, easting_m, northing_m))
    }

    /// Convert a planar waypoint back to geographic coordinates, keeping its index.
    pub fn unproject(&self, wp: &PlanarWaypoint) -> Result<GeoWaypoint, ProjectionError> {
        let err = ProjectionError::NotInvertible {
            index: wp.index,
            easting_m: wp.easting_m,
            northing_m: wp.northing_m,
            epsg: self.epsg,
        };

        if !wp.easting_m.is_finite() || !wp.northing_m.is_finite() {
            return Err(err);
        }

        match self.projection.inverse(wp.easting_m, wp.northing_m) {
            Some((lat_rad, lon_rad)) if lat_rad.is_finite() && lon_rad.is_finite() => Ok(
                GeoWaypoint::new(wp.index, lat_rad.to_degrees(), lon_rad.to_degrees()),
            ),
            _ => Err(err),
        }
    }
}

// ---------------------------------------------------------------------------
// STATICS
// ---------------------------------------------------------------------------

static CC_ZONE_NAMES: [&str; 9] = [
    "RGF93 / CC42",
    "RGF93 / CC43",
    "RGF93 / CC44",
    "RGF93 / CC45",
    "RGF93 / CC46",
    "RGF93 / CC47",
    "RGF93 / CC48",
    "RGF93 / CC49",
    "RGF93 / CC50",
];

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Project every waypoint of a survey into the planar reference system.
///
/// The output has one waypoint per input, in the same order and with the same indices. The
/// whole conversion fails on the first waypoint outside the projection's domain.
pub fn convert_to_planar(
    waypoints: &[GeoWaypoint],
    crs: &Crs,
) -> Result<Vec<PlanarWaypoint>, ProjectionError> {
    let planar = waypoints
        .iter()
        .map(|wp| crs.project(wp))
        .collect::<Result<Vec<_>, _>>()?;

    debug!("Projected {} waypoints into {}", planar.len(), crs.name);

    Ok(planar)
}

/// Convert planar waypoints back into geographic coordinates.
pub fn convert_to_geo(
    waypoints: &[PlanarWaypoint],
    crs: &Crs,
) -> Result<Vec<GeoWaypoint>, ProjectionError> {
    waypoints.iter().map(|wp| crs.unproject(wp)).collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_from_epsg() {
        assert_eq!(Crs::from_epsg(2154).unwrap().name, "RGF93 / Lambert-93");
        assert_eq!(Crs::from_epsg(3946).unwrap().name, "RGF93 / CC46");
        assert_eq!(Crs::from_epsg(3942).unwrap().name, "RGF93 / CC42");
        assert_eq!(Crs::from_epsg(3950).unwrap().name, "RGF93 / CC50");

        for code in [4326, 3941, 3951, 0].iter() {
            match Crs::from_epsg(*code) {
                Err(ProjectionError::UnsupportedCrs(c)) => assert_eq!(c, *code),
                r => panic!("Expected EPSG:{} to be unsupported, got {:?}", code, r),
            }
        }
    }

    #[test]
    fn test_cc_zone_origin() {
        let crs = Crs::from_epsg(3946).unwrap();
        let p = crs.project(&GeoWaypoint::new(0, 46.0, 3.0)).unwrap();

        assert!((p.easting_m - 1_700_000.0).abs() < 1e-6);
        assert!((p.northing_m - 5_200_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_convert_keeps_indices_and_order() {
        let crs = Crs::from_epsg(LAMBERT_93_EPSG).unwrap();
        let wps = vec![
            GeoWaypoint::new(0, 48.390, -4.486),
            GeoWaypoint::new(1, 48.395, -4.486),
            GeoWaypoint::new(2, 48.395, -4.480),
        ];

        let planar = convert_to_planar(&wps, &crs).unwrap();

        assert_eq!(planar.len(), wps.len());
        for (geo, p) in wps.iter().zip(planar.iter()) {
            assert_eq!(geo.index, p.index);
        }

        // Going north increases the northing, going east increases the easting
        assert!(planar[1].northing_m > planar[0].northing_m);
        assert!(planar[2].easting_m > planar[1].easting_m);

        // 0.005 deg of latitude is roughly 556 m
        let d = planar[0].distance_to(&planar[1]);
        assert!(d > 550.0 && d < 560.0, "d = {}", d);
    }

    #[test]
    fn test_outside_domain() {
        let crs = Crs::from_epsg(LAMBERT_93_EPSG).unwrap();
        let wps = vec![
            GeoWaypoint::new(0, 48.39, -4.486),
            GeoWaypoint::new(1, 40.0, -4.486),
        ];

        assert_eq!(
            convert_to_planar(&wps, &crs),
            Err(ProjectionError::OutsideDomain {
                index: 1,
                lat_deg: 40.0,
                lon_deg: -4.486,
                epsg: 2154
            })
        );

        let nan = GeoWaypoint::new(3, std::f64::NAN, 2.0);
        assert!(crs.project(&nan).is_err());

        // Lambert-93 is fine in Brittany but a CC zone is narrow
        let cc42 = Crs::from_epsg(3942).unwrap();
        assert!(cc42.project(&wps[0]).is_err());
    }

    #[test]
    fn test_round_trip_to_geo() {
        let crs = Crs::from_epsg(LAMBERT_93_EPSG).unwrap();
        let wps = vec![
            GeoWaypoint::new(0, 48.390, -4.486),
            GeoWaypoint::new(1, 43.2965, 5.3698),
        ];

        let geo = convert_to_geo(&convert_to_planar(&wps, &crs).unwrap(), &crs).unwrap();

        for (a, b) in wps.iter().zip(geo.iter()) {
            assert_eq!(a.index, b.index);
            assert!((a.lat_deg - b.lat_deg).abs() < 1e-9);
            assert!((a.lon_deg - b.lon_deg).abs() < 1e-9);
        }

        let bad = PlanarWaypoint::new(7, std::f64::INFINITY, 0.0);
        assert!(crs.unproject(&bad).is_err());
    }
}

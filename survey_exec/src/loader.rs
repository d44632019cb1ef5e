//! # Waypoint loader
//!
//! Reads the waypoints of a survey from a tab separated mission file. The first line of the file
//! is a header and is always skipped, latitude and longitude are read from the 9th and 10th
//! columns of every other line.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use log::debug;

use crate::waypoint::GeoWaypoint;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Column (0-indexed) holding the latitude.
pub const LAT_COLUMN: usize = 8;

/// Column (0-indexed) holding the longitude.
pub const LON_COLUMN: usize = 9;

/// Minimum number of fields a waypoint line must have.
pub const MIN_NUM_FIELDS: usize = LON_COLUMN + 1;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors which can occur while loading a survey.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Cannot open the survey file {0:?}: {1}")]
    CannotOpen(String, csv::Error),

    #[error("Cannot read line {line} of the survey: {source}")]
    ReadError { line: u64, source: csv::Error },

    #[error("Line {line} has {found} fields, expected at least {expected}")]
    MissingFields {
        line: u64,
        found: usize,
        expected: usize,
    },

    #[error("Line {line} has an invalid {field}: {value:?}")]
    InvalidNumber {
        line: u64,
        field: &'static str,
        value: String,
    },
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Load the waypoints from the survey file at the given path.
///
/// A file containing only a header gives an empty survey.
pub fn load_waypoints<P: AsRef<Path>>(path: P) -> Result<Vec<GeoWaypoint>, ParseError> {
    let reader = builder()
        .from_path(path.as_ref())
        .map_err(|e| ParseError::CannotOpen(path.as_ref().display().to_string(), e))?;

    let waypoints = read_all(reader)?;

    debug!(
        "Loaded {} waypoints from {:?}",
        waypoints.len(),
        path.as_ref()
    );

    Ok(waypoints)
}

/// Parse waypoints from any reader containing a survey.
pub fn parse_waypoints<R: Read>(rdr: R) -> Result<Vec<GeoWaypoint>, ParseError> {
    read_all(builder().from_reader(rdr))
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Reader configuration for survey files.
///
/// Lines may have differing numbers of fields and quotes have no meaning.
fn builder() -> ReaderBuilder {
    let mut builder = ReaderBuilder::new();
    builder
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .quoting(false);
    builder
}

fn read_all<R: Read>(mut reader: csv::Reader<R>) -> Result<Vec<GeoWaypoint>, ParseError> {
    let mut waypoints = Vec::new();
    let mut record = StringRecord::new();

    loop {
        // Line of the record we're about to read, used if reading fails
        let next_line = reader.position().line();

        match reader.read_record(&mut record) {
            Ok(true) => (),
            Ok(false) => break,
            Err(e) => {
                return Err(ParseError::ReadError {
                    line: next_line,
                    source: e,
                })
            }
        }

        let line = record
            .position()
            .map(|p| p.line())
            .unwrap_or(next_line);

        waypoints.push(parse_record(waypoints.len(), line, &record)?);
    }

    Ok(waypoints)
}

fn parse_record(index: usize, line: u64, record: &StringRecord) -> Result<GeoWaypoint, ParseError> {
    if record.len() < MIN_NUM_FIELDS {
        return Err(ParseError::MissingFields {
            line,
            found: record.len(),
            expected: MIN_NUM_FIELDS,
        });
    }

    let lat_deg = parse_coord(line, "latitude", &record[LAT_COLUMN])?;
    let lon_deg = parse_coord(line, "longitude", &record[LON_COLUMN])?;

    Ok(GeoWaypoint::new(index, lat_deg, lon_deg))
}

fn parse_coord(line: u64, field: &'static str, value: &str) -> Result<f64, ParseError> {
    match value.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ParseError::InvalidNumber {
            line,
            field,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const HEADER: &str = "QGC WPL 110\n";

    fn line(lat: &str, lon: &str) -> String {
        format!("0\t0\t3\t16\t0\t0\t0\t0\t{}\t{}\t0\t1\n", lat, lon)
    }

    #[test]
    fn test_parse_waypoints() {
        let survey = format!(
            "{}{}{}{}",
            HEADER,
            line("48.3900", "-4.4860"),
            line("48.3910", "-4.4860"),
            line("48.3910", "-4.4840"),
        );

        let wps = parse_waypoints(survey.as_bytes()).unwrap();

        assert_eq!(wps.len(), 3);
        for (i, wp) in wps.iter().enumerate() {
            assert_eq!(wp.index, i);
        }
        assert_eq!(wps[0].lat_deg, 48.39);
        assert_eq!(wps[0].lon_deg, -4.486);
        assert_eq!(wps[2].lon_deg, -4.484);
    }

    #[test]
    fn test_header_only() {
        assert!(parse_waypoints(HEADER.as_bytes()).unwrap().is_empty());

        // Header is skipped whatever it contains, even if it looks like a waypoint
        let header_like_wp = line("48.0", "-4.0");
        assert!(parse_waypoints(header_like_wp.as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_fields() {
        let survey = format!("{}{}0\t0\t3\t16\t0\t0\t0\t0\t48.39\n", HEADER, line("48.39", "-4.48"));

        match parse_waypoints(survey.as_bytes()) {
            Err(ParseError::MissingFields {
                line,
                found,
                expected,
            }) => {
                assert_eq!(line, 3);
                assert_eq!(found, 9);
                assert_eq!(expected, 10);
            }
            r => panic!("Expected MissingFields, got {:?}", r),
        }
    }

    #[test]
    fn test_invalid_numbers() {
        let survey = format!("{}{}", HEADER, line("north", "-4.48"));
        match parse_waypoints(survey.as_bytes()) {
            Err(ParseError::InvalidNumber { line, field, value }) => {
                assert_eq!(line, 2);
                assert_eq!(field, "latitude");
                assert_eq!(value, "north");
            }
            r => panic!("Expected InvalidNumber, got {:?}", r),
        }

        let survey = format!("{}{}", HEADER, line("48.39", "NaN"));
        match parse_waypoints(survey.as_bytes()) {
            Err(ParseError::InvalidNumber { field, .. }) => assert_eq!(field, "longitude"),
            r => panic!("Expected InvalidNumber, got {:?}", r),
        }
    }

    #[test]
    fn test_load_waypoints_from_file() {
        let path = std::env::temp_dir().join("survey_lib_loader_test.waypoints");
        std::fs::write(
            &path,
            format!("{}{}{}", HEADER, line("48.39", "-4.48"), line("48.40", "-4.48")),
        )
        .unwrap();

        let wps = load_waypoints(&path).unwrap();
        assert_eq!(wps.len(), 2);
        assert_eq!(wps[1], GeoWaypoint::new(1, 48.40, -4.48));

        std::fs::remove_file(&path).unwrap();

        match load_waypoints(&path) {
            Err(ParseError::CannotOpen(..)) => (),
            r => panic!("Expected CannotOpen, got {:?}", r),
        }
    }
}

//! # Visualisation Marker Messages
//!
//! Messages consumed and produced by the marker node, which republishes a static vehicle marker
//! every time a timestamp is received from the inertial unit.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use chrono::{DateTime, TimeZone, Utc};
use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Default mesh used to draw the vehicle.
pub const DEFAULT_MESH_RESOURCE: &str = "package://ulysse_tf/mesh/ulysse.obj";

/// Default frame the vehicle marker is expressed in.
pub const DEFAULT_FRAME_ID: &str = "imu";

const NANOS_PER_SECOND: u32 = 1_000_000_000;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A timestamp as sent by the inertial unit, split in seconds and nanoseconds since the UNIX epoch.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Stamp {
    pub secs: u32,
    pub nsecs: u32,
}

/// Event received each time the inertial unit publishes its UTC time.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct TimestampEvent {
    pub stamp: Stamp,
}

/// RGBA colour, each channel in the range [0, 1].
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Colour {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Everything about a marker except its timestamp.
///
/// The template is built once at startup and never modified, a `Marker` is produced from it for
/// each timestamp.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MarkerTemplate {
    /// Frame the pose is expressed in
    pub frame_id: String,

    /// Position of the marker in the frame.
    ///
    /// Units: meters
    pub position_m: Vector3<f64>,

    /// Attitude of the marker in the frame
    pub orientation_q: UnitQuaternion<f64>,

    /// Scale factor along each axis
    pub scale: Vector3<f64>,

    pub colour: Colour,

    pub marker_type: MarkerType,

    /// Resource path of the mesh, only used by `MarkerType::MeshResource`
    pub mesh_resource: String,
}

/// Message header, a frame and a time.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Header {
    pub frame_id: String,
    pub stamp: Stamp,
}

/// A marker ready to be published.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Marker {
    pub header: Header,
    pub position_m: Vector3<f64>,
    pub orientation_q: UnitQuaternion<f64>,
    pub scale: Vector3<f64>,
    pub colour: Colour,
    pub marker_type: MarkerType,
    pub mesh_resource: String,
}

/// Instruction to publish a marker on a topic.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PublishCommand {
    pub topic: String,
    pub marker: Marker,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Shape of a marker.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerType {
    Arrow,
    Cube,
    Sphere,
    Cylinder,
    LineStrip,
    LineList,
    CubeList,
    SphereList,
    Points,
    TextViewFacing,
    MeshResource,
    TriangleList,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Stamp {
    /// Convert the stamp into a UTC date, or `None` if the nanoseconds are out of range.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        if self.nsecs >= NANOS_PER_SECOND {
            return None;
        }

        Utc.timestamp_opt(self.secs as i64, self.nsecs).single()
    }
}

impl MarkerType {
    /// Numeric identifier of the marker type used by 3D viewers.
    pub fn id(&self) -> u8 {
        *self as u8
    }
}

impl MarkerTemplate {
    /// Build a marker from this template stamped with the given time.
    pub fn stamped(&self, stamp: Stamp) -> Marker {
        Marker {
            header: Header {
                frame_id: self.frame_id.clone(),
                stamp,
            },
            position_m: self.position_m,
            orientation_q: self.orientation_q,
            scale: self.scale,
            colour: self.colour,
            marker_type: self.marker_type,
            mesh_resource: self.mesh_resource.clone(),
        }
    }
}

impl Default for MarkerTemplate {
    /// The vehicle's mesh, slightly ahead of the inertial unit and rotated a quarter turn.
    fn default() -> Self {
        Self {
            frame_id: String::from(DEFAULT_FRAME_ID),
            position_m: Vector3::new(0.5, 0.05, 0.0),
            orientation_q: UnitQuaternion::from_euler_angles(
                0.0,
                0.0,
                -std::f64::consts::FRAC_PI_2,
            ),
            scale: Vector3::new(0.02, 0.02, 0.02),
            colour: Colour {
                r: 0.8,
                g: 0.8,
                b: 0.8,
                a: 1.0,
            },
            marker_type: MarkerType::MeshResource,
            mesh_resource: String::from(DEFAULT_MESH_RESOURCE),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_stamped_keeps_template() {
        let template = MarkerTemplate::default();
        let stamp = Stamp {
            secs: 1_600_000_000,
            nsecs: 250,
        };

        let marker = template.stamped(stamp);

        assert_eq!(marker.header.stamp, stamp);
        assert_eq!(marker.header.frame_id, "imu");
        assert_eq!(marker.position_m, template.position_m);
        assert_eq!(marker.mesh_resource, template.mesh_resource);
        assert_eq!(marker.marker_type.id(), 10);

        // Template is unaffected by producing markers
        assert_eq!(template, MarkerTemplate::default());
    }

    #[test]
    fn test_default_orientation_is_quarter_turn() {
        let (roll, pitch, yaw) = MarkerTemplate::default().orientation_q.euler_angles();

        assert!(roll.abs() < 1e-12);
        assert!(pitch.abs() < 1e-12);
        assert!((yaw + std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_stamp_to_datetime() {
        let dt = Stamp { secs: 0, nsecs: 0 }.to_datetime().unwrap();
        assert_eq!(dt.timestamp(), 0);

        assert!(Stamp { secs: 10, nsecs: NANOS_PER_SECOND }.to_datetime().is_none());
    }

    #[test]
    fn test_event_from_json() {
        let event: TimestampEvent =
            serde_json::from_str(r#"{"stamp": {"secs": 12, "nsecs": 34}}"#).unwrap();

        assert_eq!(event.stamp, Stamp { secs: 12, nsecs: 34 });
    }
}

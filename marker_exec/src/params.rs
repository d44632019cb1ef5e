//! # Marker Executable Parameters

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use comms_if::eqpt::marker::MarkerTemplate;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

pub const DEFAULT_MARKER_TOPIC: &str = "/ulysse/design";

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerExecParams {
    /// Topic the vehicle marker is published on
    pub marker_topic: String,

    /// The marker to publish, stamped with each received time
    pub template: MarkerTemplate,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Default for MarkerExecParams {
    fn default() -> Self {
        Self {
            marker_topic: String::from(DEFAULT_MARKER_TOPIC),
            template: MarkerTemplate::default(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use comms_if::eqpt::marker::MarkerType;

    #[test]
    fn test_params_file_matches_defaults() {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("params")
            .join("marker_exec.toml");

        let params: MarkerExecParams = util::params::load_from(path).unwrap();
        let default = MarkerExecParams::default();

        assert_eq!(params.marker_topic, default.marker_topic);
        assert_eq!(params.template.frame_id, default.template.frame_id);
        assert_eq!(params.template.marker_type, MarkerType::MeshResource);
        assert_eq!(params.template.mesh_resource, default.template.mesh_resource);
        assert!(params
            .template
            .orientation_q
            .angle_to(&default.template.orientation_q)
            .abs()
            < 1e-9);
    }

    #[test]
    fn test_topic_only() {
        let params: MarkerExecParams = toml::from_str("marker_topic = \"/viz\"\n").unwrap();

        assert_eq!(params.marker_topic, "/viz");
        assert_eq!(params.template, MarkerTemplate::default());
    }
}

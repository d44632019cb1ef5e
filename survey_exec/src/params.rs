//! # Survey Executable Parameters
//!
//! This module provide parameters for the survey executable.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use crate::{giration::GirationParams, proj::LAMBERT_93_EPSG};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SurveyExecParams {
    /// EPSG code of the planar reference system waypoints are projected into
    pub crs_epsg: u32,

    /// Turning maneuver parameters
    pub giration: GirationParams,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Default for SurveyExecParams {
    fn default() -> Self {
        Self {
            crs_epsg: LAMBERT_93_EPSG,
            giration: GirationParams::default(),
        }
    }
}

//! Generic parameters functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::de::DeserializeOwned;
use std::fs::read_to_string;
use std::path::Path;
use thiserror::Error;
use toml;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// An error that occurs during loading of a parameter file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("The software root environment variable (ULYSSE_SW_ROOT) is not set")]
    SwRootNotSet,

    #[error("Cannot load the parmeter file: {0}")]
    FileLoadError(std::io::Error),

    #[error("Cannot read the parameter file: {0}")]
    DeserialiseError(toml::de::Error)
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl LoadError {
    /// True if the error means the parameter file simply isn't there, as
    /// opposed to being present but unreadable or invalid.
    pub fn is_missing(&self) -> bool {
        match self {
            LoadError::SwRootNotSet => true,
            LoadError::FileLoadError(e) => e.kind() == std::io::ErrorKind::NotFound,
            LoadError::DeserialiseError(_) => false
        }
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Load a parameter file
///
/// The file path is relative to the "$ULYSSE_SW_ROOT/params" directory
pub fn load<P>(param_file_path: &str) -> Result<P, LoadError> 
where
    P: DeserializeOwned
{
    // Get the params dir
    let mut path = crate::host::get_ulysse_sw_root()
        .map_err(|_| LoadError::SwRootNotSet)?;
    path.push("params");
    path.push(param_file_path);

    load_from(path)
}

/// Load a parameter file from an explicit path.
pub fn load_from<P, F>(path: F) -> Result<P, LoadError>
where
    P: DeserializeOwned,
    F: AsRef<Path>
{
    // Load the file into a string
    let params_str = read_to_string(path)
        .map_err(LoadError::FileLoadError)?;

    // Parse the string into the parameter struct
    toml::from_str(params_str.as_str())
        .map_err(LoadError::DeserialiseError)
}

#[cfg(test)]
mod test {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct TestParams {
        margin_m: f64,
        name: String
    }

    #[test]
    fn test_load_from() {
        let path = std::env::temp_dir().join("util_params_test_load_from.toml");
        std::fs::write(&path, "margin_m = 2.5\nname = \"lambert\"\n").unwrap();

        let p: TestParams = load_from(&path).unwrap();
        assert_eq!(p.margin_m, 2.5);
        assert_eq!(p.name, "lambert");

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_from_errors() {
        let missing = std::env::temp_dir().join("util_params_test_does_not_exist.toml");
        let err = load_from::<TestParams, _>(&missing).unwrap_err();
        assert!(err.is_missing());

        let path = std::env::temp_dir().join("util_params_test_invalid.toml");
        std::fs::write(&path, "margin_m = \"not a number\"\n").unwrap();
        let err = load_from::<TestParams, _>(&path).unwrap_err();
        assert!(!err.is_missing());
        match err {
            LoadError::DeserialiseError(_) => (),
            e => panic!("Expected a deserialise error, got {:?}", e)
        }

        std::fs::remove_file(&path).unwrap();
    }
}

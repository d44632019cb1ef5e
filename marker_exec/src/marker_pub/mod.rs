//! # Marker Publisher
//!
//! Republishes a fixed vehicle marker each time a timestamp event is received. The marker's
//! shape, pose and colour are decided once at initialisation and are never modified, only the
//! header stamp changes from one publication to the next.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

mod state;

// ------------------------------------------------------------------------------------------------
// EXPORTS
// ------------------------------------------------------------------------------------------------

pub use state::*;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use thiserror::Error;

use comms_if::eqpt::marker::Stamp;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq)]
pub enum MarkerPubError {
    #[error("Received an event before the publisher was initialised")]
    NotInitialised,

    #[error("The marker topic is empty")]
    EmptyTopic,

    #[error("Invalid stamp {0:?}, nanoseconds must be below one second")]
    InvalidStamp(Stamp),
}

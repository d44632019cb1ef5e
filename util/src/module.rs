//! Event driven modules
//!
//! A module is set up once with `init`, then handed one input per event through `proc`. Every
//! call to `proc` gives back the data to pass on and a report on how the event was handled. The
//! marker publisher in `marker_exec` is driven this way by its event loop.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use crate::session::Session;

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// State kept by a module between events.
pub trait State {
    /// Configuration fixed for the lifetime of the module
    type InitData;
    type InitError;

    /// One event
    type InputData;
    /// What the module produces for an event
    type OutputData;
    /// Diagnostics on the handling of an event, for logging or archiving
    type StatusReport;
    type ProcError;

    /// Configure the module before the first event.
    ///
    /// When running inside a session the module may archive its configuration there. Calling
    /// `init` again resets the module.
    fn init(&mut self, init_data: Self::InitData, session: Option<&Session>)
        -> Result<(), Self::InitError>;

    /// Handle one event.
    ///
    /// An error only concerns this event, the module stays usable for the next one.
    fn proc(&mut self, input_data: &Self::InputData)
        -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError>;
}

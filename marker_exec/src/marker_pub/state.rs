//! Implementations for the MarkerPub state structure

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// External
use log::{debug, warn};
use serde::Serialize;

// Internal
use super::MarkerPubError;
use comms_if::eqpt::marker::{MarkerTemplate, PublishCommand, Stamp, TimestampEvent};
use util::{module::State, session::Session};

// ------------------------------------------------------------------------------------------------
// DATA STRUCTURES
// ------------------------------------------------------------------------------------------------

/// Marker publisher module state
#[derive(Default)]
pub struct MarkerPub {
    config: Option<InitData>,

    last_stamp: Option<Stamp>,

    num_published: u64,
}

/// Initialisation data for the marker publisher.
#[derive(Debug, Clone, Serialize)]
pub struct InitData {
    /// Topic to publish on
    pub topic: String,

    /// The marker to stamp and publish
    pub template: MarkerTemplate,
}

/// Status report for MarkerPub processing.
#[derive(Clone, Copy, Default, Serialize, Debug, PartialEq)]
pub struct StatusReport {
    /// Number of markers published since initialisation, including this one
    pub num_published: u64,

    /// True if this stamp is earlier than the previous one
    pub stamp_went_backwards: bool,
}

// ------------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// ------------------------------------------------------------------------------------------------

impl State for MarkerPub {
    type InitData = InitData;
    type InitError = MarkerPubError;

    type InputData = TimestampEvent;
    type OutputData = PublishCommand;
    type StatusReport = StatusReport;
    type ProcError = MarkerPubError;

    /// Initialise the MarkerPub module.
    ///
    /// The template is archived in the session if there is one.
    fn init(&mut self, init_data: Self::InitData, session: Option<&Session>)
        -> Result<(), Self::InitError>
    {
        if init_data.topic.is_empty() {
            return Err(MarkerPubError::EmptyTopic);
        }

        if let Some(s) = session {
            s.save("arch/marker_pub/init_data.json", init_data.clone());
        }

        debug!(
            "Marker publisher initialised on {} with a {:?} marker in frame {}",
            init_data.topic, init_data.template.marker_type, init_data.template.frame_id
        );

        self.config = Some(init_data);
        self.last_stamp = None;
        self.num_published = 0;

        Ok(())
    }

    /// Stamp the template with the event's time and build the publish command for it.
    fn proc(&mut self, input_data: &Self::InputData)
        -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError>
    {
        let config = match self.config {
            Some(ref c) => c,
            None => return Err(MarkerPubError::NotInitialised)
        };

        let stamp = input_data.stamp;
        if stamp.to_datetime().is_none() {
            return Err(MarkerPubError::InvalidStamp(stamp));
        }

        let mut report = StatusReport::default();

        if let Some(last) = self.last_stamp {
            if stamp < last {
                warn!("Timestamp went backwards: {:?} after {:?}", stamp, last);
                report.stamp_went_backwards = true;
            }
        }

        let cmd = PublishCommand {
            topic: config.topic.clone(),
            marker: config.template.stamped(stamp),
        };

        self.last_stamp = Some(stamp);
        self.num_published += 1;
        report.num_published = self.num_published;

        Ok((cmd, report))
    }
}

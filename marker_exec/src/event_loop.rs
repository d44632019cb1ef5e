//! # Event Loop
//!
//! Reads timestamp events as JSON lines, passes each one to the marker publisher and writes the
//! resulting publish commands as JSON lines. A malformed or rejected event is logged and skipped,
//! the loop only stops at the end of the input or on an I/O error.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::{trace, warn};
use serde::Serialize;
use std::io::{BufRead, Write};
use thiserror::Error;

use crate::marker_pub::MarkerPub;
use comms_if::eqpt::marker::TimestampEvent;
use util::module::State;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Counts of what happened during a run of the loop.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq)]
pub struct LoopSummary {
    pub num_events: u64,
    pub num_published: u64,
    pub num_skipped: u64,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum EventLoopError {
    #[error("Cannot read the next event: {0}")]
    ReadError(std::io::Error),

    #[error("Cannot serialise the publish command: {0}")]
    SerialiseError(serde_json::Error),

    #[error("Cannot write the publish command: {0}")]
    WriteError(std::io::Error),
}

// ------------------------------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Run the publisher over every event in `input`, writing one command per line to `output`.
///
/// Blank lines are ignored and not counted as events.
pub fn run<R, W>(
    marker_pub: &mut MarkerPub,
    input: R,
    mut output: W,
) -> Result<LoopSummary, EventLoopError>
where
    R: BufRead,
    W: Write,
{
    let mut summary = LoopSummary::default();

    for (line_num, line) in input.lines().enumerate() {
        let line = line.map_err(EventLoopError::ReadError)?;
        if line.trim().is_empty() {
            continue;
        }

        summary.num_events += 1;

        let event: TimestampEvent = match serde_json::from_str(&line) {
            Ok(e) => e,
            Err(e) => {
                warn!("Skipping malformed event on line {}: {}", line_num + 1, e);
                summary.num_skipped += 1;
                continue;
            }
        };

        let (cmd, report) = match marker_pub.proc(&event) {
            Ok(r) => r,
            Err(e) => {
                warn!("Skipping event on line {}: {}", line_num + 1, e);
                summary.num_skipped += 1;
                continue;
            }
        };

        trace!("MarkerPub status: {:?}", report);

        serde_json::to_writer(&mut output, &cmd).map_err(EventLoopError::SerialiseError)?;
        writeln!(output).map_err(EventLoopError::WriteError)?;
        output.flush().map_err(EventLoopError::WriteError)?;

        summary.num_published += 1;
    }

    Ok(summary)
}

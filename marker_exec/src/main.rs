//! Marker executable entry point.
//!
//! Publishes the vehicle marker for visualisation each time the inertial unit sends its time.
//! Timestamp events are read from stdin as JSON lines and the publish commands are written to
//! stdout, one per line.
//!
//! # Usage
//!
//! ```text
//! marker_exec [--params <file>]
//! ```

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod event_loop;
mod marker_pub;
mod params;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{eyre::WrapErr, Report};
use log::{info, warn};
use std::{io, path::PathBuf};
use structopt::StructOpt;

// Internal
use marker_pub::{InitData, MarkerPub};
use params::MarkerExecParams;
use util::{
    host,
    logger::{logger_init, LevelFilter},
    module::State,
    session::Session,
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Name of the parameter file, relative to the params directory.
const PARAMS_FILE: &str = "marker_exec.toml";

// ---------------------------------------------------------------------------
// STRUCTS
// ---------------------------------------------------------------------------

#[derive(Debug, StructOpt)]
#[structopt(name = "marker_exec", about = "Republish the vehicle marker on each timestamp")]
struct Opt {
    /// Parameter file to use instead of $ULYSSE_SW_ROOT/params/marker_exec.toml
    #[structopt(long, parse(from_os_str))]
    params: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {
    color_eyre::install()?;

    let opt = Opt::from_args();

    // ---- EARLY INITIALISATION ----

    let session = Session::new("marker_exec", "sessions")
        .wrap_err("Failed to create the session")?;

    logger_init(LevelFilter::Info, &session)
        .wrap_err("Failed to initialise logging")?;

    info!("Ulysse Marker Executable\n");
    info!(
        "Running on: {}",
        host::get_hostname().unwrap_or_else(|| String::from("unknown host"))
    );
    info!("Session directory: {:?}\n", session.session_root);

    // ---- LOAD PARAMETERS ----

    let params = load_params(&opt)?;
    info!("Publishing on {}", params.marker_topic);

    // ---- INITIALISE MODULES ----

    let mut marker_pub = MarkerPub::default();
    marker_pub
        .init(
            InitData {
                topic: params.marker_topic,
                template: params.template,
            },
            Some(&session),
        )
        .wrap_err("Failed to initialise the marker publisher")?;

    // ---- MAIN LOOP ----

    let stdin = io::stdin();
    let stdout = io::stdout();
    let summary = event_loop::run(&mut marker_pub, stdin.lock(), stdout.lock())
        .wrap_err("Event loop failed")?;

    info!(
        "End of input: {} events, {} markers published, {} skipped",
        summary.num_events, summary.num_published, summary.num_skipped
    );
    session.save("arch/loop_summary.json", summary);

    session.exit();

    Ok(())
}

/// Load the parameters, falling back on the defaults if there is no parameter file.
fn load_params(opt: &Opt) -> Result<MarkerExecParams, Report> {
    let result = match &opt.params {
        Some(path) => util::params::load_from(path),
        None => util::params::load(PARAMS_FILE),
    };

    match result {
        Ok(p) => Ok(p),
        Err(e) if opt.params.is_none() && e.is_missing() => {
            warn!("No parameter file found ({}), using defaults", e);
            Ok(MarkerExecParams::default())
        }
        Err(e) => Err(Report::new(e).wrap_err("Could not load marker_exec params")),
    }
}

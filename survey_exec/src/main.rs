//! Survey executable entry point.
//!
//! Loads a survey mission file, prints the turn angle at each interior waypoint and archives the
//! planar waypoints into the session. With `--adapt` the adapted trajectory is also archived, in
//! planar and in geographic coordinates.
//!
//! # Usage
//!
//! ```text
//! survey_exec [--params <file>] [--adapt] <survey file>
//! ```

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{eyre::WrapErr, Report};
use log::{debug, info, warn};
use std::path::PathBuf;
use structopt::StructOpt;

// Internal
use survey_lib::{
    giration::adapt_trajectory,
    loader::load_waypoints,
    params::SurveyExecParams,
    proj::{convert_to_geo, convert_to_planar, Crs},
    traj::{find_trajectory, leg_headings_deg},
};
use util::{
    host,
    logger::{logger_init, LevelFilter},
    session::Session,
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Name of the parameter file, relative to the params directory.
const PARAMS_FILE: &str = "survey_exec.toml";

// ---------------------------------------------------------------------------
// STRUCTS
// ---------------------------------------------------------------------------

#[derive(Debug, StructOpt)]
#[structopt(name = "survey_exec", about = "Adapt survey waypoints into a vehicle trajectory")]
struct Opt {
    /// Path to the survey mission file (tab separated, one header line)
    #[structopt(parse(from_os_str))]
    survey_file: PathBuf,

    /// Parameter file to use instead of $ULYSSE_SW_ROOT/params/survey_exec.toml
    #[structopt(long, parse(from_os_str))]
    params: Option<PathBuf>,

    /// Also build the adapted trajectory, replacing sharp corners with girations
    #[structopt(long)]
    adapt: bool,
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {
    color_eyre::install()?;

    let opt = Opt::from_args();

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new("survey_exec", "sessions")
        .wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(LevelFilter::Debug, &session)
        .wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("Ulysse Survey Executable\n");
    info!(
        "Running on: {}",
        host::get_hostname().unwrap_or_else(|| String::from("unknown host"))
    );
    info!("Session directory: {:?}\n", session.session_root);

    // ---- LOAD PARAMETERS ----

    let params = load_params(&opt)?;
    let crs = Crs::from_epsg(params.crs_epsg)
        .wrap_err("Invalid projection in the parameters")?;
    params
        .giration
        .validate()
        .wrap_err("Invalid giration parameters")?;

    info!("Exec parameters loaded");
    info!("    Projection: EPSG:{} ({})", crs.epsg, crs.name);
    info!("    Giration margin: {} m", params.giration.margin_m);

    // ---- PROCESS SURVEY ----

    let waypoints = load_waypoints(&opt.survey_file)
        .wrap_err_with(|| format!("Failed to load the survey {:?}", opt.survey_file))?;
    info!("Loaded {} waypoints", waypoints.len());

    for (i, heading_deg) in leg_headings_deg(&waypoints)
        .wrap_err("Failed to compute leg headings")?
        .iter()
        .enumerate()
    {
        debug!("Leg {} -> {}: heading {:.3} deg", i, i + 1, heading_deg);
    }

    let angles = find_trajectory(&waypoints).wrap_err("Failed to compute the turn angles")?;
    for angle in angles.iter() {
        println!("{} {}", angle.index, angle.angle_deg);
    }

    let planar = convert_to_planar(&waypoints, &crs)
        .wrap_err("Failed to project the waypoints")?;
    session.save("arch/turn_angles.json", angles);
    session.save("arch/planar_waypoints.json", planar.clone());

    if opt.adapt {
        let adapted = adapt_trajectory(&planar, &params.giration)
            .wrap_err("Failed to adapt the trajectory")?;
        info!(
            "Adapted trajectory has {} points for {} survey waypoints",
            adapted.len(),
            planar.len()
        );
        let adapted_geo = convert_to_geo(&adapted, &crs)
            .wrap_err("Failed to convert the adapted trajectory back to geographic coordinates")?;

        session.save("arch/adapted_trajectory.json", adapted);
        session.save("arch/adapted_trajectory_geo.json", adapted_geo);
    }

    session.exit();

    Ok(())
}

/// Load the parameters, falling back on the defaults if there is no parameter file.
fn load_params(opt: &Opt) -> Result<SurveyExecParams, Report> {
    let result = match &opt.params {
        Some(path) => util::params::load_from(path),
        None => util::params::load(PARAMS_FILE),
    };

    match result {
        Ok(p) => Ok(p),
        Err(e) if opt.params.is_none() && e.is_missing() => {
            warn!("No parameter file found ({}), using defaults", e);
            Ok(SurveyExecParams::default())
        }
        Err(e) => Err(Report::new(e).wrap_err("Could not load survey_exec params")),
    }
}

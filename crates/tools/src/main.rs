use std::path::PathBuf;

use clap::{Parser, Subcommand};
use foundation::math::{GeoCoord, GlobeFrame};
use journey::CoordinatePolicy;
use tools::{
    DatasetReport, ProjectionReport, SimulationOptions, load_config, load_journey, simulate,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Journey map dataset and camera tooling")]
struct Args {
    /// View config JSON (globe, camera, tracking, ...). Falls back to JOURNEY_CONFIG.
    #[arg(long, env = "JOURNEY_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load a journey document and list its waypoints
    Validate {
        path: PathBuf,

        /// Clamp out-of-range coordinates instead of rejecting the document
        #[arg(long)]
        clamp: bool,
    },

    /// Project a coordinate onto the globe and back
    Project {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        /// Sphere radius (default: from config)
        #[arg(long)]
        radius: Option<f64>,

        /// Longitude offset in degrees (default: from config)
        #[arg(long, allow_hyphen_values = true)]
        offset: Option<f64>,
    },

    /// Drive a headless view through a scroll sweep or an autoplay run
    Simulate {
        path: PathBuf,

        #[arg(long, default_value_t = 240)]
        frames: usize,

        /// Frame rate of the simulated display
        #[arg(long, default_value_t = 60.0)]
        hz: f64,

        #[arg(long, default_value_t = 800.0)]
        viewport: f64,

        /// Track height in pixels (default: one viewport per waypoint, plus one)
        #[arg(long)]
        track: Option<f64>,

        #[arg(long)]
        autoplay: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    match args.command {
        Command::Validate { path, clamp } => {
            let policy = if clamp {
                CoordinatePolicy::Clamp
            } else {
                CoordinatePolicy::Reject
            };
            let journey = load_journey(&path, policy)?;
            info!(path = %path.display(), waypoints = journey.len(), "dataset loaded");
            let frame = config.globe.frame();
            let report = DatasetReport::new(&journey, &frame);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{report}");
            }
        }
        Command::Project {
            lat,
            lon,
            radius,
            offset,
        } => {
            let coord = GeoCoord::validated(lat, lon)?;
            let frame = GlobeFrame::new(
                radius.unwrap_or(config.globe.radius),
                offset.unwrap_or(config.globe.lon_offset_deg),
            );
            let report = ProjectionReport::new(coord, frame);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{report}");
            }
        }
        Command::Simulate {
            path,
            frames,
            hz,
            viewport,
            track,
            autoplay,
        } => {
            if !(hz.is_finite() && hz > 0.0) {
                return Err(format!("--hz must be positive, got {hz}").into());
            }
            let journey = load_journey(&path, CoordinatePolicy::Reject)?;
            let options = SimulationOptions {
                frames,
                dt_s: 1.0 / hz,
                viewport_px: viewport,
                track_px: track,
                autoplay,
            };
            let sim = simulate(journey, config, &options)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&sim)?);
            } else {
                println!("{sim}");
            }
            if sim.leaked > 0 {
                let leaked = sim.leaked;
                return Err(format!("{leaked} host listeners still attached after unmount").into());
            }
        }
    }

    Ok(())
}

//! Skirmish Observer - replay viewer entry point.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use observer_core::record::{Perspective, Side};
use observer_viewer::ViewerConfig;

/// Replay viewer for skirmish match logs.
#[derive(Parser, Debug)]
#[command(name = "observer", version, about)]
struct Cli {
    /// Path to the match log to replay.
    log: Option<PathBuf>,

    /// Swap rows and columns of the map after parsing.
    #[arg(long)]
    transpose: bool,

    /// Perspective to view the match from.
    #[arg(long, value_enum, default_value_t = PerspectiveArg::Observer)]
    perspective: PerspectiveArg,

    /// Initial playback speed in rounds per second, between 0 and 1.
    #[arg(long, default_value_t = 1.0, value_parser = parse_speed)]
    speed: f32,
}

fn parse_speed(s: &str) -> Result<f32, String> {
    let value: f32 = s.parse().map_err(|_| format!("'{s}' is not a number"))?;
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("speed must be between 0 and 1, got '{s}'"))
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum PerspectiveArg {
    /// Everything visible.
    Observer,
    /// Fog from the defending side.
    Defender,
    /// Fog from the attacking side.
    Attacker,
}

impl From<PerspectiveArg> for Perspective {
    fn from(arg: PerspectiveArg) -> Self {
        match arg {
            PerspectiveArg::Observer => Perspective::Omniscient,
            PerspectiveArg::Defender => Perspective::Side(Side::Defender),
            PerspectiveArg::Attacker => Perspective::Side(Side::Attacker),
        }
    }
}

fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    tracing::info!("Starting Skirmish Observer");

    let config = ViewerConfig {
        log_path: cli.log,
        transpose: cli.transpose,
        perspective: cli.perspective.into(),
        speed: cli.speed,
    };

    if let Err(e) = observer_viewer::run(config) {
        tracing::error!("Viewer error: {e}");
        std::process::exit(1);
    }
}

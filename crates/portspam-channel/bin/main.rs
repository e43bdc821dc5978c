use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use portspam_channel::{ChannelError, Config, DetectorBackend, run_forever};
use tracing_subscriber::EnvFilter;

#[derive(Copy, Clone, Debug, ValueEnum)]
enum DetectorArg {
    Denstream,
    Threshold,
}

/// Port-contention covert channel receiver/sender loop.
#[derive(Parser, Debug)]
#[command(name = "portspam-channel", about = "Half-duplex port-contention covert channel")]
struct Args {
    /// Bit-detector backend.
    #[arg(long, value_enum, default_value_t = DetectorArg::Threshold)]
    detector: DetectorArg,

    /// Path to a file holding the 16-byte test payload; falls back to the
    /// original's `"azertyuiopqsdfgh"` literal.
    #[arg(long)]
    test_sequence_file: Option<PathBuf>,

    /// Override the number of physical cores to fan out across.
    #[arg(long)]
    cores: Option<usize>,
}

fn load_test_sequence(path: &PathBuf) -> Result<[u8; 16], ChannelError> {
    let bytes = std::fs::read(path)
        .map_err(|e| ChannelError::BadArgument(format!("reading {}: {e}", path.display())))?;
    bytes.as_slice().try_into().map_err(|_| {
        ChannelError::BadArgument(format!(
            "{} must contain exactly 16 bytes, got {}",
            path.display(),
            bytes.len()
        ))
    })
}

fn build_config(args: &Args) -> Result<Config, ChannelError> {
    let mut cfg = Config::default();

    cfg.detector.backend = match args.detector {
        DetectorArg::Denstream => {
            DetectorBackend::DenStream { lambda: 0.25, eps: 50.0, beta: 1.0, mu: 2.0 }
        }
        DetectorArg::Threshold => DetectorBackend::Threshold,
    };

    if let Some(cores) = args.cores {
        if cores == 0 {
            return Err(ChannelError::BadArgument("--cores must be at least 1".to_string()));
        }
        cfg.phy.phy_core = cores;
    }

    if let Some(path) = &args.test_sequence_file {
        cfg.test_sequence = load_test_sequence(path)?;
    }

    Ok(cfg)
}

fn main() {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let args = Args::parse();
    let cfg = match build_config(&args) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("portspam-channel: {e}");
            std::process::exit(1);
        }
    };

    run_forever(&cfg);
}

//! saavy-bridge - terminal dashboard for the audio analysis bridge
//!
//! Run with: cargo run -- --bands 8

mod app;
mod logging;
mod ui;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::WrapErr;

use app::BridgeApp;
use saavy_bridge::{config, BridgeConfig};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "saavy-bridge")]
#[command(about = "Live band analysis of a sweeping test tone", long_about = None)]
pub struct Args {
    /// Number of bands to reduce the spectrum into
    #[arg(long, value_name = "N", default_value_t = config::DEFAULT_BAND_COUNT)]
    pub bands: usize,

    /// Temporal smoothing of the analyser, in [0, 1]
    #[arg(long, value_name = "TAU", default_value_t = config::DEFAULT_SMOOTHING)]
    pub smoothing: f32,

    /// Transform size, a power of two
    #[arg(long, value_name = "SAMPLES", default_value_t = config::DEFAULT_FFT_SIZE)]
    pub fft_size: usize,

    /// Sweep start frequency
    #[arg(long, value_name = "HZ", default_value = "40")]
    pub from_hz: f32,

    /// Sweep end frequency
    #[arg(long, value_name = "HZ", default_value = "8000")]
    pub to_hz: f32,

    /// Duration of one sweep
    #[arg(long, value_name = "SECONDS", default_value = "8")]
    pub sweep_secs: f32,

    /// Where tracing output goes while the TUI owns the terminal
    #[arg(long, value_name = "PATH", default_value = "saavy-bridge.log")]
    pub log_file: PathBuf,
}

impl Args {
    fn bridge_config(&self) -> BridgeConfig {
        BridgeConfig::new()
            .fft_size(self.fft_size)
            .smoothing(self.smoothing)
            .band_count(self.bands)
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let config = args.bridge_config();
    config.validate().wrap_err("invalid analysis settings")?;
    logging::init(&args.log_file)?;

    let mut app = BridgeApp::new(&args, config);
    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal);
    ratatui::restore();
    result
}

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use color_eyre::eyre::{Result as EyreResult, WrapErr};
use tracing_subscriber::{
    filter::{EnvFilter, LevelFilter},
    fmt,
    prelude::*,
};

/// Send tracing output to `path`. `RUST_LOG` overrides the default `info` level.
pub fn init(path: &Path) -> EyreResult<()> {
    let file = File::create(path)
        .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_filter(filter),
        )
        .try_init()
        .wrap_err("failed to install tracing subscriber")?;

    tracing::info!(path = %path.display(), "logging initialised");
    Ok(())
}

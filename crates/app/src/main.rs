//! Gouache - headless painting session runner
//!
//! Reads engine messages as JSON lines (from a script file or stdin),
//! feeds them to the painting pipeline one at a time and writes every
//! reply to stdout as a JSON line. Exports land as PNGs in the output
//! directory.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::process::ExitCode;

use gouache_config::GouacheConfig;
use gouache_ipc::{IpcError, UiToEngine, decode, encode};
use painting::{ExportError, PaintingPipeline, SurfaceError};
use thiserror::Error;
use tracing::{debug, error, info, warn};

mod config;
mod sink;

use config::RunOptions;
use sink::DirectorySink;

/// Errors that end a session run
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing value for {0}")]
    MissingValue(String),

    #[error("Unexpected argument: {0}")]
    UnknownArgument(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid config: {0}")]
    Config(#[from] serde_json::Error),

    #[error(transparent)]
    Surface(#[from] SurfaceError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Ipc(#[from] IpcError),
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), AppError> {
    let options = RunOptions::from_args(std::env::args().skip(1))?;

    let config = match &options.config {
        Some(path) => GouacheConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => GouacheConfig::from_env(),
    };
    info!(
        "Starting Gouache session on a {}x{} canvas",
        config.display.width, config.display.height
    );

    let mut pipeline = PaintingPipeline::new(config)?;
    let mut sink = DirectorySink::new(&options.out_dir)?;
    info!("Exports go to {}", sink.dir().display());

    let input: Box<dyn BufRead> = match &options.script {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(io::stdin().lock()),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut handled = 0usize;

    for (index, line) in input.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with("//") {
            continue;
        }

        let message: UiToEngine = match decode(trimmed) {
            Ok(message) => message,
            Err(e) => {
                warn!("Skipping line {}: {}", index + 1, e);
                continue;
            }
        };

        match pipeline.handle_message(message, &mut sink) {
            Ok(replies) => {
                for reply in replies {
                    writeln!(out, "{}", encode(&reply)?)?;
                }
                // Drain so each message reports only its own tiles
                let dirty = pipeline.take_dirty_tiles();
                if !dirty.painting.is_empty() || !dirty.active.is_empty() {
                    debug!(
                        "Line {}: {} painting and {} active tiles changed",
                        index + 1,
                        dirty.painting.len(),
                        dirty.active.len()
                    );
                }
                handled += 1;
            }
            // A rejected export leaves the session usable
            Err(e) => warn!("Line {}: {}", index + 1, e),
        }
    }

    out.flush()?;
    info!("Session finished after {} messages", handled);
    Ok(())
}

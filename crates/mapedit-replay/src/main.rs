//! Gesture replay entry point
//!
//! Usage: `mapedit-replay <data.geojson> <script.ron>`
//!
//! Loads a FeatureCollection, drives the scripted gestures through the
//! selected edit mode and prints the resulting collection as JSON.

mod replay;
mod script;

use std::path::Path;
use std::process::ExitCode;

use mapedit_core::FeatureCollection;

use crate::script::GestureScript;

/// Replay errors
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("Usage: mapedit-replay <data.geojson> <script.ron>")]
    Usage,
    #[error("IO error: {0}")]
    Io(String),
    #[error("Invalid GeoJSON: {0}")]
    Data(String),
    #[error("Invalid gesture script: {0}")]
    Script(String),
    #[error("Serialization error: {0}")]
    Serialize(String),
    #[error("Selected feature {index} does not exist ({len} features)")]
    Selection { index: usize, len: usize },
    #[error("Step {0} drags without a preceding StartDrag")]
    NoDragInProgress(usize),
}

/// Load a GeoJSON FeatureCollection
fn load_data(path: impl AsRef<Path>) -> Result<FeatureCollection, ReplayError> {
    let content =
        std::fs::read_to_string(path.as_ref()).map_err(|e| ReplayError::Io(e.to_string()))?;
    serde_json::from_str(&content).map_err(|e| ReplayError::Data(e.to_string()))
}

fn main() -> ExitCode {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mapedit_modes=debug,mapedit_replay=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run_cli(std::env::args().skip(1).collect()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_cli(args: Vec<String>) -> Result<(), ReplayError> {
    let [data_path, script_path] = args.as_slice() else {
        return Err(ReplayError::Usage);
    };

    tracing::info!("Loading {} and {}", data_path, script_path);
    let data = load_data(data_path)?;
    let script = GestureScript::load(script_path)?;

    let outcome = replay::run(data, &script)?;
    tracing::info!(
        "Applied edits {:?}, final cursor {:?}",
        outcome.edit_types,
        outcome.cursor.map(|c| c.as_str())
    );
    let json = serde_json::to_string_pretty(&outcome.data)
        .map_err(|e| ReplayError::Serialize(e.to_string()))?;
    println!("{}", json);
    Ok(())
}

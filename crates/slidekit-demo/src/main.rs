#![forbid(unsafe_code)]

//! slidekit demo
//!
//! Replays synthetic gestures against every slider variant and prints each
//! notification as it is emitted.
//!
//! # Running
//!
//! ```sh
//! cargo run -p slidekit-demo
//! cargo run -p slidekit-demo -- float labeled
//! SLIDEKIT_LOG=debug cargo run -p slidekit-demo
//! ```

mod scenes;
mod script;

use slidekit::SliderError;
use tracing_subscriber::EnvFilter;

/// Filter directive variable.
const LOG_ENV: &str = "SLIDEKIT_LOG";

fn init_tracing() {
    let env_filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn main() -> Result<(), SliderError> {
    init_tracing();

    let requested: Vec<String> = std::env::args().skip(1).collect();
    for name in &requested {
        if !scenes::SCENES.iter().any(|scene| name == scene.name) {
            tracing::warn!(scene = %name, "demo.unknown_scene");
        }
    }

    for scene in scenes::SCENES {
        if !requested.is_empty() && !requested.iter().any(|name| name == scene.name) {
            continue;
        }
        tracing::info!(scene = scene.name, "demo.scene");
        if let Err(err) = (scene.run)() {
            tracing::error!(scene = scene.name, %err, "demo.failed");
            return Err(err);
        }
    }
    Ok(())
}

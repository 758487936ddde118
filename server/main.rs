//! glyph-server
//!
//! Upload endpoint and drawing page for handwritten character recognition.
//! Served by a synchronous tiny_http server, one thread per request.
//!
//! Run with:
//!   cargo run --bin glyph-server --release -- --model model.json
//! Then open http://127.0.0.1:5000
//!
//! Routes:
//!   GET  /         drawing canvas
//!   POST /predict  multipart upload, field `file`
//!   GET  /health   liveness

mod args;
#[cfg(test)]
mod fixtures;
mod handlers;
mod routes;
mod state;
mod util;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tiny_http::Server;
use tracing::info;
use tracing_subscriber::EnvFilter;

use glyph_recognizer::{MlpClassifier, NormConfig, Recognizer};

use state::AppState;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = args::Args::parse();

    // Model load and config contract failures are fatal.
    let classifier = MlpClassifier::load_json(&args.model)
        .with_context(|| format!("loading model {}", args.model.display()))?;
    let config = match &args.config {
        Some(path) => NormConfig::from_json_file(path)?,
        None => args.profile.config(),
    };
    let recognizer = Recognizer::new(Arc::new(classifier), config)
        .context("normalization config rejected by model")?;

    let shared_state = Arc::new(AppState {
        recognizer,
        max_upload_bytes: args.max_upload_bytes,
    });

    let addr = args.listen_addr();
    let server = Server::http(&addr)
        .map_err(|e| anyhow::anyhow!("failed to bind {}: {}", addr, e))?;
    info!(%addr, "listening");

    for request in server.incoming_requests() {
        let state_clone = shared_state.clone();
        std::thread::spawn(move || {
            routes::dispatch(request, state_clone);
        });
    }
    Ok(())
}

use std::sync::Arc;

use glyph_recognizer::Recognizer;

/// Everything a request handler reads. Built once at startup and never
/// mutated, so handlers share it without locking.
pub struct AppState {
    pub recognizer: Recognizer,
    pub max_upload_bytes: usize,
}

/// Shared state type — an `Arc<AppState>` passed to every handler thread.
pub type SharedState = Arc<AppState>;

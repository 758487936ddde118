use std::io::Read;

use serde::Serialize;
use tiny_http::Request;
use tracing::warn;

use glyph_recognizer::{ClassificationResult, GlyphError, Prediction};

use crate::routes::{json_error, json_response, HttpResponse};
use crate::state::AppState;
use crate::util::multipart::{extract_boundary, extract_file_part};

/// Form field carrying the image.
const FILE_FIELD: &str = "file";

/// Alternatives returned with every prediction.
const TOP_K: usize = 3;

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub prediction: char,
    pub confidence: f64,
    pub top3: Vec<Prediction>,
}

impl From<&ClassificationResult> for PredictResponse {
    fn from(result: &ClassificationResult) -> Self {
        let best = result.best();
        PredictResponse {
            prediction: best.label,
            confidence: round6(best.confidence),
            top3: result.top_k(TOP_K),
        }
    }
}

fn round6(x: f64) -> f64 {
    (x * 1e6).round() / 1e6
}

// ---------------------------------------------------------------------------
// POST /predict
// ---------------------------------------------------------------------------

pub fn handle_post(request: &mut Request, state: &AppState) -> HttpResponse {
    let content_type = request
        .headers()
        .iter()
        .find(|h| h.field.equiv("Content-Type"))
        .map(|h| h.value.as_str().to_owned())
        .unwrap_or_default();

    if request.body_length().map_or(false, |len| len > state.max_upload_bytes) {
        return too_large(state.max_upload_bytes);
    }

    let body = match read_limited(request.as_reader(), state.max_upload_bytes) {
        Ok(Some(body)) => body,
        Ok(None) => return too_large(state.max_upload_bytes),
        Err(e) => {
            warn!(error = %e, "failed to read request body");
            return json_error(400, "bad_request", "Could not read request body");
        }
    };

    predict_from_body(state, &content_type, &body)
}

/// Reads at most `limit` bytes; `None` when the body runs past it. Covers
/// chunked uploads, which carry no length up front.
fn read_limited<R: Read>(reader: R, limit: usize) -> std::io::Result<Option<Vec<u8>>> {
    let mut body = Vec::new();
    reader.take(limit as u64 + 1).read_to_end(&mut body)?;
    Ok((body.len() <= limit).then_some(body))
}

fn too_large(limit: usize) -> HttpResponse {
    json_error(413, "too_large", format!("Upload exceeds {} bytes", limit))
}

/// Everything after the body has been read; kept separate so it can be
/// exercised without a socket.
pub fn predict_from_body(state: &AppState, content_type: &str, body: &[u8]) -> HttpResponse {
    let Some(boundary) = extract_boundary(content_type) else {
        return json_error(400, "no_file", "No file uploaded");
    };
    let Some(part) = extract_file_part(body, &boundary, FILE_FIELD) else {
        return json_error(400, "no_file", "No file uploaded");
    };
    if part.filename.is_empty() {
        return json_error(400, "empty_filename", "Empty filename");
    }

    match state.recognizer.recognize_bytes(&part.bytes) {
        Ok(result) => json_response(200, &PredictResponse::from(&result)),
        Err(err) => {
            warn!(filename = %part.filename, error = %err, "prediction rejected");
            json_error(status_for(&err), err.code(), err.user_message())
        }
    }
}

/// Decode failures are the client's; blank input is well-formed but
/// unprocessable; anything else is ours.
pub fn status_for(err: &GlyphError) -> u16 {
    match err {
        GlyphError::EmptyContent => 422,
        e if e.is_client_error() => 400,
        _ => 500,
    }
}

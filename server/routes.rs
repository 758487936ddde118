use std::io::Cursor;
use std::time::Instant;

use serde::Serialize;
use tiny_http::{Header, Method, Request, Response, StatusCode};
use tracing::info;

use crate::handlers;
use crate::state::{AppState, SharedState};

pub type HttpResponse = Response<Cursor<Vec<u8>>>;

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

fn content_type(value: &'static [u8]) -> Header {
    // Static header names and values are always valid.
    Header::from_bytes(&b"Content-Type"[..], value).unwrap()
}

pub fn html_response(body: String) -> HttpResponse {
    let bytes = body.into_bytes();
    let len = bytes.len();
    Response::new(
        StatusCode(200),
        vec![content_type(b"text/html; charset=utf-8")],
        Cursor::new(bytes),
        Some(len),
        None,
    )
}

pub fn json_response<T: Serialize>(status: u16, body: &T) -> HttpResponse {
    let bytes = serde_json::to_vec(body)
        .unwrap_or_else(|_| br#"{"error":"serialization failed"}"#.to_vec());
    let len = bytes.len();
    Response::new(
        StatusCode(status),
        vec![content_type(b"application/json")],
        Cursor::new(bytes),
        Some(len),
        None,
    )
}

/// Error body shared by every JSON failure response.
#[derive(Debug, Serialize, PartialEq)]
pub struct ErrorBody {
    pub error: String,
    pub code: &'static str,
}

pub fn json_error(status: u16, code: &'static str, message: impl Into<String>) -> HttpResponse {
    json_response(status, &ErrorBody { error: message.into(), code })
}

pub fn not_found() -> HttpResponse {
    json_error(404, "not_found", "File not found")
}

// ---------------------------------------------------------------------------
// Request dispatcher
// ---------------------------------------------------------------------------

/// Picks the handler for a request and builds its response.
pub fn route(request: &mut Request, state: &AppState) -> HttpResponse {
    let method = request.method().clone();
    let url = request.url().to_owned();
    let path = url.split('?').next().unwrap_or("");

    match (&method, path) {
        (Method::Get, "/") | (Method::Get, "/index.html") => handlers::index::handle_get(),
        (Method::Get, "/health") => handlers::health::handle_get(),
        (Method::Post, "/predict") => handlers::predict::handle_post(request, state),
        _ => not_found(),
    }
}

/// Routes a request, logs the outcome and sends the response.
pub fn dispatch(mut request: Request, state: SharedState) {
    let started = Instant::now();
    let response = route(&mut request, &state);

    let status = response.status_code().0;
    info!(method = ?request.method(), url = %request.url(), status, elapsed = ?started.elapsed(), "request");
    let _ = request.respond(response);
}

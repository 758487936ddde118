use crate::routes::{html_response, HttpResponse};

// Embedded at compile time so the binary runs from any working directory.
const INDEX: &str = include_str!("../assets/index.html");

/// `GET /` — drawing canvas that posts its PNG to `/predict`.
pub fn handle_get() -> HttpResponse {
    html_response(INDEX.to_owned())
}

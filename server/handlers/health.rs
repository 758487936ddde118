use serde::Serialize;

use crate::routes::{json_response, HttpResponse};

#[derive(Serialize)]
struct Health {
    status: &'static str,
}

/// `GET /health` — the model is loaded before the listener binds, so a
/// running server is a ready one.
pub fn handle_get() -> HttpResponse {
    json_response(200, &Health { status: "ok" })
}

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version and catalog size.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": env!("CARGO_PKG_NAME"),
        "templates": state.registry.len(),
        "livePreviews": state.previews.len(),
        "artifacts": {
            "live": state.artifacts().live(),
            "created": state.artifacts().created(),
            "revoked": state.artifacts().revoked()
        }
    }))
}

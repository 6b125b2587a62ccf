pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::catalog::handlers as catalog;
use crate::compositor::handlers as render;
use crate::preview::handlers as previews;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Catalog
        .route("/api/v1/templates", get(catalog::handle_list_templates))
        // Render
        .route("/api/v1/render", post(render::handle_render))
        // Previews
        .route("/api/v1/previews", post(previews::handle_open_preview))
        .route(
            "/api/v1/previews/:id",
            put(previews::handle_request_preview)
                .get(previews::handle_get_preview)
                .delete(previews::handle_close_preview),
        )
        .route(
            "/api/v1/artifacts/:handle",
            get(previews::handle_get_artifact),
        )
        .with_state(state)
}

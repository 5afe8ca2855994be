//! Router configuration.

use crate::handlers::{
    create_todo, delete_todo, edit_form, health_check, readiness_check, render_page, reset_form,
    update_todo,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};
use hxtodo_web::{client_signal_layer, correlation_id_layer};
use std::path::Path;
use tower_http::{services::ServeDir, trace::TraceLayer};

/// Build the complete Axum router.
///
/// Routes:
/// - `GET /`: full page
/// - `POST /todo`: create
/// - `GET /todo/reset-form`: create-mode form
/// - `GET|PUT|DELETE /todo/:id`: edit form, update, delete
/// - `GET /assets/*`: static files from `assets_dir`
/// - `GET /health`, `GET /ready`
///
/// Layers, outermost first: correlation id, HTTP trace, client signals.
pub fn build_router(state: AppState, assets_dir: impl AsRef<Path>) -> Router {
    let todo_routes = Router::new()
        .route("/", get(render_page))
        .route("/todo", post(create_todo))
        .route("/todo/reset-form", get(reset_form))
        .route(
            "/todo/:id",
            get(edit_form).put(update_todo).delete(delete_todo),
        );

    Router::new()
        .merge(todo_routes)
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .nest_service("/assets", ServeDir::new(assets_dir.as_ref()))
        .with_state(state)
        .layer(client_signal_layer())
        .layer(TraceLayer::new_for_http())
        .layer(correlation_id_layer())
}

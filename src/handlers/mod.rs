mod params;
mod player;

use crate::service::ServiceError;
use crate::AppState;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Full application router. Player routes live under `/players` and, for
/// existing clients, under `/rest/players`.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/players", player_routes())
        .nest("/rest/players", player_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn player_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(player::list_players).post(player::create_player))
        .route("/count", get(player::count_players))
        .route(
            "/:id",
            get(player::get_player)
                .post(player::update_player)
                .delete(player::delete_player),
        )
}

async fn health_check() -> &'static str {
    "OK"
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        match self {
            ServiceError::InvalidInput(msg) => {
                tracing::debug!("Rejected request: {}", msg);
                (StatusCode::BAD_REQUEST, msg).into_response()
            }
            ServiceError::NotFound(id) => {
                (StatusCode::NOT_FOUND, format!("Player {} not found", id)).into_response()
            }
            ServiceError::Storage(e) => {
                tracing::error!("Storage error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response()
            }
        }
    }
}

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde_json::json;
use crate::controller::AppState;

pub fn router() -> Router {
    Router::new().route("/health", get(get_health_check))
}

/// Liveness plus whether searches can run at all
async fn get_health_check(
    Extension(app_state): Extension<AppState>,
) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "places_api_key_configured": app_state.places_settings.api_key.is_some(),
        })),
    )
}

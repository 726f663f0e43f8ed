use std::sync::Arc;

use axum::{extract::State, routing::get, Extension, Json, Router};
use fintrack_core::dashboard::Dashboard;

use crate::{auth::SessionUser, error::ApiResult, main_lib::AppState};

async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionUser>,
) -> ApiResult<Json<Dashboard>> {
    let dashboard = state.dashboard_service.get_dashboard(&session.user_id)?;
    Ok(Json(dashboard))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/dashboard", get(get_dashboard))
}

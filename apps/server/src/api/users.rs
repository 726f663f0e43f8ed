use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, put},
    Extension, Json, Router,
};
use fintrack_core::users::{FinancialsUpdate, User};

use crate::{
    api::{parse_id, ApiJson},
    auth::SessionUser,
    error::ApiResult,
    main_lib::AppState,
};

async fn get_financials(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionUser>,
) -> ApiResult<Json<User>> {
    let user = state.user_service.get_user(&session.user_id)?;
    Ok(Json(user))
}

async fn update_financials(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionUser>,
    ApiJson(update): ApiJson<FinancialsUpdate>,
) -> ApiResult<Json<User>> {
    let id = parse_id(&id)?;
    let user = state
        .user_service
        .update_financials(&session.user_id, &id, update)
        .await?;
    Ok(Json(user))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users/financials", get(get_financials))
        .route("/users/{id}/financials", put(update_financials))
}

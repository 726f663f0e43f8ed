use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use fintrack_core::goals::{Goal, GoalUpdate, NewGoal};

use crate::{
    api::{parse_id, ApiJson},
    auth::SessionUser,
    error::ApiResult,
    main_lib::AppState,
    models::MessageResponse,
};

async fn get_goals(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionUser>,
) -> ApiResult<Json<Vec<Goal>>> {
    let goals = state.goal_service.get_goals(&session.user_id)?;
    Ok(Json(goals))
}

async fn get_goal(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionUser>,
) -> ApiResult<Json<Goal>> {
    let id = parse_id(&id)?;
    let goal = state.goal_service.get_goal(&session.user_id, &id)?;
    Ok(Json(goal))
}

async fn create_goal(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionUser>,
    ApiJson(goal): ApiJson<NewGoal>,
) -> ApiResult<(StatusCode, Json<Goal>)> {
    let g = state
        .goal_service
        .create_goal(&session.user_id, goal)
        .await?;
    Ok((StatusCode::CREATED, Json(g)))
}

async fn update_goal(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionUser>,
    ApiJson(update): ApiJson<GoalUpdate>,
) -> ApiResult<Json<Goal>> {
    let id = parse_id(&id)?;
    let g = state
        .goal_service
        .update_goal(&session.user_id, &id, update)
        .await?;
    Ok(Json(g))
}

async fn delete_goal(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionUser>,
) -> ApiResult<Json<MessageResponse>> {
    let id = parse_id(&id)?;
    state
        .goal_service
        .delete_goal(&session.user_id, &id)
        .await?;
    Ok(Json(MessageResponse::new("Goal deleted successfully")))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/goals", get(get_goals).post(create_goal))
        .route(
            "/goals/{id}",
            get(get_goal).put(update_goal).delete(delete_goal),
        )
}

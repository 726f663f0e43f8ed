use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use fintrack_core::budgets::{Budget, BudgetUpdate, NewBudget};

use crate::{
    api::{parse_id, ApiJson},
    auth::SessionUser,
    error::ApiResult,
    main_lib::AppState,
    models::MessageResponse,
};

async fn get_budgets(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionUser>,
) -> ApiResult<Json<Vec<Budget>>> {
    let budgets = state.budget_service.get_budgets(&session.user_id)?;
    Ok(Json(budgets))
}

async fn get_budget(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionUser>,
) -> ApiResult<Json<Budget>> {
    let id = parse_id(&id)?;
    let budget = state.budget_service.get_budget(&session.user_id, &id)?;
    Ok(Json(budget))
}

async fn create_budget(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionUser>,
    ApiJson(budget): ApiJson<NewBudget>,
) -> ApiResult<(StatusCode, Json<Budget>)> {
    let created = state
        .budget_service
        .create_budget(&session.user_id, budget)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_budget(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionUser>,
    ApiJson(update): ApiJson<BudgetUpdate>,
) -> ApiResult<Json<Budget>> {
    let id = parse_id(&id)?;
    let updated = state
        .budget_service
        .update_budget(&session.user_id, &id, update)
        .await?;
    Ok(Json(updated))
}

async fn delete_budget(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionUser>,
) -> ApiResult<Json<MessageResponse>> {
    let id = parse_id(&id)?;
    state
        .budget_service
        .delete_budget(&session.user_id, &id)
        .await?;
    Ok(Json(MessageResponse::new("Budget deleted successfully")))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/budgets", get(get_budgets).post(create_budget))
        .route(
            "/budgets/{id}",
            get(get_budget).put(update_budget).delete(delete_budget),
        )
}

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use fintrack_core::investments::{GoalInvestments, Investment, InvestmentUpdate, NewInvestment};
use serde::Deserialize;

use crate::{
    api::{parse_id, ApiJson},
    auth::SessionUser,
    error::{ApiError, ApiResult},
    main_lib::AppState,
    models::{LinkGoalResponse, MessageResponse, MutationResponse},
};

#[derive(Deserialize, Default)]
struct LinkGoalRequest {
    goal_id: Option<String>,
}

async fn get_investments(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionUser>,
) -> ApiResult<Json<Vec<Investment>>> {
    let investments = state.investment_service.get_investments(&session.user_id)?;
    Ok(Json(investments))
}

async fn get_investment(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionUser>,
) -> ApiResult<Json<Investment>> {
    let id = parse_id(&id)?;
    let investment = state
        .investment_service
        .get_investment(&session.user_id, &id)?;
    Ok(Json(investment))
}

async fn create_investment(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionUser>,
    ApiJson(investment): ApiJson<NewInvestment>,
) -> ApiResult<(StatusCode, Json<MutationResponse<Investment>>)> {
    let created = state
        .investment_service
        .create_investment(&session.user_id, investment)
        .await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

async fn update_investment(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionUser>,
    ApiJson(update): ApiJson<InvestmentUpdate>,
) -> ApiResult<Json<MutationResponse<Investment>>> {
    let id = parse_id(&id)?;
    let updated = state
        .investment_service
        .update_investment(&session.user_id, &id, update)
        .await?;
    Ok(Json(updated.into()))
}

async fn delete_investment(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionUser>,
) -> ApiResult<Json<MutationResponse<MessageResponse>>> {
    let id = parse_id(&id)?;
    let result = state
        .investment_service
        .delete_investment(&session.user_id, &id)
        .await?;
    Ok(Json(MutationResponse::acknowledge(
        result,
        "Investment deleted successfully",
    )))
}

async fn link_goal(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionUser>,
    body: Bytes,
) -> ApiResult<Json<MutationResponse<LinkGoalResponse>>> {
    let id = parse_id(&id)?;
    // An empty body clears the link, same as an absent `goal_id`.
    let request: LinkGoalRequest = if body.iter().all(u8::is_ascii_whitespace) {
        LinkGoalRequest::default()
    } else {
        serde_json::from_slice(&body).map_err(|e| ApiError::BadRequest(e.to_string()))?
    };
    let linked = state
        .investment_service
        .link_goal(&session.user_id, &id, request.goal_id)
        .await?;
    Ok(Json(MutationResponse::from(linked.map(|investment| {
        LinkGoalResponse {
            message: "Investment linked to goal successfully".to_string(),
            goal_id: investment.goal_id,
        }
    }))))
}

async fn unlink_goal(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionUser>,
) -> ApiResult<Json<MutationResponse<MessageResponse>>> {
    let id = parse_id(&id)?;
    let unlinked = state
        .investment_service
        .unlink_goal(&session.user_id, &id)
        .await?;
    Ok(Json(MutationResponse::acknowledge(
        unlinked.map(|_| ()),
        "Investment unlinked from goal successfully",
    )))
}

async fn get_goal_investments(
    Path(goal_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionUser>,
) -> ApiResult<Json<GoalInvestments>> {
    let goal_id = parse_id(&goal_id)?;
    let result = state
        .investment_service
        .get_goal_investments(&session.user_id, &goal_id)?;
    Ok(Json(result))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/investments",
            get(get_investments).post(create_investment),
        )
        .route(
            "/investments/{id}",
            get(get_investment)
                .put(update_investment)
                .delete(delete_investment),
        )
        .route("/investments/{id}/link-goal", post(link_goal))
        .route("/investments/{id}/unlink-goal", post(unlink_goal))
        .route(
            "/investments/by-goal/{goal_id}",
            get(get_goal_investments),
        )
}

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use fintrack_core::expenses::{Expense, ExpenseUpdate, NewExpense};

use crate::{
    api::{parse_id, ApiJson},
    auth::SessionUser,
    error::ApiResult,
    main_lib::AppState,
    models::{MessageResponse, MutationResponse},
};

async fn get_expenses(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionUser>,
) -> ApiResult<Json<Vec<Expense>>> {
    let expenses = state.expense_service.get_expenses(&session.user_id)?;
    Ok(Json(expenses))
}

async fn get_expense(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionUser>,
) -> ApiResult<Json<Expense>> {
    let id = parse_id(&id)?;
    let expense = state.expense_service.get_expense(&session.user_id, &id)?;
    Ok(Json(expense))
}

async fn create_expense(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionUser>,
    ApiJson(expense): ApiJson<NewExpense>,
) -> ApiResult<(StatusCode, Json<MutationResponse<Expense>>)> {
    let created = state
        .expense_service
        .create_expense(&session.user_id, expense)
        .await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

async fn update_expense(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionUser>,
    ApiJson(update): ApiJson<ExpenseUpdate>,
) -> ApiResult<Json<MutationResponse<Expense>>> {
    let id = parse_id(&id)?;
    let updated = state
        .expense_service
        .update_expense(&session.user_id, &id, update)
        .await?;
    Ok(Json(updated.into()))
}

async fn delete_expense(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionUser>,
) -> ApiResult<Json<MutationResponse<MessageResponse>>> {
    let id = parse_id(&id)?;
    let result = state
        .expense_service
        .delete_expense(&session.user_id, &id)
        .await?;
    Ok(Json(MutationResponse::acknowledge(
        result,
        "Expense deleted successfully",
    )))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/expenses", get(get_expenses).post(create_expense))
        .route(
            "/expenses/{id}",
            get(get_expense).put(update_expense).delete(delete_expense),
        )
}

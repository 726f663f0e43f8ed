use std::sync::Arc;

use fintrack_core::{
    budgets::{BudgetSavingsRecalculator, BudgetService, BudgetServiceTrait},
    dashboard::{DashboardService, DashboardServiceTrait},
    expenses::{ExpenseService, ExpenseServiceTrait},
    goals::{GoalAmountRecalculator, GoalService, GoalServiceTrait},
    investments::{InvestmentService, InvestmentServiceTrait},
    users::{UserService, UserServiceTrait},
};
use fintrack_storage_sqlite::{
    budgets::BudgetRepository, db, expenses::ExpenseRepository, goals::GoalRepository,
    investments::InvestmentRepository, users::UserRepository,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::{
    auth::AuthManager,
    config::Config,
    oauth::{GoogleIdentityProvider, IdentityProvider},
};

pub struct AppState {
    pub investment_service: Arc<dyn InvestmentServiceTrait>,
    pub goal_service: Arc<dyn GoalServiceTrait>,
    pub budget_service: Arc<dyn BudgetServiceTrait>,
    pub expense_service: Arc<dyn ExpenseServiceTrait>,
    pub user_service: Arc<dyn UserServiceTrait>,
    pub dashboard_service: Arc<dyn DashboardServiceTrait>,
    pub auth: Arc<AuthManager>,
    pub identity_provider: Arc<dyn IdentityProvider>,
    pub oauth_state: String,
    pub frontend_url: String,
    pub cookie_secure: bool,
}

pub fn init_tracing() {
    let log_format = std::env::var("FT_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let identity_provider = Arc::new(GoogleIdentityProvider::new(&config.google)?);
    build_state_with_provider(config, identity_provider).await
}

/// Wires repositories and services over the configured database, using the
/// given login provider.
pub async fn build_state_with_provider(
    config: &Config,
    identity_provider: Arc<dyn IdentityProvider>,
) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer((*pool).clone());

    let investment_repo = Arc::new(InvestmentRepository::new(pool.clone(), writer.clone()));
    let goal_repo = Arc::new(GoalRepository::new(pool.clone(), writer.clone()));
    let budget_repo = Arc::new(BudgetRepository::new(pool.clone(), writer.clone()));
    let expense_repo = Arc::new(ExpenseRepository::new(pool.clone(), writer.clone()));
    let user_repo = Arc::new(UserRepository::new(pool.clone(), writer.clone()));

    let goal_recalculator = Arc::new(GoalAmountRecalculator::new(
        investment_repo.clone(),
        goal_repo.clone(),
    ));
    let budget_recalculator = Arc::new(BudgetSavingsRecalculator::new(budget_repo.clone()));

    let investment_service = Arc::new(InvestmentService::new(
        investment_repo.clone(),
        goal_repo.clone(),
        goal_recalculator,
    ));
    let goal_service = Arc::new(GoalService::new(goal_repo.clone()));
    let budget_service = Arc::new(BudgetService::new(budget_repo.clone()));
    let expense_service = Arc::new(ExpenseService::new(
        expense_repo.clone(),
        budget_repo.clone(),
        budget_recalculator,
    ));
    let user_service = Arc::new(UserService::new(user_repo));
    let dashboard_service = Arc::new(DashboardService::new(
        investment_repo,
        goal_repo,
        budget_repo,
        expense_repo,
    ));

    let auth = Arc::new(AuthManager::new(&config.jwt_secret, config.session_ttl));

    Ok(Arc::new(AppState {
        investment_service,
        goal_service,
        budget_service,
        expense_service,
        user_service,
        dashboard_service,
        auth,
        identity_provider,
        oauth_state: config.oauth_state.clone(),
        frontend_url: config.frontend_url.clone(),
        cookie_secure: config.cookie_secure,
    }))
}

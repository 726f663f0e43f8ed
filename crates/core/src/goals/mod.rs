//! Goals module - domain models, services, and traits.

mod goals_model;
mod goals_recalculator;
mod goals_service;
mod goals_traits;

#[cfg(test)]
mod goals_model_tests;

pub use goals_model::{calculate_progress, Goal, GoalPriority, GoalStatus, GoalUpdate, NewGoal};
pub use goals_recalculator::GoalAmountRecalculator;
pub use goals_service::GoalService;
pub use goals_traits::{GoalRepositoryTrait, GoalServiceTrait};

//! Budgets module - monthly income and expense envelopes.

mod budgets_model;
mod budgets_recalculator;
mod budgets_service;
mod budgets_traits;

pub use budgets_model::{
    calculate_savings, calculate_savings_percentage, Budget, BudgetUpdate, NewBudget,
};
pub use budgets_recalculator::BudgetSavingsRecalculator;
pub use budgets_service::BudgetService;
pub use budgets_traits::{BudgetRepositoryTrait, BudgetServiceTrait};

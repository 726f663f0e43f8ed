//! Expenses module - spending records, optionally charged to a budget.

mod expenses_model;
mod expenses_service;
mod expenses_traits;

#[cfg(test)]
mod expenses_service_tests;

pub use expenses_model::{Expense, ExpenseUpdate, NewExpense};
pub use expenses_service::ExpenseService;
pub use expenses_traits::{ExpenseRepositoryTrait, ExpenseServiceTrait};

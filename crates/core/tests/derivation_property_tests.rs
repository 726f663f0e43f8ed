//! Property-based tests for the derived values on investments, goals and budgets.
//!
//! These tests verify that the derivation rules hold across the whole input
//! range, using the `proptest` crate for random test case generation.

use chrono::Utc;
use fintrack_core::budgets::{calculate_savings, Budget};
use fintrack_core::goals::{calculate_progress, GoalStatus};
use fintrack_core::investments::{calculate_returns, GoalInvestments, Investment, InvestmentStatus};
use proptest::prelude::*;

// =============================================================================
// Generators
// =============================================================================

/// Generates a monetary amount with cent precision.
fn arb_amount() -> impl Strategy<Value = f64> {
    (0u64..10_000_000).prop_map(|cents| cents as f64 / 100.0)
}

/// Generates a strictly positive monetary amount.
fn arb_positive_amount() -> impl Strategy<Value = f64> {
    (1u64..10_000_000).prop_map(|cents| cents as f64 / 100.0)
}

fn arb_investment() -> impl Strategy<Value = Investment> {
    (arb_amount(), arb_amount()).prop_map(|(invested, current_value)| {
        let now = Utc::now();
        let mut investment = Investment {
            id: "inv".to_string(),
            user_id: "user".to_string(),
            goal_id: Some("goal".to_string()),
            name: "Fund".to_string(),
            investment_type: "ETF".to_string(),
            invested,
            current_value,
            returns: None,
            status: InvestmentStatus::Stable,
            purchase_date: now,
            created_at: now,
            updated_at: now,
        };
        investment.refresh_performance();
        investment
    })
}

fn arb_budget() -> impl Strategy<Value = Budget> {
    (arb_amount(), arb_amount(), arb_amount()).prop_map(|(income, total_expenses, goal)| {
        let now = Utc::now();
        let mut budget = Budget {
            id: "budget".to_string(),
            user_id: "user".to_string(),
            month: "2024-01".to_string(),
            income,
            total_expenses,
            savings: 0.0,
            savings_goal: goal,
            savings_percentage: 0.0,
            created_at: now,
            updated_at: now,
        };
        budget.recalculate_savings();
        budget
    })
}

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-6 * a.abs().max(b.abs()).max(1.0)
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Returns follow the percentage formula whenever something was invested.
    #[test]
    fn prop_returns_match_formula(invested in arb_positive_amount(), current in arb_amount()) {
        let returns = calculate_returns(invested, current).unwrap();
        prop_assert!(approx_eq(returns, (current - invested) / invested * 100.0));
    }

    /// Status is a total function of returns with the documented thresholds.
    #[test]
    fn prop_status_matches_returns(investment in arb_investment()) {
        match investment.returns {
            None => prop_assert_eq!(investment.status, InvestmentStatus::Stable),
            Some(r) if r >= 10.0 => prop_assert_eq!(investment.status, InvestmentStatus::Growing),
            Some(r) if r >= 0.0 => prop_assert_eq!(investment.status, InvestmentStatus::Stable),
            Some(_) => prop_assert_eq!(investment.status, InvestmentStatus::Declining),
        }
    }

    /// A goal's total is the sum of the current values of its investments.
    #[test]
    fn prop_goal_total_is_sum_of_current_values(
        investments in proptest::collection::vec(arb_investment(), 0..20)
    ) {
        let expected: f64 = investments.iter().map(|i| i.current_value).sum();
        let view = GoalInvestments::new(investments.clone());
        prop_assert_eq!(view.count, investments.len());
        prop_assert!(approx_eq(view.total, expected));
    }

    /// Goal status agrees with progress for every amount/target pair.
    #[test]
    fn prop_goal_status_matches_progress(current in arb_amount(), target in arb_amount()) {
        let progress = calculate_progress(current, target);
        let status = GoalStatus::from_progress(progress);
        if target <= 0.0 {
            prop_assert_eq!(progress, 0.0);
        }
        if progress >= 100.0 {
            prop_assert_eq!(status, GoalStatus::Completed);
        } else if progress > 0.0 {
            prop_assert_eq!(status, GoalStatus::InProgress);
        } else {
            prop_assert_eq!(status, GoalStatus::Planned);
        }
    }

    /// After any sequence of expense adjustments, savings equal income minus expenses.
    #[test]
    fn prop_budget_savings_invariant(
        mut budget in arb_budget(),
        deltas in proptest::collection::vec(-5_000.0f64..5_000.0, 0..30)
    ) {
        for delta in deltas {
            budget.apply_expense_delta(delta);
            prop_assert!(approx_eq(
                budget.savings,
                calculate_savings(budget.income, budget.total_expenses)
            ));
        }
    }

    /// Adding then removing the same expense restores the budget.
    #[test]
    fn prop_budget_delta_is_reversible(mut budget in arb_budget(), amount in arb_positive_amount()) {
        let original = budget.total_expenses;
        budget.apply_expense_delta(amount);
        budget.apply_expense_delta(-amount);
        prop_assert!(approx_eq(budget.total_expenses, original));
        prop_assert!(approx_eq(budget.savings, budget.income - original));
    }
}

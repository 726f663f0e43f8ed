//! Tests for the expense service and budget savings recomputation.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::budgets::{Budget, BudgetRepositoryTrait, BudgetService, BudgetServiceTrait, NewBudget};
    use crate::expenses::{ExpenseServiceTrait, ExpenseUpdate, NewExpense};
    use crate::recompute::RecomputeTarget;
    use crate::test_support::{expense_service, InMemoryStore};
    use crate::users::UserId;

    fn owner() -> UserId {
        UserId::new("user-1")
    }

    async fn create_budget(store: &Arc<InMemoryStore>, owner: &UserId, income: f64) -> Budget {
        BudgetService::new(store.clone())
            .create_budget(
                owner,
                NewBudget {
                    month: Some("2024-01".to_string()),
                    income,
                    total_expenses: 0.0,
                    savings_goal: 0.0,
                },
            )
            .await
            .unwrap()
    }

    fn stored_budget(store: &Arc<InMemoryStore>, id: &str) -> Budget {
        BudgetRepositoryTrait::get_by_id(store.as_ref(), &owner(), id).unwrap()
    }

    fn expense(amount: f64, budget_id: Option<String>) -> NewExpense {
        NewExpense {
            budget_id,
            category: "Food".to_string(),
            amount,
            description: None,
            date: None,
        }
    }

    fn update(amount: f64, budget_id: Option<String>) -> ExpenseUpdate {
        ExpenseUpdate {
            budget_id,
            category: "Food".to_string(),
            amount,
            description: Some("groceries".to_string()),
            date: None,
        }
    }

    // ==================== Create / Delete Tests ====================

    #[tokio::test]
    async fn test_create_and_delete_adjust_budget() {
        let store = InMemoryStore::new();
        let service = expense_service(&store);
        let budget = create_budget(&store, &owner(), 3000.0).await;

        let created = service
            .create_expense(&owner(), expense(200.0, Some(budget.id.clone())))
            .await
            .unwrap();
        assert!(created.is_clean());

        let after_create = stored_budget(&store, &budget.id);
        assert_eq!(after_create.total_expenses, 200.0);
        assert_eq!(after_create.savings, 2800.0);

        service
            .delete_expense(&owner(), &created.value.id)
            .await
            .unwrap();

        let after_delete = stored_budget(&store, &budget.id);
        assert_eq!(after_delete.total_expenses, 0.0);
        assert_eq!(after_delete.savings, 3000.0);
        assert!(store.expenses.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_without_budget_touches_nothing() {
        let store = InMemoryStore::new();
        let service = expense_service(&store);
        let budget = create_budget(&store, &owner(), 3000.0).await;

        let created = service
            .create_expense(&owner(), expense(50.0, Some(String::new())))
            .await
            .unwrap();

        assert!(created.value.budget_id.is_none());
        assert_eq!(stored_budget(&store, &budget.id).total_expenses, 0.0);
    }

    #[tokio::test]
    async fn test_create_with_foreign_budget_is_not_found() {
        let store = InMemoryStore::new();
        let service = expense_service(&store);
        let foreign = create_budget(&store, &UserId::new("user-2"), 1000.0).await;

        let err = service
            .create_expense(&owner(), expense(10.0, Some(foreign.id)))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(store.expenses.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_defaults_date_to_now() {
        let store = InMemoryStore::new();
        let service = expense_service(&store);

        let before = chrono::Utc::now();
        let created = service
            .create_expense(&owner(), expense(10.0, None))
            .await
            .unwrap()
            .value;
        assert!(created.date >= before);
    }

    // ==================== Update Tests ====================

    #[tokio::test]
    async fn test_update_same_budget_applies_difference() {
        let store = InMemoryStore::new();
        let service = expense_service(&store);
        let budget = create_budget(&store, &owner(), 3000.0).await;

        let created = service
            .create_expense(&owner(), expense(200.0, Some(budget.id.clone())))
            .await
            .unwrap()
            .value;

        let updated = service
            .update_expense(&owner(), &created.id, update(350.0, None))
            .await
            .unwrap()
            .value;

        assert_eq!(updated.budget_id.as_deref(), Some(budget.id.as_str()));
        assert_eq!(updated.date, created.date);
        let stored = stored_budget(&store, &budget.id);
        assert_eq!(stored.total_expenses, 350.0);
        assert_eq!(stored.savings, 2650.0);
    }

    #[tokio::test]
    async fn test_update_to_other_budget_only_releases_old_budget() {
        let store = InMemoryStore::new();
        let service = expense_service(&store);
        let old_budget = create_budget(&store, &owner(), 3000.0).await;
        let new_budget = create_budget(&store, &owner(), 2000.0).await;

        let created = service
            .create_expense(&owner(), expense(200.0, Some(old_budget.id.clone())))
            .await
            .unwrap()
            .value;

        service
            .update_expense(
                &owner(),
                &created.id,
                update(200.0, Some(new_budget.id.clone())),
            )
            .await
            .unwrap();

        assert_eq!(stored_budget(&store, &old_budget.id).total_expenses, 0.0);
        // The newly referenced budget is not charged.
        assert_eq!(stored_budget(&store, &new_budget.id).total_expenses, 0.0);
    }

    #[tokio::test]
    async fn test_update_foreign_expense_is_not_found() {
        let store = InMemoryStore::new();
        let service = expense_service(&store);

        let created = service
            .create_expense(&UserId::new("user-2"), expense(10.0, None))
            .await
            .unwrap()
            .value;

        let err = service
            .update_expense(&owner(), &created.id, update(20.0, None))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    // ==================== Recompute Failure Tests ====================

    #[tokio::test]
    async fn test_budget_recompute_failure_is_reported_as_warning() {
        let store = InMemoryStore::new();
        let service = expense_service(&store);
        let budget = create_budget(&store, &owner(), 3000.0).await;
        store.fail_recomputes();

        let created = service
            .create_expense(&owner(), expense(200.0, Some(budget.id.clone())))
            .await
            .unwrap();

        assert_eq!(created.warnings.len(), 1);
        assert_eq!(created.warnings[0].target, RecomputeTarget::BudgetSavings);
        assert_eq!(store.expenses.lock().unwrap().len(), 1);
        assert_eq!(stored_budget(&store, &budget.id).total_expenses, 0.0);
    }
}

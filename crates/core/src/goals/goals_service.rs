use chrono::Utc;
use log::debug;
use std::sync::Arc;
use uuid::Uuid;

use super::goals_model::{Goal, GoalUpdate, NewGoal};
use super::goals_traits::{GoalRepositoryTrait, GoalServiceTrait};
use crate::constants::DEFAULT_GOAL_HORIZON_YEARS;
use crate::errors::Result;
use crate::users::UserId;
use crate::utils::time_utils::add_years;

/// Service for managing savings goals
pub struct GoalService {
    repository: Arc<dyn GoalRepositoryTrait>,
}

impl GoalService {
    pub fn new(repository: Arc<dyn GoalRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl GoalServiceTrait for GoalService {
    fn get_goals(&self, owner: &UserId) -> Result<Vec<Goal>> {
        self.repository.list(owner)
    }

    fn get_goal(&self, owner: &UserId, goal_id: &str) -> Result<Goal> {
        self.repository.get_by_id(owner, goal_id)
    }

    async fn create_goal(&self, owner: &UserId, new_goal: NewGoal) -> Result<Goal> {
        new_goal.validate()?;
        let now = Utc::now();
        let mut goal = Goal {
            id: Uuid::new_v4().to_string(),
            user_id: owner.to_string(),
            name: new_goal.name.trim().to_string(),
            target_amount: new_goal.target_amount,
            current_amount: 0.0,
            progress: 0.0,
            deadline: new_goal
                .deadline
                .unwrap_or_else(|| add_years(now, DEFAULT_GOAL_HORIZON_YEARS)),
            status: Default::default(),
            priority: new_goal.priority.unwrap_or_default(),
            description: new_goal.description,
            created_at: now,
            updated_at: now,
        };
        goal.refresh_progress();

        let created = self.repository.create(owner, goal).await?;
        debug!("Created goal {} for user {}", created.id, owner);
        Ok(created)
    }

    async fn update_goal(&self, owner: &UserId, goal_id: &str, update: GoalUpdate) -> Result<Goal> {
        let existing = self.repository.get_by_id(owner, goal_id)?;
        update.validate()?;

        let mut goal = Goal {
            name: update.name.trim().to_string(),
            target_amount: update.target_amount,
            deadline: update.deadline.unwrap_or(existing.deadline),
            priority: update.priority.unwrap_or(existing.priority),
            description: update.description,
            updated_at: Utc::now(),
            ..existing
        };
        goal.refresh_progress();

        self.repository.update(owner, goal).await
    }

    async fn delete_goal(&self, owner: &UserId, goal_id: &str) -> Result<()> {
        self.repository.get_by_id(owner, goal_id)?;
        self.repository.delete(owner, goal_id).await?;
        debug!("Deleted goal {} for user {}", goal_id, owner);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goals::{GoalPriority, GoalStatus};
    use crate::test_support::InMemoryStore;
    use chrono::Datelike;

    fn owner() -> UserId {
        UserId::new("user-1")
    }

    fn new_goal(name: &str, target_amount: f64) -> NewGoal {
        NewGoal {
            name: name.to_string(),
            target_amount,
            deadline: None,
            priority: None,
            description: None,
        }
    }

    #[tokio::test]
    async fn test_create_goal_defaults() {
        let service = GoalService::new(InMemoryStore::new());
        let now = Utc::now();

        let goal = service
            .create_goal(&owner(), new_goal("Car", 5000.0))
            .await
            .unwrap();

        assert_eq!(goal.current_amount, 0.0);
        assert_eq!(goal.status, GoalStatus::Planned);
        assert_eq!(goal.priority, GoalPriority::Medium);
        assert_eq!(goal.deadline.year(), now.year() + 1);
    }

    #[tokio::test]
    async fn test_update_goal_keeps_current_amount() {
        let store = InMemoryStore::new();
        let service = GoalService::new(store.clone());
        let goal = service
            .create_goal(&owner(), new_goal("Car", 5000.0))
            .await
            .unwrap();
        GoalRepositoryTrait::update_progress(store.as_ref(), &owner(), &goal.id, 2500.0)
            .await
            .unwrap();

        let updated = service
            .update_goal(
                &owner(),
                &goal.id,
                GoalUpdate {
                    name: "Electric car".to_string(),
                    target_amount: 2500.0,
                    deadline: None,
                    priority: Some(GoalPriority::High),
                    description: Some("Save up".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.current_amount, 2500.0);
        assert_eq!(updated.progress, 100.0);
        assert_eq!(updated.status, GoalStatus::Completed);
        assert_eq!(updated.priority, GoalPriority::High);
        assert_eq!(updated.deadline, goal.deadline);
    }

    #[tokio::test]
    async fn test_foreign_goal_is_not_found() {
        let service = GoalService::new(InMemoryStore::new());
        let goal = service
            .create_goal(&UserId::new("user-2"), new_goal("Car", 5000.0))
            .await
            .unwrap();

        assert!(service.get_goal(&owner(), &goal.id).unwrap_err().is_not_found());
        assert!(service
            .delete_goal(&owner(), &goal.id)
            .await
            .unwrap_err()
            .is_not_found());
        assert!(service.get_goal(&UserId::new("user-2"), &goal.id).is_ok());
    }
}

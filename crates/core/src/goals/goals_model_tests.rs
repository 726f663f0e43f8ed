//! Tests for goal domain models.

#[cfg(test)]
mod tests {
    use crate::goals::{calculate_progress, Goal, GoalPriority, GoalStatus, GoalUpdate, NewGoal};
    use chrono::Utc;

    fn create_test_goal(current_amount: f64, target_amount: f64) -> Goal {
        let now = Utc::now();
        let mut goal = Goal {
            id: "goal-1".to_string(),
            user_id: "user-1".to_string(),
            name: "Car".to_string(),
            target_amount,
            current_amount,
            progress: 0.0,
            deadline: now,
            status: GoalStatus::Planned,
            priority: GoalPriority::Medium,
            description: None,
            created_at: now,
            updated_at: now,
        };
        goal.refresh_progress();
        goal
    }

    // ==================== Progress Tests ====================

    #[test]
    fn test_progress() {
        assert_eq!(calculate_progress(1200.0, 5000.0), 24.0);
        assert_eq!(calculate_progress(0.0, 5000.0), 0.0);
        assert_eq!(calculate_progress(6000.0, 5000.0), 120.0);
    }

    #[test]
    fn test_progress_zero_target() {
        assert_eq!(calculate_progress(100.0, 0.0), 0.0);
        assert_eq!(calculate_progress(100.0, -10.0), 0.0);
    }

    // ==================== Status Tests ====================

    #[test]
    fn test_status_from_progress() {
        assert_eq!(GoalStatus::from_progress(0.0), GoalStatus::Planned);
        assert_eq!(GoalStatus::from_progress(-5.0), GoalStatus::Planned);
        assert_eq!(GoalStatus::from_progress(0.1), GoalStatus::InProgress);
        assert_eq!(GoalStatus::from_progress(99.99), GoalStatus::InProgress);
        assert_eq!(GoalStatus::from_progress(100.0), GoalStatus::Completed);
        assert_eq!(GoalStatus::from_progress(150.0), GoalStatus::Completed);
    }

    #[test]
    fn test_refresh_progress() {
        let goal = create_test_goal(1200.0, 5000.0);
        assert_eq!(goal.progress, 24.0);
        assert_eq!(goal.status, GoalStatus::InProgress);
        assert!(!goal.is_completed());

        let done = create_test_goal(5000.0, 5000.0);
        assert!(done.is_completed());
    }

    // ==================== Serialization Tests ====================

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&GoalStatus::InProgress).unwrap(),
            "\"In Progress\""
        );
        assert_eq!(
            serde_json::from_str::<GoalStatus>("\"In Progress\"").unwrap(),
            GoalStatus::InProgress
        );
        assert_eq!(
            "In Progress".parse::<GoalStatus>().unwrap(),
            GoalStatus::InProgress
        );
    }

    #[test]
    fn test_priority_default_and_parse() {
        assert_eq!(GoalPriority::default(), GoalPriority::Medium);
        assert_eq!("High".parse::<GoalPriority>().unwrap(), GoalPriority::High);
        assert!("Urgent".parse::<GoalPriority>().is_err());
    }

    #[test]
    fn test_new_goal_ignores_client_current_amount() {
        let parsed: NewGoal = serde_json::from_str(
            r#"{"name":"Car","target_amount":5000,"current_amount":999,"status":"Completed"}"#,
        )
        .unwrap();
        assert_eq!(parsed.name, "Car");
        assert!(parsed.deadline.is_none());
        assert!(parsed.priority.is_none());
    }

    // ==================== Validation Tests ====================

    #[test]
    fn test_goal_validation() {
        let valid = NewGoal {
            name: "Car".to_string(),
            target_amount: 5000.0,
            deadline: None,
            priority: None,
            description: None,
        };
        assert!(valid.validate().is_ok());

        let no_name = NewGoal {
            name: " ".to_string(),
            ..valid.clone()
        };
        assert!(no_name.validate().is_err());

        let zero_target = NewGoal {
            target_amount: 0.0,
            ..valid
        };
        assert!(zero_target.validate().is_err());

        let update = GoalUpdate {
            name: "Car".to_string(),
            target_amount: -1.0,
            deadline: None,
            priority: Some(GoalPriority::High),
            description: None,
        };
        assert!(update.validate().is_err());
    }
}

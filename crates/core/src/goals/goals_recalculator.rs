//! Keeps a goal's accumulated amount in line with its linked investments.

use log::{debug, warn};
use std::sync::Arc;

use super::goals_model::Goal;
use super::goals_traits::GoalRepositoryTrait;
use crate::errors::Result;
use crate::investments::InvestmentRepositoryTrait;
use crate::recompute::{RecomputeTarget, RecomputeWarning};
use crate::users::UserId;

pub struct GoalAmountRecalculator {
    investment_repository: Arc<dyn InvestmentRepositoryTrait>,
    goal_repository: Arc<dyn GoalRepositoryTrait>,
}

impl GoalAmountRecalculator {
    pub fn new(
        investment_repository: Arc<dyn InvestmentRepositoryTrait>,
        goal_repository: Arc<dyn GoalRepositoryTrait>,
    ) -> Self {
        Self {
            investment_repository,
            goal_repository,
        }
    }

    /// Sums `current_value` over the owner's investments linked to `goal_id`
    /// and stores it as the goal's `current_amount`.
    pub async fn recompute(&self, owner: &UserId, goal_id: &str) -> Result<Goal> {
        let total: f64 = self
            .investment_repository
            .list_by_goal(owner, goal_id)?
            .iter()
            .fold(0.0, |acc, investment| acc + investment.current_value);
        debug!("Recomputing goal {} current_amount={}", goal_id, total);
        self.goal_repository
            .update_progress(owner, goal_id, total)
            .await
    }

    /// Recomputes each distinct goal in `goal_ids`. Failures are logged and
    /// returned as warnings instead of errors.
    pub async fn recompute_all(
        &self,
        owner: &UserId,
        goal_ids: Vec<Option<String>>,
    ) -> Vec<RecomputeWarning> {
        let mut seen: Vec<String> = Vec::new();
        let mut warnings = Vec::new();
        for goal_id in goal_ids.into_iter().flatten() {
            if seen.contains(&goal_id) {
                continue;
            }
            if let Err(e) = self.recompute(owner, &goal_id).await {
                warn!("Failed to recompute goal {}: {}", goal_id, e);
                warnings.push(RecomputeWarning::new(
                    RecomputeTarget::GoalAmount,
                    &goal_id,
                    &e,
                ));
            }
            seen.push(goal_id);
        }
        warnings
    }
}

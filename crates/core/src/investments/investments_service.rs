use chrono::Utc;
use log::debug;
use std::sync::Arc;
use uuid::Uuid;

use super::investments_model::{GoalInvestments, Investment, InvestmentUpdate, NewInvestment};
use super::investments_traits::{InvestmentRepositoryTrait, InvestmentServiceTrait};
use crate::errors::Result;
use crate::goals::{GoalAmountRecalculator, GoalRepositoryTrait};
use crate::recompute::Recomputed;
use crate::users::UserId;
use crate::utils::normalize_reference;

/// Service for managing investments and their goal links
pub struct InvestmentService {
    repository: Arc<dyn InvestmentRepositoryTrait>,
    goal_repository: Arc<dyn GoalRepositoryTrait>,
    goal_recalculator: Arc<GoalAmountRecalculator>,
}

impl InvestmentService {
    pub fn new(
        repository: Arc<dyn InvestmentRepositoryTrait>,
        goal_repository: Arc<dyn GoalRepositoryTrait>,
        goal_recalculator: Arc<GoalAmountRecalculator>,
    ) -> Self {
        Self {
            repository,
            goal_repository,
            goal_recalculator,
        }
    }

    /// Resolves a requested goal reference, failing with not-found when the
    /// goal does not belong to `owner`.
    fn resolve_goal(&self, owner: &UserId, goal_id: Option<String>) -> Result<Option<String>> {
        match normalize_reference(goal_id) {
            Some(goal_id) => {
                let goal = self.goal_repository.get_by_id(owner, &goal_id)?;
                Ok(Some(goal.id))
            }
            None => Ok(None),
        }
    }
}

#[async_trait::async_trait]
impl InvestmentServiceTrait for InvestmentService {
    fn get_investments(&self, owner: &UserId) -> Result<Vec<Investment>> {
        self.repository.list(owner)
    }

    fn get_investment(&self, owner: &UserId, investment_id: &str) -> Result<Investment> {
        self.repository.get_by_id(owner, investment_id)
    }

    fn get_goal_investments(&self, owner: &UserId, goal_id: &str) -> Result<GoalInvestments> {
        let investments = self.repository.list_by_goal(owner, goal_id)?;
        Ok(GoalInvestments::new(investments))
    }

    async fn create_investment(
        &self,
        owner: &UserId,
        new_investment: NewInvestment,
    ) -> Result<Recomputed<Investment>> {
        new_investment.validate()?;
        let goal_id = self.resolve_goal(owner, new_investment.goal_id)?;

        let now = Utc::now();
        let mut investment = Investment {
            id: Uuid::new_v4().to_string(),
            user_id: owner.to_string(),
            goal_id,
            name: new_investment.name.trim().to_string(),
            investment_type: new_investment.investment_type.trim().to_string(),
            invested: new_investment.invested,
            current_value: new_investment.current_value,
            returns: None,
            status: Default::default(),
            purchase_date: new_investment.purchase_date.unwrap_or(now),
            created_at: now,
            updated_at: now,
        };
        investment.refresh_performance();

        let created = self.repository.create(owner, investment).await?;
        debug!("Created investment {} for user {}", created.id, owner);

        let warnings = self
            .goal_recalculator
            .recompute_all(owner, vec![created.goal_id.clone()])
            .await;
        Ok(Recomputed::with_warnings(created, warnings))
    }

    async fn update_investment(
        &self,
        owner: &UserId,
        investment_id: &str,
        update: InvestmentUpdate,
    ) -> Result<Recomputed<Investment>> {
        let existing = self.repository.get_by_id(owner, investment_id)?;
        update.validate()?;

        let goal_id = match update.goal_id {
            Some(requested) => self.resolve_goal(owner, Some(requested))?,
            None => existing.goal_id.clone(),
        };

        let mut investment = Investment {
            goal_id,
            name: update.name.trim().to_string(),
            investment_type: update.investment_type.trim().to_string(),
            invested: update.invested,
            current_value: update.current_value,
            purchase_date: update.purchase_date.unwrap_or(existing.purchase_date),
            updated_at: Utc::now(),
            ..existing.clone()
        };
        investment.refresh_performance();

        let updated = self.repository.update(owner, investment).await?;

        // The old goal always changes: either the value moved or the link did.
        let mut goals_to_recompute = vec![existing.goal_id.clone()];
        if updated.goal_id != existing.goal_id {
            goals_to_recompute.push(updated.goal_id.clone());
        }
        let warnings = self
            .goal_recalculator
            .recompute_all(owner, goals_to_recompute)
            .await;
        Ok(Recomputed::with_warnings(updated, warnings))
    }

    async fn delete_investment(
        &self,
        owner: &UserId,
        investment_id: &str,
    ) -> Result<Recomputed<()>> {
        let existing = self.repository.get_by_id(owner, investment_id)?;
        self.repository.delete(owner, investment_id).await?;
        debug!("Deleted investment {} for user {}", investment_id, owner);

        let warnings = self
            .goal_recalculator
            .recompute_all(owner, vec![existing.goal_id])
            .await;
        Ok(Recomputed::with_warnings((), warnings))
    }

    async fn link_goal(
        &self,
        owner: &UserId,
        investment_id: &str,
        goal_id: Option<String>,
    ) -> Result<Recomputed<Investment>> {
        let existing = self.repository.get_by_id(owner, investment_id)?;
        let goal_id = self.resolve_goal(owner, goal_id)?;

        let updated = self
            .repository
            .set_goal(owner, investment_id, goal_id)
            .await?;

        let warnings = self
            .goal_recalculator
            .recompute_all(owner, vec![existing.goal_id, updated.goal_id.clone()])
            .await;
        Ok(Recomputed::with_warnings(updated, warnings))
    }

    async fn unlink_goal(
        &self,
        owner: &UserId,
        investment_id: &str,
    ) -> Result<Recomputed<Investment>> {
        self.link_goal(owner, investment_id, None).await
    }
}

//! Goals domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::GOAL_COMPLETION_PROGRESS;
use crate::errors::{Error, Result, ValidationError};

/// Lifecycle state derived from a goal's progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GoalStatus {
    #[default]
    Planned,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

impl GoalStatus {
    pub fn from_progress(progress: f64) -> Self {
        if progress >= GOAL_COMPLETION_PROGRESS {
            GoalStatus::Completed
        } else if progress > 0.0 {
            GoalStatus::InProgress
        } else {
            GoalStatus::Planned
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GoalStatus::Planned => "Planned",
            GoalStatus::InProgress => "In Progress",
            GoalStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GoalStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Planned" => Ok(GoalStatus::Planned),
            "In Progress" => Ok(GoalStatus::InProgress),
            "Completed" => Ok(GoalStatus::Completed),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown goal status: {}",
                other
            )))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GoalPriority {
    High,
    #[default]
    Medium,
    Low,
}

impl GoalPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalPriority::High => "High",
            GoalPriority::Medium => "Medium",
            GoalPriority::Low => "Low",
        }
    }
}

impl fmt::Display for GoalPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GoalPriority {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "High" => Ok(GoalPriority::High),
            "Medium" => Ok(GoalPriority::Medium),
            "Low" => Ok(GoalPriority::Low),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown goal priority: {}",
                other
            )))),
        }
    }
}

/// Percentage of `target_amount` reached by `current_amount`; 0 for a non-positive target.
pub fn calculate_progress(current_amount: f64, target_amount: f64) -> f64 {
    if target_amount > 0.0 {
        current_amount / target_amount * 100.0
    } else {
        0.0
    }
}

/// Domain model representing a goal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Goal {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub progress: f64,
    pub deadline: DateTime<Utc>,
    pub status: GoalStatus,
    pub priority: GoalPriority,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Goal {
    /// Recomputes `progress` and `status` from the stored amounts.
    pub fn refresh_progress(&mut self) {
        self.progress = calculate_progress(self.current_amount, self.target_amount);
        self.status = GoalStatus::from_progress(self.progress);
    }

    pub fn is_completed(&self) -> bool {
        self.status == GoalStatus::Completed
    }
}

/// Input model for creating a new goal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewGoal {
    pub name: String,
    pub target_amount: f64,
    pub deadline: Option<DateTime<Utc>>,
    pub priority: Option<GoalPriority>,
    pub description: Option<String>,
}

impl NewGoal {
    pub fn validate(&self) -> Result<()> {
        validate_goal_fields(&self.name, self.target_amount)
    }
}

/// Input model for updating an existing goal.
///
/// `deadline` and `priority` keep their stored values when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalUpdate {
    pub name: String,
    pub target_amount: f64,
    pub deadline: Option<DateTime<Utc>>,
    pub priority: Option<GoalPriority>,
    pub description: Option<String>,
}

impl GoalUpdate {
    pub fn validate(&self) -> Result<()> {
        validate_goal_fields(&self.name, self.target_amount)
    }
}

fn validate_goal_fields(name: &str, target_amount: f64) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::Validation(ValidationError::MissingField(
            "Goal name".to_string(),
        )));
    }
    if target_amount.is_nan() || target_amount <= 0.0 {
        return Err(Error::Validation(ValidationError::InvalidInput(
            "Target amount must be greater than 0".to_string(),
        )));
    }
    Ok(())
}

//! Investments domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::GROWING_RETURNS_THRESHOLD;
use crate::errors::{Error, Result, ValidationError};

/// Performance classification derived from an investment's returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum InvestmentStatus {
    Growing,
    #[default]
    Stable,
    Declining,
}

impl InvestmentStatus {
    /// Classifies returns (percent). Unknown returns classify as `Stable`.
    pub fn from_returns(returns: Option<f64>) -> Self {
        match returns {
            Some(r) if r >= GROWING_RETURNS_THRESHOLD => InvestmentStatus::Growing,
            Some(r) if r < 0.0 => InvestmentStatus::Declining,
            _ => InvestmentStatus::Stable,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InvestmentStatus::Growing => "Growing",
            InvestmentStatus::Stable => "Stable",
            InvestmentStatus::Declining => "Declining",
        }
    }
}

impl fmt::Display for InvestmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvestmentStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Growing" => Ok(InvestmentStatus::Growing),
            "Stable" => Ok(InvestmentStatus::Stable),
            "Declining" => Ok(InvestmentStatus::Declining),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown investment status: {}",
                other
            )))),
        }
    }
}

/// Percentage return of `current_value` over `invested`, unset when nothing was invested.
pub fn calculate_returns(invested: f64, current_value: f64) -> Option<f64> {
    if invested > 0.0 {
        Some((current_value - invested) / invested * 100.0)
    } else {
        None
    }
}

/// Domain model representing an investment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Investment {
    pub id: String,
    pub user_id: String,
    pub goal_id: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub investment_type: String,
    pub invested: f64,
    pub current_value: f64,
    pub returns: Option<f64>,
    pub status: InvestmentStatus,
    pub purchase_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Investment {
    /// Recomputes `returns` and `status` from the stored amounts.
    pub fn refresh_performance(&mut self) {
        self.returns = calculate_returns(self.invested, self.current_value);
        self.status = InvestmentStatus::from_returns(self.returns);
    }

    pub fn gains(&self) -> f64 {
        self.current_value - self.invested
    }
}

/// Input model for creating a new investment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewInvestment {
    pub name: String,
    #[serde(rename = "type")]
    pub investment_type: String,
    pub invested: f64,
    #[serde(default)]
    pub current_value: f64,
    pub purchase_date: Option<DateTime<Utc>>,
    pub goal_id: Option<String>,
}

impl NewInvestment {
    pub fn validate(&self) -> Result<()> {
        validate_descriptors(&self.name, &self.investment_type)?;
        if self.invested.is_nan() || self.invested <= 0.0 {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Invested amount must be greater than 0".to_string(),
            )));
        }
        validate_current_value(self.current_value)
    }
}

/// Input model for updating an existing investment.
///
/// `purchase_date` and `goal_id` keep their stored values when absent; a blank
/// `goal_id` clears the link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentUpdate {
    pub name: String,
    #[serde(rename = "type")]
    pub investment_type: String,
    pub invested: f64,
    #[serde(default)]
    pub current_value: f64,
    pub purchase_date: Option<DateTime<Utc>>,
    pub goal_id: Option<String>,
}

impl InvestmentUpdate {
    pub fn validate(&self) -> Result<()> {
        validate_descriptors(&self.name, &self.investment_type)?;
        if self.invested.is_nan() || self.invested < 0.0 {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Invested amount cannot be negative".to_string(),
            )));
        }
        validate_current_value(self.current_value)
    }
}

fn validate_descriptors(name: &str, investment_type: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::Validation(ValidationError::MissingField(
            "Investment name".to_string(),
        )));
    }
    if investment_type.trim().is_empty() {
        return Err(Error::Validation(ValidationError::MissingField(
            "Investment type".to_string(),
        )));
    }
    Ok(())
}

fn validate_current_value(current_value: f64) -> Result<()> {
    if !current_value.is_finite() {
        return Err(Error::Validation(ValidationError::InvalidInput(
            "Current value must be a finite number".to_string(),
        )));
    }
    Ok(())
}

/// Investments linked to one goal, with their combined current value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GoalInvestments {
    pub investments: Vec<Investment>,
    pub total: f64,
    pub count: usize,
}

impl GoalInvestments {
    pub fn new(investments: Vec<Investment>) -> Self {
        let total = investments.iter().fold(0.0, |acc, i| acc + i.current_value);
        let count = investments.len();
        Self {
            investments,
            total,
            count,
        }
    }
}

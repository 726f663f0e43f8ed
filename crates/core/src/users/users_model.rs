//! User domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{Error, Result, ValidationError};

/// Identifier of the authenticated user that owns a set of records.
///
/// Every repository method for owned entities takes one of these, so queries
/// are always scoped to a single owner.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Domain model representing a user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub monthly_income: Option<f64>,
    pub monthly_expenses: Option<f64>,
    pub monthly_savings: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn user_id(&self) -> UserId {
        UserId::new(self.id.clone())
    }
}

/// Identity returned by the login provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub name: Option<String>,
}

impl NewUser {
    pub fn validate(&self) -> Result<()> {
        if self.email.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "Email".to_string(),
            )));
        }
        Ok(())
    }
}

/// Partial update of the cached monthly figures. Only supplied values are written.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FinancialsUpdate {
    pub monthly_income: Option<f64>,
    pub monthly_expenses: Option<f64>,
    pub monthly_savings: Option<f64>,
}

impl FinancialsUpdate {
    pub fn is_empty(&self) -> bool {
        self.monthly_income.is_none()
            && self.monthly_expenses.is_none()
            && self.monthly_savings.is_none()
    }

    /// Applies the supplied values onto `user`, leaving the rest untouched.
    pub fn apply_to(&self, user: &mut User) {
        if let Some(income) = self.monthly_income {
            user.monthly_income = Some(income);
        }
        if let Some(expenses) = self.monthly_expenses {
            user.monthly_expenses = Some(expenses);
        }
        if let Some(savings) = self.monthly_savings {
            user.monthly_savings = Some(savings);
        }
    }
}

//! Outcome of a write that triggers derived-value recomputation.
//!
//! Recomputing a goal's amount or a budget's savings happens after the primary
//! write has been committed. A failing recompute does not undo that write;
//! instead the failure travels back to the caller as a [`RecomputeWarning`].

use serde::Serialize;

/// Which derived value a recompute step was maintaining.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecomputeTarget {
    GoalAmount,
    BudgetSavings,
}

/// A recompute step that failed after the primary write succeeded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecomputeWarning {
    pub target: RecomputeTarget,
    pub entity_id: String,
    pub message: String,
}

impl RecomputeWarning {
    pub fn new(target: RecomputeTarget, entity_id: &str, error: &crate::Error) -> Self {
        Self {
            target,
            entity_id: entity_id.to_string(),
            message: error.to_string(),
        }
    }
}

/// Primary result of a mutation plus any recompute warnings.
#[derive(Debug, Clone)]
pub struct Recomputed<T> {
    pub value: T,
    pub warnings: Vec<RecomputeWarning>,
}

impl<T> Recomputed<T> {
    pub fn clean(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    pub fn with_warnings(value: T, warnings: Vec<RecomputeWarning>) -> Self {
        Self { value, warnings }
    }

    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Recomputed<U> {
        Recomputed {
            value: f(self.value),
            warnings: self.warnings,
        }
    }
}

use fintrack_core::{RecomputeWarning, Recomputed};
use serde::Serialize;

/// Plain acknowledgement body, e.g. `{"message": "Goal deleted successfully"}`.
#[derive(Serialize, Debug, Clone)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Entity body of a mutation. `warnings` only appears when a recompute step failed.
#[derive(Serialize, Debug)]
pub struct MutationResponse<T: Serialize> {
    #[serde(flatten)]
    pub value: T,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<RecomputeWarning>,
}

impl<T: Serialize> From<Recomputed<T>> for MutationResponse<T> {
    fn from(result: Recomputed<T>) -> Self {
        Self {
            value: result.value,
            warnings: result.warnings,
        }
    }
}

impl MutationResponse<MessageResponse> {
    /// Acknowledges a mutation with no entity body, keeping its warnings.
    pub fn acknowledge(result: Recomputed<()>, message: &str) -> Self {
        Self::from(result.map(|_| MessageResponse::new(message)))
    }
}

#[derive(Serialize, Debug)]
pub struct LinkGoalResponse {
    pub message: String,
    pub goal_id: Option<String>,
}

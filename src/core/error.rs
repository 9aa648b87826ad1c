use thiserror::Error;

/// Errors raised at the boundary of the planning engine.
///
/// The projection functions themselves never fail; degenerate inputs produce
/// zeroed or empty tables. These errors cover caller-side validation and
/// goal list maintenance.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    #[error("{field} {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("goal not found: {id}")]
    GoalNotFound { id: String },

    #[error("goal already exists: {id}")]
    DuplicateGoal { id: String },
}

impl PlanError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PlanError>;

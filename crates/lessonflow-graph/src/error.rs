use std::time::Duration;
use thiserror::Error;

/// Errors raised while building or running a lesson flow
#[derive(Debug, Error)]
pub enum FlowError {
    /// Graph is missing a required piece; raised by `GraphBuilder::build`
    #[error("Invalid graph configuration: {0}")]
    Configuration(String),

    #[error("User query is empty")]
    EmptyQuery,

    #[error("Content generation failed: {0}")]
    Generation(#[source] anyhow::Error),

    #[error("Feedback scoring failed: {0}")]
    Scoring(#[source] anyhow::Error),

    #[error("Quiz score {0} is outside [0, 1]")]
    ScoreOutOfRange(f64),

    #[error("Lesson flow timed out after {0:?}")]
    Timeout(Duration),

    /// The event receiver of a spawned run was dropped
    #[error("Lesson flow cancelled: event receiver dropped")]
    Cancelled,
}

impl FlowError {
    /// True for failures caused by an external collaborator rather than the caller
    pub fn is_collaborator_failure(&self) -> bool {
        matches!(
            self,
            Self::Generation(_) | Self::Scoring(_) | Self::ScoreOutOfRange(_) | Self::Timeout(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, FlowError>;

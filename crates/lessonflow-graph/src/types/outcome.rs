use crate::types::LessonState;
use serde::{Deserialize, Serialize};

/// How a run reached the terminal marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowStatus {
    /// Quiz score met the threshold
    Completed,
    /// Iteration bound hit while the score was still below the threshold
    MaxIterationsExceeded,
}

impl FlowStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::MaxIterationsExceeded => "max_iterations_exceeded",
        }
    }
}

impl std::fmt::Display for FlowStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of `Graph::run`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowOutcome {
    pub run_id: String,
    pub state: LessonState,
    pub status: FlowStatus,
    /// Number of content-generation visits
    pub iterations: usize,
    pub duration_ms: u64,
}

impl FlowOutcome {
    pub fn is_completed(&self) -> bool {
        self.status == FlowStatus::Completed
    }
}

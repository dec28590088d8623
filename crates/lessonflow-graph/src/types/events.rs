use crate::node::NodeType;
use crate::types::FlowStatus;
use serde::{Deserialize, Serialize};

/// Progress events emitted by `Graph::spawn_run`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FlowEvent {
    /// Run started
    InitStream {
        run_id: String,
        user_query: String,
        timestamp: i64,
    },

    /// A node finished executing
    NodeCompleted {
        node: NodeType,
        iteration: usize,
        duration_ms: u64,
    },

    /// New lesson content was generated
    LessonContent {
        iteration: usize,
        content: String,
    },

    /// Feedback analyzer produced a score
    QuizScore {
        iteration: usize,
        score: f64,
    },

    /// Score fell below the threshold, regenerating content
    Retry {
        iteration: usize,
        score: f64,
        threshold: f64,
    },

    /// Fatal error occurred
    Error {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        node: Option<NodeType>,
    },

    /// Run finished
    EndStream {
        status: FlowStatus,
        iterations: usize,
        quiz_score: f64,
        total_duration_ms: u64,
    },
}

impl FlowEvent {
    /// SSE event name, matching the serde tag
    pub fn name(&self) -> &'static str {
        match self {
            Self::InitStream { .. } => "init_stream",
            Self::NodeCompleted { .. } => "node_completed",
            Self::LessonContent { .. } => "lesson_content",
            Self::QuizScore { .. } => "quiz_score",
            Self::Retry { .. } => "retry",
            Self::Error { .. } => "error",
            Self::EndStream { .. } => "end_stream",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Error { .. } | Self::EndStream { .. })
    }
}

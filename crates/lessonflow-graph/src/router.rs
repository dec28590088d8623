use crate::node::NodeType;
use crate::types::{LessonState, DEFAULT_SCORE_THRESHOLD};

/// Decides which node to execute next based on current state
pub trait Router: Send + Sync {
    fn next(&self, state: &LessonState, current: NodeType) -> NextNode;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextNode {
    ContentGeneration,
    FeedbackAnalyzer,
    End,
}

/// Lesson flow routing:
/// user_input -> content_generation -> feedback_analyzer -> (content_generation | END)
///
/// The only conditional edge leaves `feedback_analyzer`: a score strictly
/// below the threshold loops, anything else terminates.
#[derive(Debug, Clone, Copy)]
pub struct LessonRouter {
    threshold: f64,
}

impl LessonRouter {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }
}

impl Default for LessonRouter {
    fn default() -> Self {
        Self::new(DEFAULT_SCORE_THRESHOLD)
    }
}

impl Router for LessonRouter {
    fn next(&self, state: &LessonState, current: NodeType) -> NextNode {
        let below_threshold = state.quiz_score() < self.threshold;

        match (current, below_threshold) {
            (NodeType::UserInput, _) => NextNode::ContentGeneration,
            (NodeType::ContentGeneration, _) => NextNode::FeedbackAnalyzer,
            (NodeType::FeedbackAnalyzer, true) => NextNode::ContentGeneration,
            (NodeType::FeedbackAnalyzer, false) => NextNode::End,
        }
    }
}

use crate::error::{FlowError, Result};
use crate::node::{Node, NodeType};
use crate::scorer::FeedbackScorer;
use crate::types::LessonState;
use async_trait::async_trait;
use std::sync::Arc;

#[derive(Clone)]
pub struct FeedbackAnalyzerNode {
    scorer: Arc<dyn FeedbackScorer>,
}

impl FeedbackAnalyzerNode {
    pub fn new(scorer: Arc<dyn FeedbackScorer>) -> Self {
        Self { scorer }
    }
}

#[async_trait]
impl Node for FeedbackAnalyzerNode {
    async fn execute(&self, state: &mut LessonState) -> Result<()> {
        let score = self
            .scorer
            .score(state.lesson_content())
            .await
            .map_err(FlowError::Scoring)?;

        // NaN fails the range check as well
        if !(0.0..=1.0).contains(&score) {
            return Err(FlowError::ScoreOutOfRange(score));
        }

        tracing::debug!(score, "FEEDBACK_ANALYZER: quiz scored");

        state.set_quiz_score(score);
        Ok(())
    }

    fn node_type(&self) -> NodeType {
        NodeType::FeedbackAnalyzer
    }
}

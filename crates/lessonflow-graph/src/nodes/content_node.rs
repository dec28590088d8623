use crate::error::{FlowError, Result};
use crate::generator::ContentGenerator;
use crate::node::{Node, NodeType};
use crate::types::LessonState;
use async_trait::async_trait;
use std::sync::Arc;

#[derive(Clone)]
pub struct ContentGenerationNode {
    generator: Arc<dyn ContentGenerator>,
}

impl ContentGenerationNode {
    pub fn new(generator: Arc<dyn ContentGenerator>) -> Self {
        Self { generator }
    }
}

#[async_trait]
impl Node for ContentGenerationNode {
    async fn execute(&self, state: &mut LessonState) -> Result<()> {
        let content = self
            .generator
            .generate(state.user_query())
            .await
            .map_err(FlowError::Generation)?;

        tracing::debug!(chars = content.len(), "CONTENT_GENERATION: lesson content produced");

        state.set_lesson_content(content);
        Ok(())
    }

    fn node_type(&self) -> NodeType {
        NodeType::ContentGeneration
    }
}

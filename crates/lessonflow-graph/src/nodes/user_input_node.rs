use crate::error::{FlowError, Result};
use crate::node::{Node, NodeType};
use crate::types::LessonState;
use async_trait::async_trait;

/// Entry node. The query itself is supplied by whoever builds the initial
/// state (e.g. the `topic` field of an HTTP request); this node only checks it.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserInputNode;

#[async_trait]
impl Node for UserInputNode {
    async fn execute(&self, state: &mut LessonState) -> Result<()> {
        if state.user_query().trim().is_empty() {
            return Err(FlowError::EmptyQuery);
        }

        tracing::debug!(user_query = %state.user_query(), "USER_INPUT: query accepted");
        Ok(())
    }

    fn node_type(&self) -> NodeType {
        NodeType::UserInput
    }
}

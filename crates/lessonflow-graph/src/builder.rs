use std::sync::Arc;

use crate::error::{FlowError, Result};
use crate::generator::ContentGenerator;
use crate::graph::Graph;
use crate::node::NodeType;
use crate::router::{LessonRouter, Router};
use crate::scorer::FeedbackScorer;
use crate::types::GraphConfig;

/// Builder for constructing a Graph
///
/// Every piece is mandatory; `build` fails fast instead of producing a graph
/// that cannot run.
pub struct GraphBuilder {
    entry_point: Option<NodeType>,
    generator: Option<Arc<dyn ContentGenerator>>,
    scorer: Option<Arc<dyn FeedbackScorer>>,
    router: Option<Arc<dyn Router>>,
    use_lesson_router: bool,
    config: GraphConfig,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            entry_point: None,
            generator: None,
            scorer: None,
            router: None,
            use_lesson_router: false,
            config: GraphConfig::default(),
        }
    }

    /// Set the node execution starts at
    pub fn entry_point(mut self, node: NodeType) -> Self {
        self.entry_point = Some(node);
        self
    }

    pub fn generator(mut self, generator: Arc<dyn ContentGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn scorer(mut self, scorer: Arc<dyn FeedbackScorer>) -> Self {
        self.scorer = Some(scorer);
        self
    }

    /// Wire a custom router for the conditional edge
    pub fn router(mut self, router: Arc<dyn Router>) -> Self {
        self.router = Some(router);
        self.use_lesson_router = false;
        self
    }

    /// Wire a `LessonRouter` using the final config's score threshold
    pub fn lesson_router(mut self) -> Self {
        self.router = None;
        self.use_lesson_router = true;
        self
    }

    /// Set the graph configuration
    pub fn config(mut self, config: GraphConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the Graph
    pub fn build(self) -> Result<Graph> {
        let entry_point = self
            .entry_point
            .ok_or_else(|| FlowError::Configuration("entry point is not set".to_string()))?;
        if entry_point == NodeType::FeedbackAnalyzer {
            return Err(FlowError::Configuration(
                "entry point must be user_input or content_generation".to_string(),
            ));
        }

        let generator = self
            .generator
            .ok_or_else(|| FlowError::Configuration("content generator is required".to_string()))?;
        let scorer = self
            .scorer
            .ok_or_else(|| FlowError::Configuration("feedback scorer is required".to_string()))?;

        if self.config.max_iterations == 0 {
            return Err(FlowError::Configuration(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        let threshold = self.config.score_threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(FlowError::Configuration(format!(
                "score_threshold {threshold} is outside [0, 1]"
            )));
        }

        let router = match self.router {
            Some(router) => router,
            None if self.use_lesson_router => Arc::new(LessonRouter::new(threshold)),
            None => {
                return Err(FlowError::Configuration(
                    "conditional edge is not wired: a router is required".to_string(),
                ))
            }
        };

        Ok(Graph::new(entry_point, generator, scorer, router, self.config))
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::TemplateGenerator;
    use crate::scorer::FixedScorer;

    fn complete() -> GraphBuilder {
        GraphBuilder::new()
            .entry_point(NodeType::UserInput)
            .generator(Arc::new(TemplateGenerator))
            .scorer(Arc::new(FixedScorer(0.9)))
            .lesson_router()
    }

    fn config_error(builder: GraphBuilder) -> String {
        match builder.build() {
            Err(FlowError::Configuration(msg)) => msg,
            Err(other) => panic!("expected configuration error, got {other}"),
            Ok(_) => panic!("expected configuration error"),
        }
    }

    #[test]
    fn test_complete_builder() {
        let graph = complete().build().unwrap();
        assert_eq!(graph.entry_point(), NodeType::UserInput);
    }

    #[test]
    fn test_missing_entry_point() {
        let builder = GraphBuilder::new()
            .generator(Arc::new(TemplateGenerator))
            .scorer(Arc::new(FixedScorer(0.9)))
            .lesson_router();
        assert!(config_error(builder).contains("entry point"));
    }

    #[test]
    fn test_feedback_entry_point_rejected() {
        assert!(config_error(complete().entry_point(NodeType::FeedbackAnalyzer)).contains("entry point"));
    }

    #[test]
    fn test_missing_router() {
        let builder = GraphBuilder::new()
            .entry_point(NodeType::UserInput)
            .generator(Arc::new(TemplateGenerator))
            .scorer(Arc::new(FixedScorer(0.9)));
        assert!(config_error(builder).contains("conditional edge"));
    }

    #[test]
    fn test_missing_collaborators() {
        let no_generator = GraphBuilder::new()
            .entry_point(NodeType::UserInput)
            .scorer(Arc::new(FixedScorer(0.9)))
            .lesson_router();
        assert!(config_error(no_generator).contains("generator"));

        let no_scorer = GraphBuilder::new()
            .entry_point(NodeType::UserInput)
            .generator(Arc::new(TemplateGenerator))
            .lesson_router();
        assert!(config_error(no_scorer).contains("scorer"));
    }

    #[test]
    fn test_invalid_config() {
        let zero = complete().config(GraphConfig::new().with_max_iterations(0));
        assert!(config_error(zero).contains("max_iterations"));

        let threshold = complete().config(GraphConfig::new().with_score_threshold(1.5));
        assert!(config_error(threshold).contains("score_threshold"));
    }
}

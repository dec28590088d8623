use std::sync::Arc;

use lessonflow_graph::{
    ContentGenerator, Graph, GraphConfig, LlmContentGenerator, RandomScorer, TemplateGenerator,
};
use lessonflow_llm::{ChatClient, OpenAIClient};

use crate::config::{Config, GeneratorKind};
use crate::error::{ApiError, ApiResult};
use crate::users::{InMemoryUserStore, UserStore};

/// Shared application state passed to all handlers
///
/// The Graph is immutable and built once at startup; every request runs it
/// with its own `LessonState`.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub llm_client: Option<Arc<dyn ChatClient>>,
    pub graph: Arc<Graph>,
    pub users: Arc<dyn UserStore>,
}

impl AppState {
    pub fn new(config: Config, llm_client: Option<Arc<dyn ChatClient>>, graph: Graph) -> Self {
        Self {
            config: Arc::new(config),
            llm_client,
            graph: Arc::new(graph),
            users: Arc::new(InMemoryUserStore::new()),
        }
    }

    /// Wire the LLM client and lesson flow described by `config`
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let llm_client: Option<Arc<dyn ChatClient>> = match &config.openai_api_key {
            Some(key) => {
                let client = OpenAIClient::new(config.llm.openai_config(key.clone()))?;
                Some(Arc::new(client))
            }
            None => {
                tracing::warn!("OPENAI_API_KEY is not set, AI endpoints are disabled");
                None
            }
        };

        let generator: Arc<dyn ContentGenerator> = match (config.flow.generator, &llm_client) {
            (GeneratorKind::Template, _) => Arc::new(TemplateGenerator),
            (GeneratorKind::Llm, Some(client)) => Arc::new(
                LlmContentGenerator::new(client.clone(), config.llm.model.clone())
                    .with_options(config.llm.chat_options()),
            ),
            (GeneratorKind::Llm, None) => {
                anyhow::bail!("flow.generator = \"llm\" requires OPENAI_API_KEY to be set")
            }
        };

        let graph = Graph::lesson_flow(
            generator,
            Arc::new(RandomScorer),
            GraphConfig::from(&config.flow),
        )?;

        tracing::info!(
            generator = config.flow.generator.as_str(),
            max_iterations = config.flow.max_iterations,
            score_threshold = config.flow.score_threshold,
            "Lesson flow ready"
        );

        Ok(Self::new(config, llm_client, graph))
    }

    /// Client for the AI endpoints, or the "not configured" error
    pub fn chat_client(&self) -> ApiResult<&Arc<dyn ChatClient>> {
        self.llm_client.as_ref().ok_or(ApiError::ModelNotConfigured)
    }
}

use anyhow::{Context, Result};
use async_trait::async_trait;
use lessonflow_llm::{ChatClient, ChatOptions, ChatRequest};
use std::sync::Arc;

/// Produces lesson content for a user query
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate(&self, query: &str) -> Result<String>;
}

/// Prompt asking the model for a beginner-friendly lesson on `topic`
pub fn lesson_prompt(topic: &str) -> String {
    format!(
        "Generate a detailed, beginner-friendly lesson on the topic: {topic}. \
         The lesson should be well-structured with clear explanations, headings, and bullet points."
    )
}

/// Deterministic generator: `"Lesson on: {query}"`
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateGenerator;

impl TemplateGenerator {
    pub fn render(query: &str) -> String {
        format!("Lesson on: {query}")
    }
}

#[async_trait]
impl ContentGenerator for TemplateGenerator {
    async fn generate(&self, query: &str) -> Result<String> {
        Ok(Self::render(query))
    }
}

/// Generator backed by a chat model
pub struct LlmContentGenerator {
    client: Arc<dyn ChatClient>,
    model: String,
    options: ChatOptions,
}

impl LlmContentGenerator {
    pub fn new(client: Arc<dyn ChatClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
            options: ChatOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ChatOptions) -> Self {
        self.options = options;
        self
    }
}

#[async_trait]
impl ContentGenerator for LlmContentGenerator {
    async fn generate(&self, query: &str) -> Result<String> {
        let request = ChatRequest::prompt(self.model.clone(), lesson_prompt(query))
            .with_options(self.options.clone());

        let response = self
            .client
            .chat(request)
            .await
            .context("Lesson generation request failed")?;

        let content = response.text().trim();
        if content.is_empty() {
            anyhow::bail!("Model returned an empty lesson");
        }

        Ok(content.to_string())
    }
}

use anyhow::Result;
use async_trait::async_trait;

/// Assesses how well lesson content was understood, as a score in [0, 1]
#[async_trait]
pub trait FeedbackScorer: Send + Sync {
    async fn score(&self, content: &str) -> Result<f64>;
}

/// Simulated quiz: uniform score in [0, 1)
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomScorer;

#[async_trait]
impl FeedbackScorer for RandomScorer {
    async fn score(&self, _content: &str) -> Result<f64> {
        Ok(rand::random::<f64>())
    }
}

/// Always returns the same score
#[derive(Debug, Clone, Copy)]
pub struct FixedScorer(pub f64);

#[async_trait]
impl FeedbackScorer for FixedScorer {
    async fn score(&self, _content: &str) -> Result<f64> {
        Ok(self.0)
    }
}

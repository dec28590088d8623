use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default pass mark for the simulated quiz
pub const DEFAULT_SCORE_THRESHOLD: f64 = 0.7;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Upper bound on content-generation visits per run
    pub max_iterations: usize,
    /// Scores strictly below this loop back to content generation
    pub score_threshold: f64,
    pub execution_timeout: Duration,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            max_iterations: 5,
            score_threshold: DEFAULT_SCORE_THRESHOLD,
            execution_timeout: Duration::from_secs(120),
        }
    }
}

impl GraphConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    pub fn with_score_threshold(mut self, threshold: f64) -> Self {
        self.score_threshold = threshold;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.execution_timeout = timeout;
        self
    }
}

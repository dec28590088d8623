//! Mock chat client for tests and examples.
//!
//! Returns a fixed reply (or a fixed failure) and records every request so
//! callers can assert on the prompts that were sent.

use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;

use crate::traits::{ChatClient, ChatRequest, ChatResponse};

enum Reply {
    Text(String),
    Fail(String),
}

pub struct MockChatClient {
    reply: Reply,
    requests: Mutex<Vec<ChatRequest>>,
}

impl MockChatClient {
    /// Build a mock that answers every request with `content`.
    pub fn replying(content: impl Into<String>) -> Self {
        Self {
            reply: Reply::Text(content.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Build a mock whose every call fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            reply: Reply::Fail(message.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().map(|guard| guard.len()).unwrap_or(0)
    }
}

#[async_trait]
impl ChatClient for MockChatClient {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        if let Ok(mut guard) = self.requests.lock() {
            guard.push(request);
        }

        match &self.reply {
            Reply::Text(content) => Ok(ChatResponse {
                content: Some(content.clone()),
                usage: None,
                finish_reason: Some("stop".to_string()),
                raw: serde_json::Value::Null,
            }),
            Reply::Fail(message) => anyhow::bail!("{}", message),
        }
    }
}

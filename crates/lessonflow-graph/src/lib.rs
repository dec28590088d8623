pub mod types;
pub mod error;
pub mod node;
pub mod router;
pub mod nodes;
pub mod generator;
pub mod scorer;
pub mod builder;
pub mod graph;

pub use error::FlowError;
pub use node::{EventSender, Node, NodeType};
pub use router::{LessonRouter, NextNode, Router};
pub use generator::{lesson_prompt, ContentGenerator, LlmContentGenerator, TemplateGenerator};
pub use scorer::{FeedbackScorer, FixedScorer, RandomScorer};
pub use builder::GraphBuilder;
pub use graph::Graph;

pub use types::{FlowEvent, FlowOutcome, FlowStatus, GraphConfig, LessonState};

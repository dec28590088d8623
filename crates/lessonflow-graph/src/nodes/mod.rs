pub mod user_input_node;
pub mod content_node;
pub mod feedback_node;

pub use user_input_node::UserInputNode;
pub use content_node::ContentGenerationNode;
pub use feedback_node::FeedbackAnalyzerNode;

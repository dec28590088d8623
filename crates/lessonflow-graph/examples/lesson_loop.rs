use anyhow::Result;
use lessonflow_graph::{
    ContentGenerator, FlowEvent, Graph, GraphConfig, LessonState, LlmContentGenerator, RandomScorer,
    TemplateGenerator,
};
use lessonflow_llm::{OpenAIClient, OpenAIConfig};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber_init();

    let topic = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "Explain photosynthesis".to_string());

    // Use the real model when a key is available, the template otherwise
    let generator: Arc<dyn ContentGenerator> = match std::env::var("OPENAI_API_KEY") {
        Ok(api_key) => {
            let client = Arc::new(OpenAIClient::new(OpenAIConfig::new(api_key))?);
            Arc::new(LlmContentGenerator::new(client, "gpt-4o-mini"))
        }
        Err(_) => Arc::new(TemplateGenerator),
    };

    let graph = Graph::lesson_flow(generator, Arc::new(RandomScorer), GraphConfig::default())?;

    let mut events = graph.spawn_run(LessonState::new(topic));
    while let Some(event) = events.recv().await {
        match event {
            FlowEvent::LessonContent { iteration, content } => {
                println!("\n--- lesson (attempt {iteration}) ---\n{content}");
            }
            FlowEvent::QuizScore { score, .. } => println!("quiz score: {score:.2}"),
            FlowEvent::Retry { threshold, .. } => println!("below {threshold}, regenerating..."),
            FlowEvent::EndStream { status, iterations, .. } => {
                println!("\n{status} after {iterations} attempt(s)");
            }
            FlowEvent::Error { message, .. } => eprintln!("error: {message}"),
            _ => {}
        }
    }

    Ok(())
}

fn tracing_subscriber_init() {
    // Examples stay quiet unless RUST_LOG is set
    if std::env::var("RUST_LOG").is_ok() {
        let _ = tracing_subscriber::fmt::try_init();
    }
}

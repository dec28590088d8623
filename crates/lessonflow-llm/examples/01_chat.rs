use anyhow::Result;
use lessonflow_llm::{ChatClient, ChatRequest, Message, OpenAIClient, OpenAIConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let api_key = std::env::var("OPENAI_API_KEY")?;
    let client = OpenAIClient::new(OpenAIConfig::new(api_key))?;

    let request = ChatRequest::new(
        "gpt-4o-mini",
        vec![
            Message::system("You are a patient tutor."),
            Message::human("Explain photosynthesis in two sentences."),
        ],
    );

    let response = client.chat(request).await?;

    println!("Response: {}", response.text());

    if let Some(usage) = response.usage {
        println!("Tokens used: {}", usage.total_tokens);
    }

    Ok(())
}

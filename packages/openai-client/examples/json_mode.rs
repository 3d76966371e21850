//! JSON-mode chat completion example

use openai_client::{ChatRequest, Message, OpenAIClient, ResponseFormat};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = OpenAIClient::from_env()?;

    let response = client
        .chat_completion(
            ChatRequest::new("gpt-4o-mini")
                .message(Message::system(
                    "Return ONLY JSON: { \"minutes\": number or null }",
                ))
                .message(Message::user("Tue 11/4 we walked 28 minutes"))
                .temperature(0.0)
                .response_format(ResponseFormat::JsonObject),
        )
        .await?;

    println!("Raw JSON: {}", response.content);

    let parsed: serde_json::Value = serde_json::from_str(&response.content)?;
    println!("Minutes: {}", parsed["minutes"]);

    if let Some(usage) = response.usage {
        println!("Tokens used: {}", usage.total_tokens);
    }

    Ok(())
}

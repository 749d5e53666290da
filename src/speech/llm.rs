//! Assistant replies via the hosted chat-completion API

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

const COMPLETIONS_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

/// Generates the assistant reply for a transcribed utterance
pub struct ChatCompletion {
    client: reqwest::Client,
    api_key: String,
    model: String,
    system_prompt: String,
    max_tokens: u32,
    temperature: f32,
}

impl ChatCompletion {
    /// Create a new chat completion client
    ///
    /// # Errors
    ///
    /// Returns error if the API key is missing
    pub fn new(
        api_key: String,
        model: String,
        system_prompt: String,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<Self> {
        if api_key.is_empty() {
            return Err(Error::Config(
                "API key required for chat completion".to_string(),
            ));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            model,
            system_prompt,
            max_tokens,
            temperature,
        })
    }

    /// Generate a reply to the user's utterance
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or no choices come back
    pub async fn complete(&self, user_text: &str) -> Result<String> {
        tracing::debug!(model = %self.model, "requesting completion");

        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &self.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_text,
                },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let response = self
            .client
            .post(COMPLETIONS_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "completion API error");
            return Err(Error::Llm(format!("completion error {status}: {body}")));
        }

        let result: ChatResponse = response.json().await?;
        let reply = result
            .choices
            .first()
            .map(|c| c.message.content.trim().to_string())
            .ok_or_else(|| Error::Llm("no choices in completion response".to_string()))?;

        tracing::info!(reply = %reply, "completion finished");
        Ok(reply)
    }
}

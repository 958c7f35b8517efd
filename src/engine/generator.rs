//! Generative backends for pairs with no predetermined result.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use ollama_rs::Ollama;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::item::Item;

/// Payload sent to a generator. Field names follow the combination endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    #[serde(rename = "element1")]
    pub item_a: Item,
    #[serde(rename = "element2")]
    pub item_b: Item,
    pub context: String,
}

/// Raw generator answer. Only `name` and `icon` are mandatory; the engine
/// fills in the rest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratedItem {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedItem>;
}

/// Posts the request as JSON to a combination endpoint.
pub struct HttpGenerator {
    client: Client,
    url: String,
}

impl HttpGenerator {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl Generator for HttpGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedItem> {
        let res = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .with_context(|| format!("combination request to {} failed", self.url))?
            .error_for_status()?;

        let item: GeneratedItem = res
            .json()
            .await
            .context("Failed to parse combination response")?;
        Ok(item)
    }
}

const OLLAMA_SYSTEM_PROMPT: &str = "You invent results for a crafting game. \
    Given two ingredients, answer with a single JSON object with the keys \
    \"name\", \"icon\" (one emoji), \"category\" (one lowercase word) and \
    \"description\" (one sentence). Answer with the JSON object only.";

/// Asks a local Ollama model to invent the result.
pub struct OllamaGenerator {
    client: Ollama,
    model: String,
}

impl OllamaGenerator {
    pub fn new(client: Ollama, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    fn prompt(request: &GenerationRequest) -> String {
        format!(
            "Game: {}\nFirst ingredient: {} ({})\nSecond ingredient: {} ({})\nWhat do they make?",
            request.context,
            request.item_a.name,
            request.item_a.category,
            request.item_b.name,
            request.item_b.category,
        )
    }
}

#[async_trait]
impl Generator for OllamaGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedItem> {
        use ollama_rs::generation::chat::{request::ChatMessageRequest, ChatMessage};

        let messages = vec![
            ChatMessage::system(OLLAMA_SYSTEM_PROMPT.to_string()),
            ChatMessage::user(Self::prompt(request)),
        ];

        let res = self
            .client
            .send_chat_messages(ChatMessageRequest::new(self.model.clone(), messages))
            .await?;

        parse_generated(&res.message.content)
    }
}

/// Pull the first `{...}` span out of free-form model output.
pub fn parse_generated(response: &str) -> Result<GeneratedItem> {
    let (Some(start), Some(end)) = (response.find('{'), response.rfind('}')) else {
        bail!("no JSON object in generator output");
    };
    if end < start {
        bail!("no JSON object in generator output");
    }
    serde_json::from_str(&response[start..=end]).context("Failed to parse generator JSON")
}

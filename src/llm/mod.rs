pub mod providers;
pub mod report;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// LLM provider types
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum LLMProvider {
    Groq,
    OpenAI,
    LMStudio,
}

impl LLMProvider {
    /// Chat-completions endpoint used when none is configured
    pub fn default_endpoint(&self) -> &'static str {
        match self {
            LLMProvider::Groq => "https://api.groq.com/openai/v1/chat/completions",
            LLMProvider::OpenAI => "https://api.openai.com/v1/chat/completions",
            LLMProvider::LMStudio => "http://localhost:1234/v1/chat/completions",
        }
    }

    /// Whether the provider refuses requests without an API key
    pub fn requires_api_key(&self) -> bool {
        !matches!(self, LLMProvider::LMStudio)
    }
}

impl FromStr for LLMProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "groq" => Ok(LLMProvider::Groq),
            "openai" => Ok(LLMProvider::OpenAI),
            "lmstudio" | "lm-studio" => Ok(LLMProvider::LMStudio),
            other => Err(anyhow!("Unknown LLM provider: {}", other)),
        }
    }
}

/// LLM configuration, passed explicitly to every client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMConfig {
    pub provider: LLMProvider,
    /// Overrides the provider's default endpoint
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout_seconds: u64,
    /// Ask the provider for a JSON object response
    pub json_mode: bool,
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            provider: LLMProvider::Groq,
            endpoint: None,
            api_key: None,
            model: "llama-3.3-70b-versatile".to_string(),
            max_tokens: 4096,
            temperature: 0.0,
            timeout_seconds: 60,
            json_mode: true,
        }
    }
}

impl LLMConfig {
    /// Read provider, credentials and model from the environment
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Overlay provider, model and endpoint variables on this configuration.
    ///
    /// An API key already present is kept; the environment only fills a missing one.
    pub fn apply_env(&mut self) {
        if let Ok(provider) = std::env::var("TACTICORE_LLM_PROVIDER") {
            match provider.parse() {
                Ok(provider) => self.provider = provider,
                Err(e) => tracing::warn!("Ignoring TACTICORE_LLM_PROVIDER: {}", e),
            }
        }

        if self.api_key.is_none() {
            self.api_key = std::env::var("TACTICORE_LLM_API_KEY")
                .or_else(|_| std::env::var("GROQ_API_KEY"))
                .ok();
        }

        if let Ok(model) =
            std::env::var("TACTICORE_LLM_MODEL").or_else(|_| std::env::var("MODEL_NAME"))
        {
            self.model = model;
        }

        if let Ok(endpoint) = std::env::var("TACTICORE_LLM_ENDPOINT") {
            self.endpoint = Some(endpoint);
        }
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint
            .as_deref()
            .unwrap_or_else(|| self.provider.default_endpoint())
    }
}

/// Chat message for LLM communication
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// LLM response
#[derive(Debug, Clone)]
pub struct LLMResponse {
    pub content: String,
    pub tokens_used: Option<u32>,
}

/// Trait for LLM providers
#[async_trait]
pub trait LLM: Send + Sync {
    async fn chat(&self, messages: Vec<ChatMessage>) -> Result<LLMResponse>;
    async fn is_available(&self) -> bool;
    fn provider_type(&self) -> LLMProvider;
}

/// Create LLM instance based on configuration
pub fn create_llm(config: &LLMConfig) -> Result<Box<dyn LLM>> {
    Ok(Box::new(providers::ChatCompletionsProvider::new(
        config.clone(),
    )?))
}

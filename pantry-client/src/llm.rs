use anyhow::anyhow;
use anyhow::{Context, Result};
use async_openai::{
    config::OpenAIConfig, types::ChatCompletionRequestMessage,
    types::ChatCompletionRequestUserMessage, types::CreateChatCompletionRequestArgs,
};
use pantry::basic_models::Category;

/// Gemini's OpenAI-compatible endpoint.
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-lite";
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

lazy_static::lazy_static! {
    static ref PROMPT_TEMPLATE: String = include_str!("prompts/extract-ingredients.md")
        .replace("{categories}", &Category::prompt_list());
}

/// Render the ingredient extraction prompt for one dish.
pub fn build_prompt(dish: &str) -> String {
    PROMPT_TEMPLATE.replace("{dish}", dish)
}

/// Anything that can turn a prompt into free-form text.
#[async_trait::async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Connection details for an OpenAI-compatible chat completion service.
#[derive(Debug, Clone)]
pub struct LlmSettings {
    pub api_base: String,
    pub model: String,
    pub api_key: String,
}

impl LlmSettings {
    /// Read the API key from the environment (or `.env`), keeping the given endpoint and model.
    pub fn from_env(api_base: &str, model: &str) -> Result<Self> {
        let api_key = dotenvy::var(API_KEY_VAR)
            .with_context(|| format!("Could not find {} in the environment", API_KEY_VAR))?;
        Ok(Self {
            api_base: api_base.to_string(),
            model: model.to_string(),
            api_key,
        })
    }
}

/// Calls a chat completion endpoint with a single user message.
pub struct OpenAiCompatGenerator {
    client: async_openai::Client<OpenAIConfig>,
    model: String,
}

impl OpenAiCompatGenerator {
    pub fn new(settings: &LlmSettings) -> Self {
        let config = OpenAIConfig::new()
            .with_api_base(&settings.api_base)
            .with_api_key(&settings.api_key);
        Self {
            client: async_openai::Client::with_config(config),
            model: settings.model.clone(),
        }
    }
}

#[async_trait::async_trait]
impl TextGenerator for OpenAiCompatGenerator {
    /// Calls the LLM one-shot API with a given prompt.
    ///
    /// An empty completion counts as a failure, the same as a network error.
    async fn generate(&self, prompt: &str) -> Result<String> {
        let req_args = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages([ChatCompletionRequestMessage::User(
                ChatCompletionRequestUserMessage {
                    content: prompt.into(),
                    name: None,
                },
            )])
            .build()?;
        let text = self
            .client
            .chat()
            .create(req_args)
            .await?
            .choices
            .first()
            .ok_or(anyhow!("No response from LLM"))?
            .clone()
            .message
            .content
            .ok_or(anyhow!("No response from LLM"))?;
        Ok(text)
    }
}

use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequest,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use futures::StreamExt;
use log::debug;

use super::{FragmentStream, LanguageModel, LlmError, Prompt};
use crate::config::Config;

/// Chat-completions client for any OpenAI-compatible endpoint. Pointed at
/// Gemini's compatibility layer by default.
#[derive(Clone)]
pub struct OpenAiCompatModel {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiCompatModel {
    pub fn new(api_base: &str, api_key: &str, model: impl Into<String>) -> Self {
        let config = OpenAIConfig::new()
            .with_api_base(api_base)
            .with_api_key(api_key);
        Self {
            client: Client::with_config(config),
            model: model.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.llm_api_base, &config.google_api_key, config.llm_model.clone())
    }

    fn build_request(&self, prompt: &Prompt, stream: bool) -> Result<CreateChatCompletionRequest, LlmError> {
        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(prompt.system.as_str())
                .build()?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompt.user.as_str())
                .build()?
                .into(),
        ];

        Ok(CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .temperature(0.0_f32)
            .stream(stream)
            .messages(messages)
            .build()?)
    }
}

#[async_trait]
impl LanguageModel for OpenAiCompatModel {
    async fn stream(&self, prompt: &Prompt) -> Result<FragmentStream, LlmError> {
        let request = self.build_request(prompt, true)?;
        debug!("Opening completion stream on model {}", self.model);

        let upstream = self.client.chat().create_stream(request).await?;

        let fragments = upstream.filter_map(|item| async move {
            match item {
                Ok(chunk) => chunk
                    .choices
                    .into_iter()
                    .next()
                    .and_then(|choice| choice.delta.content)
                    .map(Ok),
                Err(e) => Some(Err(LlmError::from(e))),
            }
        });

        Ok(fragments.boxed())
    }

    async fn complete(&self, prompt: &Prompt) -> Result<String, LlmError> {
        let request = self.build_request(prompt, false)?;
        let response = self.client.chat().create(request).await?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(LlmError::EmptyResponse)
    }
}

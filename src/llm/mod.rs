pub mod openai;
pub mod prompts;

use async_trait::async_trait;
use futures::stream::BoxStream;
use thiserror::Error;

pub use openai::OpenAiCompatModel;
pub use prompts::Prompt;

/// Text fragments as the model produces them. Boundaries are arbitrary and do
/// not line up with JSON tokens.
pub type FragmentStream = BoxStream<'static, Result<String, LlmError>>;

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("Failed to build model request: {0}")]
    Request(String),

    #[error("Model API error: {0}")]
    Api(String),

    #[error("Model returned no content")]
    EmptyResponse,
}

impl From<async_openai::error::OpenAIError> for LlmError {
    fn from(e: async_openai::error::OpenAIError) -> Self {
        use async_openai::error::OpenAIError;

        match e {
            OpenAIError::InvalidArgument(msg) => LlmError::Request(msg),
            other => LlmError::Api(other.to_string()),
        }
    }
}

/// A generative model reachable over the network.
///
/// Handlers receive this through `AppState` so tests can substitute scripted
/// models for the real client.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Opens a token stream for `prompt`.
    async fn stream(&self, prompt: &Prompt) -> Result<FragmentStream, LlmError>;

    /// Runs `prompt` to completion and returns the full response text.
    async fn complete(&self, prompt: &Prompt) -> Result<String, LlmError>;
}

use crate::{
    error::Result,
    models::{ModelReply, PromptPart, SafetySetting},
};
use async_trait::async_trait;

/// The generative model capabilities the flows depend on.
///
/// Implementations perform exactly one provider call per method and never
/// retry. Schema validation of the results is left to the flows.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// Structured analysis: returns the model's JSON answer for `response_schema`.
    async fn analyze(
        &self,
        prompt: Vec<PromptPart>,
        response_schema: serde_json::Value,
    ) -> Result<serde_json::Value>;

    /// Text-to-image generation under the given safety policy.
    async fn generate(
        &self,
        prompt: Vec<PromptPart>,
        safety_settings: Vec<SafetySetting>,
    ) -> Result<ModelReply>;

    /// Image editing over the images embedded in `prompt`.
    async fn composite(&self, prompt: Vec<PromptPart>) -> Result<ModelReply>;

    fn name(&self) -> &str;
}

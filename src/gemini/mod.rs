pub mod api;
pub mod image_client;
pub mod vision_client;

use crate::{
    backend::GenerativeBackend,
    config::GeminiConfig,
    error::Result,
    models::{ModelReply, PromptPart, SafetySetting},
};
use async_trait::async_trait;

pub use api::ApiClient;
pub use image_client::ImageClient;
pub use vision_client::VisionClient;

/// Gemini-backed implementation of every model capability the flows need.
#[derive(Clone)]
pub struct GeminiClient {
    vision_client: VisionClient,
    image_client: ImageClient,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let api = ApiClient::new(&config)?;

        Ok(Self {
            vision_client: VisionClient::new(api.clone(), config.analysis_model()),
            image_client: ImageClient::new(api, config.image_model()),
        })
    }

    pub fn vision(&self) -> &VisionClient {
        &self.vision_client
    }

    pub fn image(&self) -> &ImageClient {
        &self.image_client
    }
}

#[async_trait]
impl GenerativeBackend for GeminiClient {
    async fn analyze(
        &self,
        prompt: Vec<PromptPart>,
        response_schema: serde_json::Value,
    ) -> Result<serde_json::Value> {
        self.vision_client.analyze(prompt, response_schema).await
    }

    async fn generate(
        &self,
        prompt: Vec<PromptPart>,
        safety_settings: Vec<SafetySetting>,
    ) -> Result<ModelReply> {
        self.image_client.generate(prompt, safety_settings).await
    }

    async fn composite(&self, prompt: Vec<PromptPart>) -> Result<ModelReply> {
        self.image_client.edit(prompt).await
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

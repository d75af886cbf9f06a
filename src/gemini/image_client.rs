use super::api::{first_candidate_content, user_content, ApiClient};
use crate::{
    error::Result,
    models::{
        wire::{GenerateContentRequest, GenerationConfig, Part},
        DataUri, ModelReply, PromptPart, ResponseModality, SafetySetting,
    },
};

/// Image generation and editing through an image-capable model.
#[derive(Clone)]
pub struct ImageClient {
    api: ApiClient,
    model: String,
}

impl ImageClient {
    pub fn new(api: ApiClient, model: impl Into<String>) -> Self {
        Self {
            api,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn generate(
        &self,
        prompt: Vec<PromptPart>,
        safety_settings: Vec<SafetySetting>,
    ) -> Result<ModelReply> {
        let request = GenerateContentRequest {
            contents: user_content(prompt),
            generation_config: Some(image_generation_config()),
            safety_settings,
        };

        log::info!("Generating image with model: {}", self.model);
        self.send(&request).await
    }

    pub async fn edit(&self, prompt: Vec<PromptPart>) -> Result<ModelReply> {
        let request = GenerateContentRequest {
            contents: user_content(prompt),
            generation_config: Some(image_generation_config()),
            safety_settings: Vec::new(),
        };

        log::info!("Editing images with model: {}", self.model);
        self.send(&request).await
    }

    async fn send(&self, request: &GenerateContentRequest) -> Result<ModelReply> {
        let response = self.api.generate_content(&self.model, request).await?;
        let content = first_candidate_content(response)?;

        let mut reply = ModelReply::default();
        let mut texts = Vec::new();
        for part in content.parts {
            match part {
                Part::Text { text } => texts.push(text),
                Part::InlineData { inline_data } => {
                    match DataUri::new(inline_data.mime_type, inline_data.data) {
                        Ok(uri) => reply.media.push(uri),
                        Err(e) => log::warn!("Skipping malformed inline image: {}", e),
                    }
                }
                Part::Other(_) => {}
            }
        }
        if !texts.is_empty() {
            reply.text = Some(texts.join("\n"));
        }

        log::debug!(
            "Model returned {} image(s){}",
            reply.media.len(),
            if reply.text.is_some() { " with text" } else { "" }
        );
        Ok(reply)
    }
}

fn image_generation_config() -> GenerationConfig {
    GenerationConfig {
        response_modalities: vec![ResponseModality::Text, ResponseModality::Image],
        ..Default::default()
    }
}

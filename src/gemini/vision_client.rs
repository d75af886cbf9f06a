use super::api::{first_candidate_content, user_content, ApiClient};
use crate::{
    error::{Result, VogueError},
    models::{
        wire::{GenerateContentRequest, GenerationConfig, Part},
        PromptPart,
    },
};

/// Structured (JSON) answers about images.
#[derive(Clone)]
pub struct VisionClient {
    api: ApiClient,
    model: String,
}

impl VisionClient {
    pub fn new(api: ApiClient, model: impl Into<String>) -> Self {
        Self {
            api,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn analyze(
        &self,
        prompt: Vec<PromptPart>,
        response_schema: serde_json::Value,
    ) -> Result<serde_json::Value> {
        let request = GenerateContentRequest {
            contents: user_content(prompt),
            generation_config: Some(GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(response_schema),
                ..Default::default()
            }),
            safety_settings: Vec::new(),
        };

        log::info!("Requesting structured analysis from {}", self.model);
        let response = self.api.generate_content(&self.model, &request).await?;
        let content = first_candidate_content(response)?;

        let text: String = content
            .parts
            .into_iter()
            .filter_map(|part| match part {
                Part::Text { text } => Some(text),
                _ => None,
            })
            .collect();

        parse_json_answer(&text)
    }
}

/// Parses a JSON answer, tolerating a Markdown code fence around it.
pub fn parse_json_answer(text: &str) -> Result<serde_json::Value> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(VogueError::ModelInvocation(
            "model returned no analysis text".into(),
        ));
    }

    let unfenced = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .unwrap_or(trimmed)
        .trim();

    serde_json::from_str(unfenced).map_err(|e| {
        log::debug!("Unparseable analysis answer: {}", unfenced);
        VogueError::ModelInvocation(format!("analysis answer is not valid JSON: {}", e))
    })
}

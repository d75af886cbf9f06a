use crate::{
    config::GeminiConfig,
    error::{Result, VogueError},
    models::{
        wire::{
            ApiErrorResponse, Content, GenerateContentRequest, GenerateContentResponse,
            InlineData, Part,
        },
        PromptPart,
    },
};
use reqwest::Client;
use std::time::Duration;

/// Shared HTTP transport for the `generateContent` endpoint.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &GeminiConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| VogueError::Config("Gemini API key is required".into()))?;

        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| VogueError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url().trim_end_matches('/').to_string(),
        })
    }

    pub fn endpoint(&self, model: &str) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, model)
    }

    pub async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        log::debug!("POST {}", self.endpoint(model));

        let response = self
            .client
            .post(self.endpoint(model))
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                log::error!("Gemini request to {} failed: {}", model, e);
                VogueError::ModelInvocation(format!("Gemini request failed: {}", e))
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| VogueError::ModelInvocation(format!("Failed to read Gemini response: {}", e)))?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(api_error) => format!(
                    "Gemini API error {} {}: {}",
                    status.as_u16(),
                    api_error.error.status,
                    api_error.error.message
                ),
                Err(_) => format!("Gemini API error {}: {}", status.as_u16(), body.trim()),
            };
            log::error!("{}", message);
            return Err(VogueError::ModelInvocation(message));
        }

        serde_json::from_str(&body).map_err(|e| {
            VogueError::ModelInvocation(format!("Unexpected Gemini response shape: {}", e))
        })
    }
}

/// Converts prompt parts into a single user turn.
pub fn user_content(prompt: Vec<PromptPart>) -> Vec<Content> {
    let parts = prompt
        .into_iter()
        .map(|part| match part {
            PromptPart::Text(text) => Part::Text { text },
            PromptPart::Media(uri) => Part::InlineData {
                inline_data: InlineData {
                    mime_type: uri.essence().to_string(),
                    data: uri.data().to_string(),
                },
            },
        })
        .collect();

    vec![Content {
        role: Some("user".to_string()),
        parts,
    }]
}

/// Returns the content of the first candidate, explaining why when there is none.
pub fn first_candidate_content(response: GenerateContentResponse) -> Result<Content> {
    let Some(candidate) = response.candidates.into_iter().next() else {
        let reason = response
            .prompt_feedback
            .and_then(|feedback| feedback.block_reason)
            .map(|reason| format!("prompt blocked: {}", reason))
            .unwrap_or_else(|| "no candidates returned".to_string());
        return Err(VogueError::ModelInvocation(format!("Gemini {}", reason)));
    };

    candidate.content.ok_or_else(|| {
        VogueError::ModelInvocation(format!(
            "Gemini candidate has no content (finish reason: {})",
            candidate.finish_reason.as_deref().unwrap_or("unknown")
        ))
    })
}

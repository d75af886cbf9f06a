use super::{parse_image_field, prompts, Flows};
use crate::{
    error::{Result, VogueError},
    logger,
    models::{AnalyzeClothingImageInput, ClothingAnalysis, SuggestedGender},
};
use serde::Deserialize;

/// The analysis answer as the model sent it, before normalization.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAnalysis {
    garment_type: String,
    clothing_features: Vec<String>,
    suggested_gender: String,
}

impl Flows {
    pub async fn analyze_clothing_image(
        &self,
        input: AnalyzeClothingImageInput,
    ) -> Result<ClothingAnalysis> {
        let photo = parse_image_field("photoDataUri", &input.photo_data_uri)?;

        log::info!(
            "Analyzing clothing image ({}, ~{} bytes) via {}",
            photo.essence(),
            photo.payload_len(),
            self.backend.name()
        );
        let _timer = logger::timer("analyze_clothing_image");

        let raw = self
            .backend
            .analyze(
                prompts::analysis_prompt(photo),
                prompts::analysis_response_schema(),
            )
            .await?;

        let analysis = validate_analysis(raw)?;
        log::debug!(
            "Garment: {} ({} features, suggested gender {})",
            analysis.garment_type,
            analysis.clothing_features.len(),
            analysis.suggested_gender
        );
        Ok(analysis)
    }
}

/// Checks a model answer against the analysis output schema.
pub fn validate_analysis(raw: serde_json::Value) -> Result<ClothingAnalysis> {
    let raw: RawAnalysis = serde_json::from_value(raw).map_err(|e| {
        VogueError::ModelInvocation(format!("analysis response does not match schema: {}", e))
    })?;

    let garment_type = raw.garment_type.trim().to_string();
    if garment_type.is_empty() {
        return Err(VogueError::ModelInvocation(
            "analysis response has an empty garmentType".into(),
        ));
    }

    let suggested_gender: SuggestedGender = raw
        .suggested_gender
        .parse()
        .map_err(|e: VogueError| VogueError::ModelInvocation(format!("analysis response: {}", e)))?;

    let clothing_features = raw
        .clothing_features
        .into_iter()
        .map(|f| f.trim().to_string())
        .filter(|f| !f.is_empty())
        .collect();

    Ok(ClothingAnalysis {
        garment_type,
        clothing_features,
        suggested_gender,
    })
}

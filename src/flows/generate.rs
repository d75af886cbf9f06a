use super::{prompts, require_image, Flows};
use crate::{
    error::{Result, VogueError},
    logger,
    models::{GenerateAiModelInput, GenerateAiModelOutput},
};

impl Flows {
    pub async fn generate_ai_model(
        &self,
        input: GenerateAiModelInput,
    ) -> Result<GenerateAiModelOutput> {
        if input.description.trim().is_empty() {
            return Err(VogueError::Validation("description is required".into()));
        }

        log::info!("Generating AI model via {}", self.backend.name());
        log::debug!("Model description: {}", input.description);
        let _timer = logger::timer("generate_ai_model");

        let reply = self
            .backend
            .generate(
                prompts::generation_prompt(&input.description),
                prompts::MODEL_SAFETY_POLICY.to_vec(),
            )
            .await?;

        let model_image = require_image("model generation", reply)?;
        log::info!(
            "Generated model image ({}, ~{} bytes)",
            model_image.essence(),
            model_image.payload_len()
        );
        Ok(GenerateAiModelOutput { model_image })
    }
}

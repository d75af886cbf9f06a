use super::{parse_image_field, prompts, require_image, Flows};
use crate::{
    error::Result,
    logger,
    models::{CompositeClothingOnModelInput, CompositeClothingOnModelOutput},
};

impl Flows {
    pub async fn composite_clothing_on_model(
        &self,
        input: CompositeClothingOnModelInput,
    ) -> Result<CompositeClothingOnModelOutput> {
        let clothing = parse_image_field("clothingImageDataUri", &input.clothing_image_data_uri)?;
        let model = parse_image_field("modelImageDataUri", &input.model_image_data_uri)?;

        log::info!(
            "Compositing {} clothing onto {} model via {}",
            clothing.essence(),
            model.essence(),
            self.backend.name()
        );
        let _timer = logger::timer("composite_clothing_on_model");

        let reply = self
            .backend
            .composite(prompts::composite_prompt(clothing, model))
            .await?;

        let composite_image = require_image("compositing", reply)?;
        Ok(CompositeClothingOnModelOutput { composite_image })
    }
}

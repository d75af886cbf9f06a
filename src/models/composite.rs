use super::DataUri;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeClothingOnModelInput {
    #[serde(default)]
    pub clothing_image_data_uri: String,
    #[serde(default)]
    pub model_image_data_uri: String,
}

impl CompositeClothingOnModelInput {
    pub fn new(
        clothing_image_data_uri: impl Into<String>,
        model_image_data_uri: impl Into<String>,
    ) -> Self {
        Self {
            clothing_image_data_uri: clothing_image_data_uri.into(),
            model_image_data_uri: model_image_data_uri.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeClothingOnModelOutput {
    pub composite_image: DataUri,
}

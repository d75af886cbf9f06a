use crate::error::VogueError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeClothingImageInput {
    #[serde(default)]
    pub photo_data_uri: String,
}

impl AnalyzeClothingImageInput {
    pub fn new(photo_data_uri: impl Into<String>) -> Self {
        Self {
            photo_data_uri: photo_data_uri.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestedGender {
    Male,
    Female,
    Unisex,
}

impl SuggestedGender {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestedGender::Male => "male",
            SuggestedGender::Female => "female",
            SuggestedGender::Unisex => "unisex",
        }
    }
}

impl fmt::Display for SuggestedGender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SuggestedGender {
    type Err = VogueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(SuggestedGender::Male),
            "female" => Ok(SuggestedGender::Female),
            "unisex" => Ok(SuggestedGender::Unisex),
            other => Err(VogueError::Validation(format!(
                "unknown gender '{}', expected male, female or unisex",
                other
            ))),
        }
    }
}

/// Structured garment metadata returned by the analysis flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClothingAnalysis {
    pub garment_type: String,
    pub clothing_features: Vec<String>,
    pub suggested_gender: SuggestedGender,
}

use crate::models::{
    DataUri, HarmBlockThreshold, HarmCategory, PromptPart, SafetySetting,
};
use serde_json::{json, Value};

pub const ANALYSIS_INSTRUCTIONS: &str = "You are an AI expert in fashion and image recognition. \
Your task is to analyze the clothing item in the provided image and identify its key features and details.

Specifically, extract the following information:
- Garment Type: Determine the type of garment (e.g., dress, shirt, pants, skirt, blouse, trouser).
- Clothing Features: Identify and list the key features and details of the garment, such as color, \
pattern, neckline, sleeve length, embellishments, and overall style.
- Suggested Gender: Based on the style, cut, and design of the clothing, suggest whether this is \
typically worn by males, females, or is unisex. Consider factors like:
  * Dresses, skirts, blouses - typically female
  * Men's trousers, suits, ties - typically male
  * T-shirts, jeans, sweaters - often unisex
  * Consider the cut, fit, and styling details

Here is the image of the clothing item:";

pub const ANALYSIS_CLOSING: &str = "Respond concisely and accurately.";

pub const COMPOSITE_INSTRUCTION: &str = "Composite the clothing item onto the AI model. \
Make sure the clothing looks realistic on the model.";

/// Content policy applied to model generation.
pub const MODEL_SAFETY_POLICY: [SafetySetting; 4] = [
    SafetySetting::new(HarmCategory::HateSpeech, HarmBlockThreshold::BlockOnlyHigh),
    SafetySetting::new(HarmCategory::DangerousContent, HarmBlockThreshold::BlockNone),
    SafetySetting::new(
        HarmCategory::Harassment,
        HarmBlockThreshold::BlockMediumAndAbove,
    ),
    SafetySetting::new(
        HarmCategory::SexuallyExplicit,
        HarmBlockThreshold::BlockLowAndAbove,
    ),
];

pub fn analysis_prompt(photo: DataUri) -> Vec<PromptPart> {
    vec![
        PromptPart::text(ANALYSIS_INSTRUCTIONS),
        PromptPart::media(photo),
        PromptPart::text(ANALYSIS_CLOSING),
    ]
}

pub fn generation_prompt(description: &str) -> Vec<PromptPart> {
    vec![PromptPart::text(description)]
}

pub fn composite_prompt(clothing: DataUri, model: DataUri) -> Vec<PromptPart> {
    vec![
        PromptPart::media(clothing),
        PromptPart::media(model),
        PromptPart::text(COMPOSITE_INSTRUCTION),
    ]
}

/// Output schema for garment analysis, in the provider's OpenAPI subset.
pub fn analysis_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "garmentType": {
                "type": "STRING",
                "description": "The type of garment (e.g., dress, shirt, pants)."
            },
            "clothingFeatures": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Key features and details of the garment (e.g., color, pattern, neckline)."
            },
            "suggestedGender": {
                "type": "STRING",
                "enum": ["male", "female", "unisex"],
                "description": "The suggested gender for the model based on the clothing style (male, female, or unisex)."
            }
        },
        "required": ["garmentType", "clothingFeatures", "suggestedGender"],
        "propertyOrdering": ["garmentType", "clothingFeatures", "suggestedGender"]
    })
}

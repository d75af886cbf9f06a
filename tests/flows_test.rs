mod common;

use common::{flows_with, is_data_uri, FakeBackend, RED_PNG, SCENARIO_DESCRIPTION};
use serde_json::json;
use virtual_vogue::{
    flows::prompts::{COMPOSITE_INSTRUCTION, MODEL_SAFETY_POLICY},
    AnalyzeClothingImageInput, CompositeClothingOnModelInput, DataUri, GenerateAiModelInput,
    PromptPart, SuggestedGender,
};

const MALFORMED: [&str; 5] = [
    "",
    "iVBORw0KGgoAAAANSUhEUgAAAAoAAAAK",
    "image/png;base64,iVBORw0KGgo=",
    "data:image/png,iVBORw0KGgo=",
    "data:image/png;base64,",
];

#[tokio::test]
async fn test_analyze_red_png_returns_garment_metadata() {
    let (backend, flows) = flows_with(FakeBackend::new());

    let analysis = flows
        .analyze_clothing_image(AnalyzeClothingImageInput::new(RED_PNG))
        .await
        .unwrap();

    assert!(!analysis.garment_type.is_empty());
    assert_eq!(analysis.clothing_features.len(), 3);
    assert_eq!(analysis.suggested_gender, SuggestedGender::Female);
    assert_eq!(backend.calls(), 1);

    let prompt = backend.last_prompt();
    assert_eq!(prompt[1], PromptPart::Media(DataUri::parse(RED_PNG).unwrap()));
}

#[tokio::test]
async fn test_analyze_output_serializes_camel_case() {
    let (_backend, flows) = flows_with(FakeBackend::new());
    let analysis = flows
        .analyze_clothing_image(AnalyzeClothingImageInput::new(RED_PNG))
        .await
        .unwrap();

    let json = serde_json::to_value(&analysis).unwrap();
    assert!(json["garmentType"].is_string());
    assert!(json["clothingFeatures"].is_array());
    assert_eq!(json["suggestedGender"], "female");
}

#[tokio::test]
async fn test_analyze_schema_mismatch_is_model_invocation_error() {
    let (backend, flows) = flows_with(FakeBackend::new().with_analysis(json!({
        "garmentType": "",
        "clothingFeatures": [],
        "suggestedGender": "unisex"
    })));

    let err = flows
        .analyze_clothing_image(AnalyzeClothingImageInput::new(RED_PNG))
        .await
        .unwrap_err();
    assert!(err.is_model_invocation());
    assert_eq!(backend.calls(), 1);
}

#[tokio::test]
async fn test_transport_failure_is_model_invocation_error() {
    let (backend, flows) = flows_with(FakeBackend::new().failing("connection reset"));

    let err = flows
        .analyze_clothing_image(AnalyzeClothingImageInput::new(RED_PNG))
        .await
        .unwrap_err();
    assert!(err.is_model_invocation());
    assert!(err.to_string().contains("connection reset"));
    assert_eq!(backend.calls(), 1);
}

#[tokio::test]
async fn test_malformed_inputs_never_reach_the_model() {
    let (backend, flows) = flows_with(FakeBackend::new());

    for bad in MALFORMED {
        let err = flows
            .analyze_clothing_image(AnalyzeClothingImageInput::new(bad))
            .await
            .unwrap_err();
        assert!(err.is_validation(), "analyze accepted {:?}", bad);

        let err = flows
            .composite_clothing_on_model(CompositeClothingOnModelInput::new(bad, RED_PNG))
            .await
            .unwrap_err();
        assert!(err.is_validation(), "composite accepted clothing {:?}", bad);

        let err = flows
            .composite_clothing_on_model(CompositeClothingOnModelInput::new(RED_PNG, bad))
            .await
            .unwrap_err();
        assert!(err.is_validation(), "composite accepted model {:?}", bad);
    }

    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn test_empty_description_is_validation_error() {
    let (backend, flows) = flows_with(FakeBackend::new());

    for description in ["", "   \n"] {
        let err = flows
            .generate_ai_model(GenerateAiModelInput::new(description))
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn test_generate_returns_data_uri_under_safety_policy() {
    let (backend, flows) = flows_with(FakeBackend::new());

    let output = flows
        .generate_ai_model(GenerateAiModelInput::new(SCENARIO_DESCRIPTION))
        .await
        .unwrap();

    assert!(is_data_uri(&output.model_image.to_string()));
    assert_eq!(backend.last_safety(), MODEL_SAFETY_POLICY.to_vec());
    assert_eq!(
        backend.last_prompt(),
        vec![PromptPart::text(SCENARIO_DESCRIPTION)]
    );

    let json = serde_json::to_value(&output).unwrap();
    assert!(is_data_uri(json["modelImage"].as_str().unwrap()));
}

#[tokio::test]
async fn test_repeated_generation_conforms_to_schema_not_equality() {
    let (backend, flows) = flows_with(FakeBackend::new());

    let first = flows
        .generate_ai_model(GenerateAiModelInput::new(SCENARIO_DESCRIPTION))
        .await
        .unwrap();
    let second = flows
        .generate_ai_model(GenerateAiModelInput::new(SCENARIO_DESCRIPTION))
        .await
        .unwrap();

    for output in [&first, &second] {
        assert!(is_data_uri(&output.model_image.to_string()));
    }
    assert_eq!(backend.calls(), 2);
}

#[tokio::test]
async fn test_generate_without_image_is_model_invocation_error() {
    let (_backend, flows) = flows_with(FakeBackend::new().without_images());

    let err = flows
        .generate_ai_model(GenerateAiModelInput::new(SCENARIO_DESCRIPTION))
        .await
        .unwrap_err();
    assert!(err.is_model_invocation());
}

#[tokio::test]
async fn test_composite_returns_data_uri() {
    let (backend, flows) = flows_with(FakeBackend::new());
    let model = "data:image/jpeg;base64,/9j/4AAQ";

    let output = flows
        .composite_clothing_on_model(CompositeClothingOnModelInput::new(RED_PNG, model))
        .await
        .unwrap();

    assert!(is_data_uri(&output.composite_image.to_string()));
    let prompt = backend.last_prompt();
    assert_eq!(prompt.len(), 3);
    assert_eq!(prompt[0], PromptPart::Media(DataUri::parse(RED_PNG).unwrap()));
    assert_eq!(prompt[1], PromptPart::Media(DataUri::parse(model).unwrap()));
    assert_eq!(prompt[2], PromptPart::text(COMPOSITE_INSTRUCTION));
}

#[tokio::test]
async fn test_composite_with_omitted_field_fails_before_call() {
    let (backend, flows) = flows_with(FakeBackend::new());

    let input: CompositeClothingOnModelInput =
        serde_json::from_value(json!({ "modelImageDataUri": RED_PNG })).unwrap();
    let err = flows.composite_clothing_on_model(input).await.unwrap_err();
    assert!(err.is_validation());
    assert!(err.to_string().contains("clothingImageDataUri"));

    let input: CompositeClothingOnModelInput =
        serde_json::from_value(json!({ "clothingImageDataUri": RED_PNG })).unwrap();
    let err = flows.composite_clothing_on_model(input).await.unwrap_err();
    assert!(err.is_validation());
    assert!(err.to_string().contains("modelImageDataUri"));

    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn test_composite_without_image_is_model_invocation_error() {
    let (_backend, flows) = flows_with(FakeBackend::new().without_images());

    let err = flows
        .composite_clothing_on_model(CompositeClothingOnModelInput::new(RED_PNG, RED_PNG))
        .await
        .unwrap_err();
    assert!(err.is_model_invocation());
}

#![allow(dead_code)]

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use virtual_vogue::{
    DataUri, Flows, GenerativeBackend, ModelReply, PromptPart, Result, SafetySetting,
    VogueError,
};

/// A 10x10 solid red PNG.
pub const RED_PNG: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAoAAAAKCAIAAAACUFjqAAAAEklEQVR4nGP4z8CAB+GTG8HSALfKY52fTcuYAAAAAElFTkSuQmCC";

pub const SCENARIO_DESCRIPTION: &str = "A full-body studio portrait of a female model with olive skin and an athletic build. The model is standing confidently, hands on hips. The background is plain white.";

/// Deterministic stand-in for the model provider that counts every call.
pub struct FakeBackend {
    calls: AtomicUsize,
    analysis: Value,
    returns_images: bool,
    failure: Option<String>,
    last_prompt: Mutex<Vec<PromptPart>>,
    last_safety: Mutex<Vec<SafetySetting>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            analysis: json!({
                "garmentType": "dress",
                "clothingFeatures": ["red", "sleeveless", "A-line"],
                "suggestedGender": "female"
            }),
            returns_images: true,
            failure: None,
            last_prompt: Mutex::new(Vec::new()),
            last_safety: Mutex::new(Vec::new()),
        }
    }

    pub fn with_analysis(mut self, analysis: Value) -> Self {
        self.analysis = analysis;
        self
    }

    pub fn without_images(mut self) -> Self {
        self.returns_images = false;
        self
    }

    pub fn failing(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Vec<PromptPart> {
        self.last_prompt.lock().unwrap().clone()
    }

    pub fn last_safety(&self) -> Vec<SafetySetting> {
        self.last_safety.lock().unwrap().clone()
    }

    fn record(&self, prompt: Vec<PromptPart>) -> Result<usize> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        *self.last_prompt.lock().unwrap() = prompt;
        match &self.failure {
            Some(message) => Err(VogueError::ModelInvocation(message.clone())),
            None => Ok(n),
        }
    }

    /// Like a real model, every call yields a different image.
    fn reply(&self, n: usize) -> Result<ModelReply> {
        if !self.returns_images {
            return Ok(ModelReply {
                text: Some("I can't help with that.".into()),
                media: vec![],
            });
        }
        let payload = STANDARD.encode(format!("image-{}", n));
        Ok(ModelReply {
            text: Some("Here is your image.".into()),
            media: vec![DataUri::new("image/png", payload)?],
        })
    }
}

#[async_trait]
impl GenerativeBackend for FakeBackend {
    async fn analyze(&self, prompt: Vec<PromptPart>, _schema: Value) -> Result<Value> {
        self.record(prompt)?;
        Ok(self.analysis.clone())
    }

    async fn generate(
        &self,
        prompt: Vec<PromptPart>,
        safety_settings: Vec<SafetySetting>,
    ) -> Result<ModelReply> {
        let n = self.record(prompt)?;
        *self.last_safety.lock().unwrap() = safety_settings;
        self.reply(n)
    }

    async fn composite(&self, prompt: Vec<PromptPart>) -> Result<ModelReply> {
        let n = self.record(prompt)?;
        self.reply(n)
    }

    fn name(&self) -> &str {
        "fake"
    }
}

pub fn flows_with(backend: FakeBackend) -> (Arc<FakeBackend>, Flows) {
    let backend = Arc::new(backend);
    let flows = Flows::new(backend.clone());
    (backend, flows)
}

pub fn is_data_uri(value: &str) -> bool {
    let Some(rest) = value.strip_prefix("data:") else {
        return false;
    };
    match rest.split_once(";base64,") {
        Some((mime, payload)) => mime.contains('/') && !payload.is_empty(),
        None => false,
    }
}

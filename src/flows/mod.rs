//! Schema-validated wrappers around single model invocations.
//!
//! Every flow validates its input, builds a fixed prompt, calls the backend
//! exactly once, and checks the shape of what came back.

pub mod analyze;
pub mod composite;
pub mod generate;
pub mod prompts;

use crate::{
    backend::GenerativeBackend,
    error::{Result, VogueError},
    models::DataUri,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct Flows {
    backend: Arc<dyn GenerativeBackend>,
}

impl Flows {
    pub fn new(backend: Arc<dyn GenerativeBackend>) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &Arc<dyn GenerativeBackend> {
        &self.backend
    }
}

/// Parses a required data URI field, naming the field in the error.
pub(crate) fn parse_image_field(field: &str, value: &str) -> Result<DataUri> {
    if value.trim().is_empty() {
        return Err(VogueError::Validation(format!("{} is required", field)));
    }
    DataUri::parse(value).map_err(|e| match e {
        VogueError::Validation(msg) => VogueError::Validation(format!("{}: {}", field, msg)),
        other => other,
    })
}

/// Takes the first image of a reply, or fails naming the flow.
pub(crate) fn require_image(flow: &str, reply: crate::models::ModelReply) -> Result<DataUri> {
    let text = reply.text.clone();
    reply.first_image().ok_or_else(|| {
        let detail = text
            .map(|t| format!(" (model said: {})", t.trim()))
            .unwrap_or_default();
        VogueError::ModelInvocation(format!("{} returned no image{}", flow, detail))
    })
}

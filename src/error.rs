use thiserror::Error;

#[derive(Debug, Error)]
pub enum VogueError {
    /// Input did not satisfy the declared schema. Raised before any model call.
    #[error("Validation error: {0}")]
    Validation(String),
    /// The model call failed or its response did not match the output schema.
    #[error("Model invocation error: {0}")]
    ModelInvocation(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

impl VogueError {
    pub fn kind(&self) -> &'static str {
        match self {
            VogueError::Validation(_) => "ValidationError",
            VogueError::ModelInvocation(_) => "ModelInvocationError",
            VogueError::Config(_) => "ConfigError",
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, VogueError::Validation(_))
    }

    pub fn is_model_invocation(&self) -> bool {
        matches!(self, VogueError::ModelInvocation(_))
    }
}

pub type Result<T> = std::result::Result<T, VogueError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_and_kind() {
        let err = VogueError::Validation("description is required".into());
        assert_eq!(err.to_string(), "Validation error: description is required");
        assert_eq!(err.kind(), "ValidationError");
        assert!(err.is_validation());

        let err = VogueError::ModelInvocation("no image returned".into());
        assert_eq!(err.kind(), "ModelInvocationError");
        assert!(err.is_model_invocation());
        assert!(!err.is_validation());
    }
}

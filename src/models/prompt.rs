use super::DataUri;

/// One segment of a multimodal prompt, kept in send order.
#[derive(Debug, Clone, PartialEq)]
pub enum PromptPart {
    Text(String),
    Media(DataUri),
}

impl PromptPart {
    pub fn text(text: impl Into<String>) -> Self {
        PromptPart::Text(text.into())
    }

    pub fn media(uri: DataUri) -> Self {
        PromptPart::Media(uri)
    }
}

/// What an image-capable model sent back: optional commentary plus images in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelReply {
    pub text: Option<String>,
    pub media: Vec<DataUri>,
}

impl ModelReply {
    pub fn with_image(image: DataUri) -> Self {
        Self {
            text: None,
            media: vec![image],
        }
    }

    pub fn first_image(self) -> Option<DataUri> {
        self.media.into_iter().next()
    }
}

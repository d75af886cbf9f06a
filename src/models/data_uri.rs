use crate::error::{Result, VogueError};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

const SCHEME: &str = "data:";
const BASE64_MARKER: &str = ";base64";

/// Inline image content in the form `data:<mimetype>;base64,<payload>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DataUri {
    mime_type: String,
    data: String,
}

impl DataUri {
    /// Builds a data URI from a MIME type and an already Base64-encoded payload.
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Result<Self> {
        let mime_type = mime_type.into();
        let data = data.into();
        validate_mime_type(&mime_type)?;
        validate_payload(&data)?;
        Ok(Self { mime_type, data })
    }

    pub fn from_bytes(mime_type: impl Into<String>, bytes: &[u8]) -> Result<Self> {
        Self::new(mime_type, STANDARD.encode(bytes))
    }

    pub fn parse(input: &str) -> Result<Self> {
        let rest = input.strip_prefix(SCHEME).ok_or_else(|| {
            VogueError::Validation("data URI must start with 'data:'".into())
        })?;

        let (header, payload) = rest.split_once(',').ok_or_else(|| {
            VogueError::Validation("data URI is missing the ',' before its payload".into())
        })?;

        let mime_type = header.strip_suffix(BASE64_MARKER).ok_or_else(|| {
            VogueError::Validation("data URI must use Base64 encoding (';base64,')".into())
        })?;

        Self::new(mime_type, payload)
    }

    /// Full media type, including any parameters that preceded `;base64`.
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Media type without parameters, e.g. `image/png`.
    pub fn essence(&self) -> &str {
        self.mime_type
            .split(';')
            .next()
            .unwrap_or(&self.mime_type)
            .trim()
    }

    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn is_image(&self) -> bool {
        self.essence().starts_with("image/")
    }

    pub fn decode(&self) -> Result<Vec<u8>> {
        STANDARD
            .decode(&self.data)
            .map_err(|e| VogueError::Validation(format!("invalid Base64 payload: {}", e)))
    }

    /// Approximate decoded size, for logging without dumping the payload.
    pub fn payload_len(&self) -> usize {
        let padding = self.data.bytes().rev().take_while(|b| *b == b'=').count();
        ((self.data.len() / 4) * 3).saturating_sub(padding.min(2))
    }
}

fn validate_mime_type(mime_type: &str) -> Result<()> {
    let essence = mime_type.split(';').next().unwrap_or("").trim();
    match essence.split_once('/') {
        Some((kind, subtype))
            if !kind.is_empty()
                && !subtype.is_empty()
                && !subtype.contains('/')
                && !essence.contains(char::is_whitespace) =>
        {
            Ok(())
        }
        _ => Err(VogueError::Validation(format!(
            "data URI has an invalid MIME type: '{}'",
            mime_type
        ))),
    }
}

fn validate_payload(data: &str) -> Result<()> {
    if data.is_empty() {
        return Err(VogueError::Validation("data URI payload is empty".into()));
    }
    STANDARD
        .decode(data)
        .map(|_| ())
        .map_err(|e| VogueError::Validation(format!("invalid Base64 payload: {}", e)))
}

impl fmt::Display for DataUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{},{}", SCHEME, self.mime_type, BASE64_MARKER, self.data)
    }
}

impl FromStr for DataUri {
    type Err = VogueError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for DataUri {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DataUri {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DataUri::parse(&raw).map_err(serde::de::Error::custom)
    }
}

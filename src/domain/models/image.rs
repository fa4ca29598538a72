use serde::{Deserialize, Serialize};

pub const DEFAULT_IMAGE_SIZE: &str = "1024x1024";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRequest {
    pub prompt: String,
    pub n: u32,
    pub size: String,
}

impl ImageRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            n: 1,
            size: DEFAULT_IMAGE_SIZE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageResponse {
    pub revised_prompt: Option<String>,
    pub url: Option<String>,
}

impl ImageResponse {
    pub fn new(revised_prompt: Option<String>, url: Option<String>) -> Self {
        Self { revised_prompt, url }
    }

    /// Image URL with JSON-escaped ampersands restored.
    pub fn display_url(&self) -> Option<String> {
        self.url.as_deref().map(unescape_ampersands)
    }
}

/// Replace JSON-style escaped ampersands (a backslash followed by `u0026`)
/// with `&`.
pub fn unescape_ampersands(text: &str) -> String {
    text.replace("\\u0026", "&")
}

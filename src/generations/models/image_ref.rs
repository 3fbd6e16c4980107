use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Url,
    Inline,
}

/// One generated image as returned by the service: a URL or base64 data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(image: impl Into<String>) -> Self {
        Self(image.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    pub fn kind(&self) -> ImageKind {
        if self.0.starts_with("http://") || self.0.starts_with("https://") {
            ImageKind::Url
        } else {
            ImageKind::Inline
        }
    }

    /// Value usable directly as an `<img src>`. Bare base64 gets a PNG data
    /// URI prefix; URLs and existing data URIs are returned unchanged.
    pub fn to_src(&self) -> String {
        match self.kind() {
            ImageKind::Url => self.0.clone(),
            ImageKind::Inline if self.0.starts_with("data:") => self.0.clone(),
            ImageKind::Inline => format!("data:image/png;base64,{}", self.0),
        }
    }
}

impl From<&str> for ImageRef {
    fn from(image: &str) -> Self {
        Self::new(image)
    }
}

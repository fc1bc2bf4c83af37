use serde::{Deserialize, Serialize};

/// Uploaded image referenced by a container or unit gallery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaRef {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default)]
    pub is_cover: bool,
}

impl MediaRef {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            caption: None,
            is_cover: false,
        }
    }

    pub fn cover(url: impl Into<String>) -> Self {
        Self {
            is_cover: true,
            ..Self::new(url)
        }
    }
}

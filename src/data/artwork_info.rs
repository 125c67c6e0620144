use serde::{Serialize, Deserialize};
use serde_json::Value;

/// Artwork metadata as returned by an artwork info endpoint
///
/// The server sends all three fields or none of them. Each field is taken
/// from the response as-is; nothing is inferred for a missing field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtworkInfo {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub image_uri: Option<String>,
}

/// A complete artwork description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtworkImage<'a> {
    pub width: u32,
    pub height: u32,
    pub uri: &'a str,
}

impl ArtworkInfo {
    /// The all-absent value
    pub fn empty() -> Self {
        Self::default()
    }

    /// Field-by-field lookup on a decoded response body
    pub fn from_json(body: &Value) -> Self {
        let dimension = |key: &str| {
            body.get(key)
                .and_then(|v| v.as_u64())
                .and_then(|v| u32::try_from(v).ok())
        };

        ArtworkInfo {
            width: dimension("width"),
            height: dimension("height"),
            image_uri: body.get("image").and_then(|v| v.as_str()).map(|s| s.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width.is_none() && self.height.is_none() && self.image_uri.is_none()
    }

    /// Returns the artwork only if all three fields are present
    pub fn image(&self) -> Option<ArtworkImage<'_>> {
        match (self.width, self.height, self.image_uri.as_deref()) {
            (Some(width), Some(height), Some(uri)) => Some(ArtworkImage { width, height, uri }),
            _ => None,
        }
    }
}

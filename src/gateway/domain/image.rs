//! Image sizes and generated image references.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Supported output dimensions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageSize {
    /// 256 by 256 pixels.
    #[serde(rename = "256x256")]
    Small,
    /// 512 by 512 pixels.
    #[serde(rename = "512x512")]
    Medium,
    /// 1024 by 1024 pixels.
    #[default]
    #[serde(rename = "1024x1024")]
    Large,
    /// 1024 by 1792 pixels.
    #[serde(rename = "1024x1792")]
    Portrait,
    /// 1792 by 1024 pixels.
    #[serde(rename = "1792x1024")]
    Landscape,
}

/// Error returned for sizes outside the supported set.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unsupported size: {0}")]
pub struct UnsupportedImageSizeError(pub String);

impl ImageSize {
    /// Every supported size.
    pub const ALL: [Self; 5] = [
        Self::Small,
        Self::Medium,
        Self::Large,
        Self::Portrait,
        Self::Landscape,
    ];

    /// Returns the `WIDTHxHEIGHT` representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Small => "256x256",
            Self::Medium => "512x512",
            Self::Large => "1024x1024",
            Self::Portrait => "1024x1792",
            Self::Landscape => "1792x1024",
        }
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ImageSize {
    type Error = UnsupportedImageSizeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|size| size.as_str() == value.trim())
            .ok_or_else(|| UnsupportedImageSizeError(value.to_owned()))
    }
}

/// Reference to a generated image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedImage {
    /// Location of the image.
    pub image_url: String,
    /// Generated dimensions.
    pub size: ImageSize,
    /// File format.
    pub format: String,
    /// Backend that produced the image.
    pub model_used: String,
}

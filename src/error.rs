//! Error handling

use std::path::PathBuf;

/// definitions for the grayharvest pipeline.
#[derive(Debug)]
pub enum GrayHarvestError {
    /// The credential file could not be opened
    MissingCredential(PathBuf, std::io::Error),
    /// When a network call fails before a response arrives
    Transport(String),
    /// Local file operations
    Io(std::io::Error),
    /// The response body was not the JSON we expected
    Parse(serde_json::Error),
    /// The response parsed but had no candidate text in it
    MissingText(String),
    /// Decoding or encoding an image failed
    Image(image::ImageError),
    /// The configured endpoint isn't a valid URL
    InvalidEndpoint(url::ParseError),
}

impl std::fmt::Display for GrayHarvestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingCredential(path, err) => {
                write!(f, "API key file {} is missing: {err}", path.display())
            }
            Self::Transport(message) => write!(f, "Request failed: {message}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
            Self::Parse(err) => write!(f, "Failed to parse response JSON: {err}"),
            Self::MissingText(why) => write!(f, "Response contained no text: {why}"),
            Self::Image(err) => write!(f, "Image error: {err}"),
            Self::InvalidEndpoint(err) => write!(f, "Invalid endpoint URL: {err}"),
        }
    }
}

impl std::error::Error for GrayHarvestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::MissingCredential(_, err) | Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Image(err) => Some(err),
            Self::InvalidEndpoint(err) => Some(err),
            Self::Transport(_) | Self::MissingText(_) => None,
        }
    }
}

impl From<std::io::Error> for GrayHarvestError {
    fn from(err: std::io::Error) -> Self {
        GrayHarvestError::Io(err)
    }
}

impl From<serde_json::Error> for GrayHarvestError {
    fn from(err: serde_json::Error) -> Self {
        GrayHarvestError::Parse(err)
    }
}

impl From<image::ImageError> for GrayHarvestError {
    fn from(err: image::ImageError) -> Self {
        GrayHarvestError::Image(err)
    }
}

impl From<url::ParseError> for GrayHarvestError {
    fn from(err: url::ParseError) -> Self {
        GrayHarvestError::InvalidEndpoint(err)
    }
}

impl From<ureq::Error> for GrayHarvestError {
    fn from(err: ureq::Error) -> Self {
        GrayHarvestError::Transport(err.to_string())
    }
}

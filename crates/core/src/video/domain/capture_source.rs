use std::fmt;
use std::str::FromStr;

use crate::shared::constants::DEFAULT_CAMERA_INDEX;

/// Where frames come from: a camera device or a file/stream URI.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CaptureSource {
    Device(i32),
    Uri(String),
}

impl CaptureSource {
    /// Parses `0`, `/dev/video2` as device indices; anything else is a URI.
    pub fn parse(source: &str) -> Self {
        let trimmed = source.trim();
        if let Ok(index) = trimmed.parse::<i32>() {
            return Self::Device(index);
        }
        if let Some(stripped) = trimmed.strip_prefix("/dev/video") {
            if !stripped.is_empty() && stripped.chars().all(|c| c.is_ascii_digit()) {
                if let Ok(index) = stripped.parse::<i32>() {
                    return Self::Device(index);
                }
            }
        }
        Self::Uri(trimmed.to_string())
    }
}

impl Default for CaptureSource {
    fn default() -> Self {
        Self::Device(DEFAULT_CAMERA_INDEX)
    }
}

impl FromStr for CaptureSource {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for CaptureSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Device(index) => write!(f, "camera #{index}"),
            Self::Uri(uri) => f.write_str(uri),
        }
    }
}

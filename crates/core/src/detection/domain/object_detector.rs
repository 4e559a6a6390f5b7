use crate::detection::domain::detection::Detection;
use crate::shared::frame::Frame;

/// Domain interface for object detection.
///
/// Implementations own their inference session, hence `&mut self`.
pub trait ObjectDetector: Send {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<Detection>, Box<dyn std::error::Error>>;
}

use crate::shared::bounding_box::BoundingBox;

/// One predicted object instance in a single frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Detection {
    pub bbox: BoundingBox,
    pub class_id: usize,
    /// Score in `[0, 1]`.
    pub confidence: f64,
}

impl Detection {
    pub fn new(bbox: BoundingBox, class_id: usize, confidence: f64) -> Self {
        Self {
            bbox,
            class_id,
            confidence,
        }
    }

    /// Keeps detections scoring at or above `threshold`, in input order.
    pub fn above_threshold(detections: Vec<Detection>, threshold: f64) -> Vec<Detection> {
        detections
            .into_iter()
            .filter(|d| d.confidence >= threshold)
            .collect()
    }
}

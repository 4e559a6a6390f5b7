use thiserror::Error;

use crate::detection::domain::class_names::ClassNames;
use crate::shared::constants::{
    DEFAULT_CONFIDENCE, DEFAULT_IOU_THRESHOLD, DEFAULT_MAX_DETECTIONS,
};

#[derive(Error, Debug, PartialEq)]
pub enum ModelConfigError {
    #[error("confidence threshold must be between 0.0 and 1.0, got {0}")]
    Confidence(f64),
    #[error("IoU threshold must be between 0.0 and 1.0, got {0}")]
    Iou(f64),
    #[error("max detections must be positive")]
    MaxDetections,
}

/// Detector settings fixed at startup.
///
/// Fields are private so a constructed config is always valid.
#[derive(Clone, Debug)]
pub struct ModelConfig {
    confidence: f64,
    iou_threshold: f64,
    max_detections: usize,
    class_names: ClassNames,
}

impl ModelConfig {
    pub fn new(
        confidence: f64,
        iou_threshold: f64,
        max_detections: usize,
        class_names: ClassNames,
    ) -> Result<Self, ModelConfigError> {
        if !(0.0..=1.0).contains(&confidence) {
            return Err(ModelConfigError::Confidence(confidence));
        }
        if !(0.0..=1.0).contains(&iou_threshold) {
            return Err(ModelConfigError::Iou(iou_threshold));
        }
        if max_detections == 0 {
            return Err(ModelConfigError::MaxDetections);
        }
        Ok(Self {
            confidence,
            iou_threshold,
            max_detections,
            class_names,
        })
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn iou_threshold(&self) -> f64 {
        self.iou_threshold
    }

    pub fn max_detections(&self) -> usize {
        self.max_detections
    }

    pub fn class_names(&self) -> &ClassNames {
        &self.class_names
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            confidence: DEFAULT_CONFIDENCE,
            iou_threshold: DEFAULT_IOU_THRESHOLD,
            max_detections: DEFAULT_MAX_DETECTIONS,
            class_names: ClassNames::coco(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn test_defaults_match_demo_tuning() {
        let config = ModelConfig::default();
        assert_relative_eq!(config.confidence(), 0.08);
        assert_relative_eq!(config.iou_threshold(), 0.45);
        assert_eq!(config.max_detections(), 1000);
        assert_eq!(config.class_names().len(), 80);
    }

    #[rstest]
    #[case::negative(-0.1, ModelConfigError::Confidence(-0.1))]
    #[case::above_one(1.5, ModelConfigError::Confidence(1.5))]
    fn test_rejects_bad_confidence(#[case] confidence: f64, #[case] expected: ModelConfigError) {
        let err = ModelConfig::new(confidence, 0.45, 10, ClassNames::coco()).unwrap_err();
        assert_eq!(err, expected);
    }

    #[test]
    fn test_rejects_bad_iou() {
        let err = ModelConfig::new(0.5, 2.0, 10, ClassNames::coco()).unwrap_err();
        assert_eq!(err, ModelConfigError::Iou(2.0));
    }

    #[test]
    fn test_rejects_zero_max_detections() {
        let err = ModelConfig::new(0.5, 0.45, 0, ClassNames::coco()).unwrap_err();
        assert_eq!(err, ModelConfigError::MaxDetections);
    }

    #[rstest]
    #[case(0.0)]
    #[case(1.0)]
    fn test_accepts_boundaries(#[case] confidence: f64) {
        assert!(ModelConfig::new(confidence, 0.45, 1, ClassNames::coco()).is_ok());
    }
}

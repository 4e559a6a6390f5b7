use crate::detection::domain::class_names::ClassNames;
use crate::detection::domain::detection::Detection;
use crate::shared::bounding_box::BoundingBox;
use crate::shared::constants::LABEL_OFFSET_Y;

/// What gets drawn for one detection: its box and a text label.
#[derive(Clone, Debug, PartialEq)]
pub struct Annotation {
    pub bbox: BoundingBox,
    pub label: String,
    /// Bottom-left corner of the label text.
    pub label_origin: (i32, i32),
}

impl Annotation {
    pub fn from_detection(detection: &Detection, names: &ClassNames) -> Self {
        let bbox = detection.bbox;
        Self {
            bbox,
            label: format_label(&names.name(detection.class_id), detection.confidence),
            label_origin: (bbox.x1, bbox.y1 - LABEL_OFFSET_Y),
        }
    }
}

/// `"<name>: <pct>%"` with one decimal and a sign column, e.g. `person:  87.3%`.
pub fn format_label(name: &str, confidence: f64) -> String {
    let pct = confidence * 100.0;
    let sign = if pct.is_sign_negative() { "" } else { " " };
    format!("{name}: {sign}{pct:.1}%")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("person", 0.873, "person:  87.3%")]
    #[case("dog", 1.0, "dog:  100.0%")]
    #[case("car", 0.08, "car:  8.0%")]
    #[case("cup", 0.0, "cup:  0.0%")]
    #[case("kite", 0.12345, "kite:  12.3%")]
    #[case("tie", 0.9999, "tie:  100.0%")]
    fn test_format_label(#[case] name: &str, #[case] confidence: f64, #[case] expected: &str) {
        assert_eq!(format_label(name, confidence), expected);
    }

    #[test]
    fn test_from_detection_resolves_name_and_offsets_label() {
        let det = Detection::new(BoundingBox::new(100, 50, 200, 150), 0, 0.873);
        let annotation = Annotation::from_detection(&det, &ClassNames::coco());

        assert_eq!(annotation.bbox, BoundingBox::new(100, 50, 200, 150));
        assert_eq!(annotation.label, "person:  87.3%");
        assert_eq!(annotation.label_origin, (100, 40));
    }

    #[test]
    fn test_label_origin_may_leave_frame() {
        let det = Detection::new(BoundingBox::new(0, 4, 30, 30), 2, 0.5);
        let annotation = Annotation::from_detection(&det, &ClassNames::coco());
        assert_eq!(annotation.label_origin, (0, -6));
    }

    #[test]
    fn test_unknown_class_uses_fallback_name() {
        let det = Detection::new(BoundingBox::new(0, 20, 30, 30), 7, 0.5);
        let names = ClassNames::new(vec!["helmet".into()]);
        let annotation = Annotation::from_detection(&det, &names);
        assert_eq!(annotation.label, "class 7:  50.0%");
    }
}
